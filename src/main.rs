use std::{
    error::Error,
    fs::{self, File},
    io::{self, stdin},
    path::{Path, PathBuf},
};

use adivina::{
    app_dirs::AppDirs,
    engine::LocalEngine,
    persistence::{FileConfigStore, FileStatisticsStore, Persistence},
    runtime::{drive, CrosstermEventSource, Runner},
    session::Session,
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use simplelog::{LevelFilter, WriteLogger};

/// guess-the-word game for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Guess the hidden word letter by letter. Pick a language, categories and a difficulty, use helpers when stuck, and keep your statistics between sessions."
)]
pub struct Cli {
    /// configuration file (defaults to the platform config directory)
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// statistics file (defaults to the platform data directory)
    #[clap(short = 's', long)]
    statistics: Option<PathBuf>,

    /// seed for the word picker, for reproducible games
    #[clap(long)]
    seed: Option<u64>,

    /// write a debug log next to the other application state
    #[clap(short = 'd', long)]
    debug: bool,
}

impl Cli {
    fn persistence(&self) -> Persistence {
        let config = match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        };
        let statistics = match &self.statistics {
            Some(path) => FileStatisticsStore::with_path(path),
            None => FileStatisticsStore::new(),
        };
        Persistence::new(config, statistics)
    }
}

fn setup_logging(path: &Path) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    WriteLogger::init(
        LevelFilter::Debug,
        simplelog::ConfigBuilder::new()
            .set_target_level(LevelFilter::Error)
            .build(),
        File::create(path)?,
    )?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if cli.debug {
        setup_logging(&AppDirs::log_path())?;
    }

    let seed = cli.seed;
    let mut session = Session::bootstrap(cli.persistence(), |statistics| match seed {
        Some(seed) => LocalEngine::seeded(statistics, seed),
        None => LocalEngine::new(statistics),
    });

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(CrosstermEventSource::new());
    let result = drive(&mut terminal, &mut session, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    Ok(())
}
