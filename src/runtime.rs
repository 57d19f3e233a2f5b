use std::io;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};
use ratatui::{backend::Backend, Terminal};

use crate::engine::GameEngine;
use crate::session::{Flow, Session, FAREWELL_DELAY};
use crate::ui::render_farewell;

/// Terminal events the session reacts to. There is no tick: the screen only
/// changes in response to input.
#[derive(Clone, Debug)]
pub enum SessionEvent {
    Key(KeyEvent),
    Resize,
}

/// Source of terminal events (keyboard, resize).
pub trait EventSource {
    /// Blocks until the next event; `None` once the source is exhausted.
    fn recv(&self) -> Option<SessionEvent>;
}

/// Production event source: a reader thread forwarding crossterm events.
pub struct CrosstermEventSource {
    rx: Receiver<SessionEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || loop {
            let forwarded = match event::read() {
                Ok(CtEvent::Key(key)) => Some(SessionEvent::Key(key)),
                Ok(CtEvent::Resize(_, _)) => Some(SessionEvent::Resize),
                Ok(_) => None,
                Err(e) => {
                    log::warn!("terminal event reader stopped: {e}");
                    break;
                }
            };
            if let Some(ev) = forwarded {
                if tx.send(ev).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv(&self) -> Option<SessionEvent> {
        self.rx.recv().ok()
    }
}

/// Channel-fed event source for tests.
pub struct TestEventSource {
    rx: Receiver<SessionEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<SessionEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv(&self) -> Option<SessionEvent> {
        self.rx.recv().ok()
    }
}

/// Pulls events one at a time and knows how long to linger on exit.
pub struct Runner<S: EventSource> {
    event_source: S,
    farewell_delay: Duration,
}

impl<S: EventSource> Runner<S> {
    pub fn new(event_source: S) -> Self {
        Self {
            event_source,
            farewell_delay: FAREWELL_DELAY,
        }
    }

    pub fn with_farewell_delay(mut self, delay: Duration) -> Self {
        self.farewell_delay = delay;
        self
    }

    pub fn farewell_delay(&self) -> Duration {
        self.farewell_delay
    }

    pub fn step(&self) -> Option<SessionEvent> {
        self.event_source.recv()
    }
}

fn redraw<B: Backend, E: GameEngine>(
    terminal: &mut Terminal<B>,
    session: &Session<E>,
) -> io::Result<()> {
    terminal.clear()?;
    terminal.draw(|f| {
        let area = f.area();
        session.render(area, f.buffer_mut());
    })?;
    terminal.set_cursor_position((0, 0))
}

/// Runs the session until it asks to quit or the event source dries up.
pub fn drive<B: Backend, E: GameEngine, S: EventSource>(
    terminal: &mut Terminal<B>,
    session: &mut Session<E>,
    runner: &Runner<S>,
) -> io::Result<()> {
    redraw(terminal, session)?;

    while let Some(event) = runner.step() {
        match event {
            SessionEvent::Resize => redraw(terminal, session)?,
            SessionEvent::Key(key) => {
                if session.handle_key(&key) == Flow::Quit {
                    terminal.clear()?;
                    terminal.draw(|f| {
                        let area = f.area();
                        render_farewell(area, f.buffer_mut());
                    })?;
                    thread::sleep(runner.farewell_delay());
                    return Ok(());
                }
                redraw(terminal, session)?;
            }
        }
    }
    log::debug!("event source closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::stub::StubEngine;
    use crate::keys::press;
    use crate::persistence::{FileConfigStore, FileStatisticsStore, Persistence};
    use crossterm::event::KeyCode;
    use ratatui::backend::TestBackend;
    use tempfile::tempdir;

    fn buffer_contains(terminal: &Terminal<TestBackend>, needle: &str) -> bool {
        crate::ui::buffer_text(terminal.backend().buffer()).contains(needle)
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(SessionEvent::Resize).unwrap();
        let runner = Runner::new(TestEventSource::new(rx));
        assert!(matches!(runner.step(), Some(SessionEvent::Resize)));
    }

    #[test]
    fn step_ends_when_source_disconnects() {
        let (tx, rx) = mpsc::channel::<SessionEvent>();
        drop(tx);
        let runner = Runner::new(TestEventSource::new(rx));
        assert!(runner.step().is_none());
    }

    #[test]
    fn drive_shows_farewell_on_quit() {
        let dir = tempdir().unwrap();
        let persistence = Persistence::new(
            FileConfigStore::with_path(dir.path().join("config.json")),
            FileStatisticsStore::with_path(dir.path().join("statistics.txt")),
        );
        let mut session = Session::new(StubEngine::new(), persistence);
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();

        let (tx, rx) = mpsc::channel();
        tx.send(SessionEvent::Key(press(KeyCode::Down))).unwrap();
        tx.send(SessionEvent::Resize).unwrap();
        tx.send(SessionEvent::Key(press(KeyCode::Esc))).unwrap();
        let runner = Runner::new(TestEventSource::new(rx)).with_farewell_delay(Duration::ZERO);

        drive(&mut terminal, &mut session, &runner).unwrap();
        assert!(buffer_contains(&terminal, "Leaving..."));
        assert!(dir.path().join("config.json").exists());
        assert!(dir.path().join("statistics.txt").exists());
    }

    #[test]
    fn drive_returns_when_events_run_out() {
        let dir = tempdir().unwrap();
        let persistence = Persistence::new(
            FileConfigStore::with_path(dir.path().join("config.json")),
            FileStatisticsStore::with_path(dir.path().join("statistics.txt")),
        );
        let mut session = Session::new(StubEngine::new(), persistence);
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();

        let (tx, rx) = mpsc::channel();
        tx.send(SessionEvent::Key(press(KeyCode::Up))).unwrap();
        drop(tx);
        drive(&mut terminal, &mut session, &Runner::new(TestEventSource::new(rx))).unwrap();

        assert!(buffer_contains(&terminal, "Select a language:"));
        assert!(!dir.path().join("config.json").exists());
    }
}
