use std::time::Duration;

use crossterm::event::KeyEvent;
use ratatui::{buffer::Buffer, layout::Rect};

use crate::engine::{GameEngine, GameStatus, Statistics};
use crate::keys::{is_press, is_quit};
use crate::persistence::Persistence;
use crate::ui::game::GameView;
use crate::ui::setup::SetupView;
use crate::ui::title::{TitleBanner, TITLE_HEIGHT};
use crate::ui::{take_rows, ActiveView, Component};

/// How long the farewell stays on screen before the process exits.
pub const FAREWELL_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns the engine and the views; routes each key and keeps the active view
/// in step with the engine status.
pub struct Session<E: GameEngine> {
    engine: E,
    persistence: Persistence,
    title: TitleBanner,
    setup: SetupView,
    game: GameView,
    active: ActiveView,
    last_status: Option<GameStatus>,
}

impl<E: GameEngine> Session<E> {
    pub fn new(engine: E, persistence: Persistence) -> Self {
        let status = engine.status();
        Self {
            setup: SetupView::new(&engine),
            game: GameView::new(),
            title: TitleBanner,
            active: ActiveView::for_status(status),
            last_status: status,
            engine,
            persistence,
        }
    }

    /// Statistics first, since the engine is built around them; the saved
    /// configuration is then applied to the engine before any view exists.
    pub fn bootstrap(persistence: Persistence, build: impl FnOnce(Option<Statistics>) -> E) -> Self {
        let statistics = persistence
            .load_statistics()
            .map(|stats| Statistics::from(&stats));
        let mut engine = build(statistics);
        persistence.load_config(&mut engine);
        Self::new(engine, persistence)
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> Flow {
        if !is_press(key) {
            return Flow::Continue;
        }
        if is_quit(key) {
            if self.engine.status().is_some() {
                self.persistence.save_config(&self.engine);
            }
            self.persistence.save_statistics(&self.engine);
            log::info!("session closed");
            return Flow::Quit;
        }

        self.title.update(&mut self.engine, key);
        match self.active {
            ActiveView::Setup => self.setup.update(&mut self.engine, key),
            ActiveView::Game => self.game.update(&mut self.engine, key),
        }
        self.sync_active_view();
        Flow::Continue
    }

    fn sync_active_view(&mut self) {
        let status = self.engine.status();
        if status != self.last_status {
            log::debug!("engine status {:?} -> {:?}", self.last_status, status);
            match status {
                Some(GameStatus::Playing) => self.persistence.save_config(&self.engine),
                Some(GameStatus::Finished) => self.persistence.save_statistics(&self.engine),
                _ => {}
            }
            self.last_status = status;
        }

        let active = ActiveView::for_status(status);
        if active != self.active {
            match active {
                ActiveView::Setup => self.setup.rearm(),
                ActiveView::Game => self.game.reset(),
            }
            self.active = active;
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let mut content = area;
        let title = take_rows(&mut content, TITLE_HEIGHT);
        self.title.render(&self.engine, title, buf);
        match self.active {
            ActiveView::Setup => self.setup.render(&self.engine, content, buf),
            ActiveView::Game => self.game.render(&self.engine, content, buf),
        }
    }

    pub fn active(&self) -> ActiveView {
        self.active
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn setup(&self) -> &SetupView {
        &self.setup
    }

    pub fn game(&self) -> &GameView {
        &self.game
    }
}
