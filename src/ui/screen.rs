use crossterm::event::KeyEvent;
use ratatui::{buffer::Buffer, layout::Rect};

use crate::engine::{GameEngine, GameStatus};

/// A renderable, updatable piece of the session UI.
///
/// `render` draws the current state and must not change it, so drawing twice
/// without an `update` in between yields the same buffer. `update` reacts to a
/// key and never draws.
pub trait Component {
    fn render(&self, engine: &dyn GameEngine, area: Rect, buf: &mut Buffer);
    fn update(&mut self, engine: &mut dyn GameEngine, key: &KeyEvent);
    /// Advisory completion flag; for wizard panes, "the user confirmed this step".
    fn is_done(&self) -> bool;
}

/// Top-level component set eligible to render and receive input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveView {
    Setup,
    Game,
}

impl ActiveView {
    pub fn for_status(status: Option<GameStatus>) -> Self {
        match status {
            Some(GameStatus::Playing | GameStatus::Paused) => ActiveView::Game,
            Some(GameStatus::Setup | GameStatus::Finished) | None => ActiveView::Setup,
        }
    }
}
