use crossterm::event::KeyEvent;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::Component;
use crate::engine::GameEngine;

pub const TITLE_HEIGHT: u16 = 4;

const TITLE: &str = "~ G U E S S   T H E   W O R D ~";

/// Static header shown above every view. Never consumes input.
#[derive(Debug, Default)]
pub struct TitleBanner;

impl Component for TitleBanner {
    fn render(&self, _engine: &dyn GameEngine, area: Rect, buf: &mut Buffer) {
        let rule = "▓".repeat(area.width as usize);
        let lines = vec![
            Line::from(Span::styled(rule, Style::default().fg(Color::White))),
            Line::default(),
            Line::from(Span::styled(
                TITLE,
                Style::default()
                    .fg(Color::LightMagenta)
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            Line::default(),
        ];
        Paragraph::new(lines).render(area, buf);
    }

    fn update(&mut self, _engine: &mut dyn GameEngine, _key: &KeyEvent) {}

    fn is_done(&self) -> bool {
        true
    }
}
