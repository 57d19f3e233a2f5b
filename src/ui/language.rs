use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::legend::KeyLegend;
use super::setup::SetupPane;
use super::{label_style, prompt_style, value_style, Component};
use crate::engine::GameEngine;

/// Human readable name for a language code.
pub fn language_name(code: &str) -> &str {
    match code {
        "en" => "English",
        "es" => "Spanish",
        other => other,
    }
}

/// First wizard step: pick one of the engine's languages.
#[derive(Debug, Default)]
pub struct LanguagePane {
    selected: usize,
    confirmed: bool,
}

impl LanguagePane {
    /// Starts confirmed when the engine already has a known language.
    pub fn new(engine: &dyn GameEngine) -> Self {
        let position = engine
            .language()
            .and_then(|current| engine.languages().iter().position(|l| l == current));
        match position {
            Some(selected) => Self {
                selected,
                confirmed: true,
            },
            None => Self::default(),
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }
}

impl Component for LanguagePane {
    fn render(&self, engine: &dyn GameEngine, area: Rect, buf: &mut Buffer) {
        let lines = if self.confirmed {
            let name = engine.language().map(language_name).unwrap_or("-");
            vec![Line::from(vec![
                Span::styled("Language:    ", prompt_style()),
                Span::styled(name.to_string(), label_style()),
            ])]
        } else {
            let mut lines = vec![Line::from(Span::styled(
                "Select a language:",
                prompt_style(),
            ))];
            for (index, code) in engine.languages().iter().enumerate() {
                let line = if index == self.selected {
                    Line::from(vec![
                        Span::raw("  "),
                        Span::styled("◉", value_style()),
                        Span::raw(format!(" {}", language_name(code))),
                    ])
                } else {
                    Line::from(Span::styled(
                        format!("  ◎ {}", language_name(code)),
                        Style::default(),
                    ))
                };
                lines.push(line);
            }
            lines
        };
        Paragraph::new(lines).render(area, buf);
    }

    fn update(&mut self, engine: &mut dyn GameEngine, key: &KeyEvent) {
        let count = engine.languages().len();
        if count == 0 {
            return;
        }
        match key.code {
            KeyCode::Down => self.selected = (self.selected + 1) % count,
            KeyCode::Up => self.selected = (self.selected + count - 1) % count,
            KeyCode::Enter | KeyCode::Right => {
                let language = engine.languages()[self.selected.min(count - 1)].clone();
                match engine.set_language(Some(&language)) {
                    Ok(()) => self.confirmed = true,
                    Err(e) => log::warn!("language rejected: {e}"),
                }
            }
            _ => {}
        }
    }

    fn is_done(&self) -> bool {
        self.confirmed
    }
}

impl SetupPane for LanguagePane {
    fn height(&self, engine: &dyn GameEngine) -> u16 {
        if self.confirmed {
            1
        } else {
            engine.languages().len() as u16 + 2
        }
    }

    fn legend(&self, legend: &mut KeyLegend) {
        legend.add_option("Up", "Move up");
        legend.add_option("Down", "Move down");
        legend.add_option("Enter", "Select");
    }

    fn change(&mut self) {
        self.confirmed = false;
    }
}
