use crossterm::event::{KeyCode, KeyEvent};
use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::legend::KeyLegend;
use super::setup::SetupPane;
use super::{bold_style, dim_style, label_style, prompt_style, Component};
use crate::engine::GameEngine;

/// Second wizard step: toggle the categories words are drawn from.
///
/// The first option is virtual and selects or clears every category at once.
#[derive(Debug, Default)]
pub struct CategoriesPane {
    cursor: usize,
    confirmed: bool,
}

fn all_selected(engine: &dyn GameEngine) -> bool {
    let selected = engine.selected_categories();
    engine
        .available_categories()
        .iter()
        .all(|c| selected.contains(c))
}

impl CategoriesPane {
    pub fn new(engine: &dyn GameEngine) -> Self {
        Self {
            cursor: 0,
            confirmed: !engine.selected_categories().is_empty(),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn toggle(&self, engine: &mut dyn GameEngine) {
        let available = engine.available_categories();
        if self.cursor == 0 {
            if all_selected(engine) {
                for category in &available {
                    engine.remove_category(category);
                }
            } else {
                for category in &available {
                    if let Err(e) = engine.add_category(category) {
                        log::warn!("category rejected: {e}");
                    }
                }
            }
            return;
        }
        let Some(category) = available.get(self.cursor - 1) else {
            return;
        };
        if engine.selected_categories().contains(category) {
            engine.remove_category(category);
        } else if let Err(e) = engine.add_category(category) {
            log::warn!("category rejected: {e}");
        }
    }
}

impl Component for CategoriesPane {
    fn render(&self, engine: &dyn GameEngine, area: Rect, buf: &mut Buffer) {
        let selected = engine.selected_categories();
        let lines = if self.confirmed {
            vec![Line::from(vec![
                Span::styled("Words:       ", prompt_style()),
                Span::styled(engine.available_words().to_string(), label_style()),
                Span::styled(format!(" ({})", selected.iter().join(", ")), dim_style()),
            ])]
        } else {
            let mut lines = vec![Line::from(Span::styled(
                "Select categories:",
                prompt_style(),
            ))];
            let bulk = if all_selected(engine) { "None" } else { "All" };
            let options = std::iter::once(None)
                .chain(engine.available_categories().into_iter().map(Some));
            for (index, option) in options.enumerate() {
                let style = if index == self.cursor {
                    bold_style()
                } else {
                    dim_style()
                };
                let line = match option {
                    None => Line::from(Span::styled(format!("  {bulk}"), style)),
                    Some(category) => {
                        let mark = if selected.contains(&category) {
                            Span::styled("X", Style::default().fg(Color::Green))
                        } else {
                            Span::raw(" ")
                        };
                        Line::from(vec![
                            Span::styled("  [", style),
                            mark,
                            Span::styled(format!("] {category}"), style),
                        ])
                    }
                };
                lines.push(line);
            }
            lines
        };
        Paragraph::new(lines).render(area, buf);
    }

    fn update(&mut self, engine: &mut dyn GameEngine, key: &KeyEvent) {
        let count = engine.available_categories().len() + 1;
        self.cursor = self.cursor.min(count - 1);
        match key.code {
            KeyCode::Down => self.cursor = (self.cursor + 1) % count,
            KeyCode::Up => self.cursor = (self.cursor + count - 1) % count,
            KeyCode::Enter => self.toggle(engine),
            // Zero categories is allowed here; the engine decides at play time.
            KeyCode::Right => self.confirmed = true,
            _ => {}
        }
    }

    fn is_done(&self) -> bool {
        self.confirmed
    }
}

impl SetupPane for CategoriesPane {
    fn height(&self, engine: &dyn GameEngine) -> u16 {
        if self.confirmed {
            1
        } else {
            engine.available_categories().len() as u16 + 3
        }
    }

    fn legend(&self, legend: &mut KeyLegend) {
        legend.add_option("Up", "Move up");
        legend.add_option("Down", "Move down");
        legend.add_option("Enter", "Toggle");
        legend.add_option("Left", "Back");
        legend.add_option("Right", "Continue");
    }

    fn change(&mut self) {
        self.confirmed = false;
    }
}
