use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::legend::KeyLegend;
use super::setup::SetupPane;
use super::{bold_style, dim_style, label_style, prompt_style, Component};
use crate::engine::{Difficulty, GameEngine};

/// Last wizard step: one of the three fixed levels.
#[derive(Debug, Default)]
pub struct DifficultyPane {
    selected: usize,
    confirmed: bool,
}

impl DifficultyPane {
    pub fn new(engine: &dyn GameEngine) -> Self {
        match engine.difficulty() {
            Some(difficulty) => Self {
                selected: difficulty.index(),
                confirmed: true,
            },
            None => Self::default(),
        }
    }

    pub fn selected(&self) -> Difficulty {
        Difficulty::from_index(self.selected).unwrap_or(Difficulty::Easy)
    }
}

impl Component for DifficultyPane {
    fn render(&self, engine: &dyn GameEngine, area: Rect, buf: &mut Buffer) {
        let lines = if self.confirmed {
            let level = engine.difficulty().unwrap_or(self.selected());
            vec![Line::from(vec![
                Span::styled("Level:       ", prompt_style()),
                Span::styled(level.to_string(), label_style()),
            ])]
        } else {
            let mut lines = vec![Line::from(Span::styled(
                "Select difficulty:",
                prompt_style(),
            ))];
            for (index, level) in Difficulty::ALL.iter().enumerate() {
                let style = if index == self.selected {
                    bold_style()
                } else {
                    dim_style()
                };
                lines.push(Line::from(Span::styled(
                    format!("  {}) {level}", index + 1),
                    style,
                )));
            }
            lines
        };
        Paragraph::new(lines).render(area, buf);
    }

    fn update(&mut self, engine: &mut dyn GameEngine, key: &KeyEvent) {
        let count = Difficulty::ALL.len();
        match key.code {
            KeyCode::Down => self.selected = (self.selected + 1) % count,
            KeyCode::Up => self.selected = (self.selected + count - 1) % count,
            KeyCode::Enter | KeyCode::Right => {
                engine.set_difficulty(self.selected());
                self.confirmed = true;
            }
            _ => {}
        }
    }

    fn is_done(&self) -> bool {
        self.confirmed
    }
}

impl SetupPane for DifficultyPane {
    fn height(&self, _engine: &dyn GameEngine) -> u16 {
        if self.confirmed {
            1
        } else {
            Difficulty::ALL.len() as u16 + 2
        }
    }

    fn legend(&self, legend: &mut KeyLegend) {
        legend.add_option("Up", "Move up");
        legend.add_option("Down", "Move down");
        legend.add_option("Enter", "Select");
        legend.add_option("Left", "Back");
    }

    fn change(&mut self) {
        self.confirmed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::stub::StubEngine;
    use crate::keys::press;

    #[test]
    fn cycles_and_confirms() {
        let mut engine = StubEngine::new();
        let mut pane = DifficultyPane::new(&engine);
        pane.update(&mut engine, &press(KeyCode::Up));
        assert_eq!(pane.selected(), Difficulty::Hard);
        pane.update(&mut engine, &press(KeyCode::Down));
        assert_eq!(pane.selected(), Difficulty::Easy);
        pane.update(&mut engine, &press(KeyCode::Down));
        pane.update(&mut engine, &press(KeyCode::Right));
        assert!(pane.is_done());
        assert_eq!(engine.difficulty, Some(Difficulty::Normal));
    }

    #[test]
    fn restores_engine_difficulty() {
        let mut engine = StubEngine::new();
        engine.difficulty = Some(Difficulty::Hard);
        let pane = DifficultyPane::new(&engine);
        assert!(pane.is_done());
        assert_eq!(pane.selected(), Difficulty::Hard);
    }
}
