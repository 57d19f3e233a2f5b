use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::categories::CategoriesPane;
use super::difficulty::DifficultyPane;
use super::language::LanguagePane;
use super::legend::KeyLegend;
use super::statistics::StatisticsPane;
use super::{banner, prompt_style, split_legend, take_rows, Component};
use crate::engine::GameEngine;
use crate::keys::{ctrl_char, plain_char};

/// A confirmable step of the setup wizard.
pub trait SetupPane: Component {
    /// Rows the pane needs in its current state.
    fn height(&self, engine: &dyn GameEngine) -> u16;
    fn legend(&self, legend: &mut KeyLegend);
    /// Drops the confirmation so the pane takes input again.
    fn change(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SetupStep {
    Language,
    Categories,
    Difficulty,
    Ready,
}

impl SetupStep {
    /// The first unconfirmed pane, or `Ready` when all three are confirmed.
    pub fn from_flags(language: bool, categories: bool, difficulty: bool) -> Self {
        match (language, categories, difficulty) {
            (false, _, _) => SetupStep::Language,
            (true, false, _) => SetupStep::Categories,
            (true, true, false) => SetupStep::Difficulty,
            (true, true, true) => SetupStep::Ready,
        }
    }
}

#[derive(Debug)]
pub struct SetupView {
    language: LanguagePane,
    categories: CategoriesPane,
    difficulty: DifficultyPane,
    statistics: StatisticsPane,
    show_statistics: bool,
    done: bool,
    notice: Option<String>,
}

impl SetupView {
    pub fn new(engine: &dyn GameEngine) -> Self {
        let mut view = Self {
            language: LanguagePane::new(engine),
            categories: CategoriesPane::new(engine),
            difficulty: DifficultyPane::new(engine),
            statistics: StatisticsPane,
            show_statistics: false,
            done: false,
            notice: None,
        };
        // A later step is never confirmed ahead of an earlier one.
        if !view.language.is_done() {
            view.categories.change();
        }
        if !view.categories.is_done() {
            view.difficulty.change();
        }
        view
    }

    pub fn step(&self) -> SetupStep {
        SetupStep::from_flags(
            self.language.is_done(),
            self.categories.is_done(),
            self.difficulty.is_done(),
        )
    }

    pub fn is_showing_statistics(&self) -> bool {
        self.show_statistics
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Back on this view after a game: the wizard keeps its choices.
    pub fn rearm(&mut self) {
        self.done = false;
        self.show_statistics = false;
        self.notice = None;
    }

    fn active_pane(&mut self) -> Option<&mut dyn SetupPane> {
        match self.step() {
            SetupStep::Language => Some(&mut self.language),
            SetupStep::Categories => Some(&mut self.categories),
            SetupStep::Difficulty => Some(&mut self.difficulty),
            SetupStep::Ready => None,
        }
    }

    fn step_back(&mut self) {
        match self.step() {
            SetupStep::Language => {}
            SetupStep::Categories => self.language.change(),
            SetupStep::Difficulty => self.categories.change(),
            SetupStep::Ready => self.difficulty.change(),
        }
    }

    fn legend(&self) -> KeyLegend {
        let mut legend = KeyLegend::new();
        match self.step() {
            SetupStep::Language => self.language.legend(&mut legend),
            SetupStep::Categories => self.categories.legend(&mut legend),
            SetupStep::Difficulty => self.difficulty.legend(&mut legend),
            SetupStep::Ready => {
                legend.add_option("Enter", "Play");
                legend.add_option("Left", "Back");
            }
        }
        legend.add_option("S", "Statistics");
        legend
    }
}

impl Component for SetupView {
    fn render(&self, engine: &dyn GameEngine, area: Rect, buf: &mut Buffer) {
        if self.show_statistics {
            self.statistics.render(engine, area, buf);
            return;
        }

        let (mut body, legend_area) = split_legend(area);
        let header = take_rows(&mut body, 2);
        Paragraph::new(Line::from(banner(
            "C O N F I G U R A T I O N",
            Color::LightYellow,
        )))
        .render(header, buf);

        let step = self.step();
        let panes: [(&dyn SetupPane, SetupStep); 3] = [
            (&self.language, SetupStep::Language),
            (&self.categories, SetupStep::Categories),
            (&self.difficulty, SetupStep::Difficulty),
        ];
        for (pane, pane_step) in panes {
            if pane_step > step {
                break;
            }
            let rows = take_rows(&mut body, pane.height(engine));
            pane.render(engine, rows, buf);
        }

        take_rows(&mut body, 1);
        let mut lines = Vec::new();
        if step == SetupStep::Ready {
            lines.push(Line::from(Span::styled("Press Enter to play", prompt_style())));
        }
        if let Some(notice) = &self.notice {
            lines.push(Line::from(Span::styled(
                notice.clone(),
                Style::default().fg(Color::Red),
            )));
        }
        Paragraph::new(lines).render(body, buf);

        self.legend().render(legend_area, buf);
    }

    fn update(&mut self, engine: &mut dyn GameEngine, key: &KeyEvent) {
        if self.show_statistics {
            if ctrl_char(key) == Some('b')
                || plain_char(key) == Some('b')
                || key.code == KeyCode::Backspace
            {
                self.show_statistics = false;
            }
            return;
        }
        self.notice = None;
        if let Some(c) = ctrl_char(key) {
            if c != 'b' {
                self.notice = Some(format!(
                    "Combination CTRL+{} is not supported",
                    c.to_uppercase()
                ));
            }
            return;
        }

        if plain_char(key) == Some('s') {
            self.show_statistics = true;
            return;
        }
        if key.code == KeyCode::Left {
            self.step_back();
            return;
        }

        match self.active_pane() {
            Some(pane) => pane.update(engine, key),
            None => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Right) {
                    match engine.play() {
                        Ok(()) => self.done = true,
                        Err(e) => {
                            log::debug!("play rejected: {e}");
                            self.notice = Some(e.to_string());
                        }
                    }
                }
            }
        }
    }

    fn is_done(&self) -> bool {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::stub::StubEngine;
    use crate::engine::{Difficulty, EngineError};
    use crate::keys::{ctrl, press};
    use crate::ui::buffer_text;

    fn draw(view: &SetupView, engine: &StubEngine) -> Buffer {
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        view.render(engine, area, &mut buf);
        buf
    }

    #[test]
    fn step_is_first_unconfirmed_pane() {
        assert_eq!(SetupStep::from_flags(false, true, true), SetupStep::Language);
        assert_eq!(SetupStep::from_flags(true, false, true), SetupStep::Categories);
        assert_eq!(SetupStep::from_flags(true, true, false), SetupStep::Difficulty);
        assert_eq!(SetupStep::from_flags(true, true, true), SetupStep::Ready);
    }

    #[test]
    fn fresh_start_shows_language_step() {
        let engine = StubEngine::new();
        let view = SetupView::new(&engine);
        assert_eq!(view.step(), SetupStep::Language);
        let text = buffer_text(&draw(&view, &engine));
        assert!(text.contains("C O N F I G U R A T I O N"));
        assert!(text.contains("Select a language:"));
        assert!(!text.contains("Select categories:"));
    }

    #[test]
    fn later_steps_never_confirmed_before_earlier_ones() {
        let mut engine = StubEngine::new();
        engine.selected = vec!["food".into()];
        engine.difficulty = Some(Difficulty::Hard);
        let view = SetupView::new(&engine);
        assert_eq!(view.step(), SetupStep::Language);
        assert!(!view.categories.is_done());
        assert!(!view.difficulty.is_done());
    }

    #[test]
    fn restored_config_starts_ready() {
        let engine = StubEngine::playing();
        let view = SetupView::new(&engine);
        assert_eq!(view.step(), SetupStep::Ready);
        let text = buffer_text(&draw(&view, &engine));
        assert!(text.contains("Language:    English"));
        assert!(text.contains("Words:       8 (animals, food)"));
        assert!(text.contains("Level:       Normal"));
        assert!(text.contains("Press Enter to play"));
    }

    #[test]
    fn walks_through_wizard_and_plays() {
        let mut engine = StubEngine::new();
        let mut view = SetupView::new(&engine);

        view.update(&mut engine, &press(KeyCode::Right));
        assert_eq!(view.step(), SetupStep::Categories);
        view.update(&mut engine, &press(KeyCode::Enter));
        view.update(&mut engine, &press(KeyCode::Right));
        assert_eq!(view.step(), SetupStep::Difficulty);
        view.update(&mut engine, &press(KeyCode::Enter));
        assert_eq!(view.step(), SetupStep::Ready);
        assert!(!view.is_done());

        view.update(&mut engine, &press(KeyCode::Enter));
        assert!(view.is_done());
        assert_eq!(engine.called("play"), 1);
        assert_eq!(engine.language.as_deref(), Some("en"));
        assert_eq!(engine.selected.len(), 2);
        assert_eq!(engine.difficulty, Some(Difficulty::Easy));
    }

    #[test]
    fn left_steps_back_one_pane() {
        let mut engine = StubEngine::playing();
        let mut view = SetupView::new(&engine);
        view.update(&mut engine, &press(KeyCode::Left));
        assert_eq!(view.step(), SetupStep::Difficulty);
        view.update(&mut engine, &press(KeyCode::Left));
        assert_eq!(view.step(), SetupStep::Categories);
        view.update(&mut engine, &press(KeyCode::Left));
        assert_eq!(view.step(), SetupStep::Language);
        view.update(&mut engine, &press(KeyCode::Left));
        assert_eq!(view.step(), SetupStep::Language);
    }

    #[test]
    fn rejected_play_shows_reason() {
        let mut engine = StubEngine::playing();
        engine.play_error = Some(EngineError::NoWords);
        let mut view = SetupView::new(&engine);
        view.update(&mut engine, &press(KeyCode::Enter));
        assert!(!view.is_done());
        assert_eq!(view.notice(), Some(EngineError::NoWords.to_string().as_str()));
        let text = buffer_text(&draw(&view, &engine));
        assert!(text.contains("no words available"));
    }

    #[test]
    fn statistics_overlay_swallows_input() {
        let mut engine = StubEngine::new();
        let mut view = SetupView::new(&engine);
        view.update(&mut engine, &press(KeyCode::Char('s')));
        assert!(view.is_showing_statistics());
        assert!(buffer_text(&draw(&view, &engine)).contains("S T A T I S T I C S"));

        view.update(&mut engine, &press(KeyCode::Enter));
        view.update(&mut engine, &press(KeyCode::Down));
        assert!(engine.calls.is_empty());
        assert_eq!(view.step(), SetupStep::Language);

        view.update(&mut engine, &ctrl('b'));
        assert!(!view.is_showing_statistics());

        view.update(&mut engine, &press(KeyCode::Char('s')));
        view.update(&mut engine, &press(KeyCode::Backspace));
        assert!(!view.is_showing_statistics());
    }

    #[test]
    fn unsupported_ctrl_combination_shows_notice() {
        let mut engine = StubEngine::new();
        let mut view = SetupView::new(&engine);
        view.update(&mut engine, &ctrl('x'));
        assert_eq!(view.notice(), Some("Combination CTRL+X is not supported"));
        assert!(engine.calls.is_empty());
        assert_eq!(view.step(), SetupStep::Language);
        assert!(buffer_text(&draw(&view, &engine)).contains("CTRL+X is not supported"));

        view.update(&mut engine, &press(KeyCode::Down));
        assert_eq!(view.notice(), None);
    }

    #[test]
    fn render_is_idempotent() {
        let mut engine = StubEngine::new();
        let mut view = SetupView::new(&engine);
        view.update(&mut engine, &press(KeyCode::Enter));
        assert_eq!(draw(&view, &engine), draw(&view, &engine));
    }
}
