use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::legend::KeyLegend;
use super::messages::MessageQueue;
use super::statistics::StatisticsPane;
use super::{
    banner, bold_style, label_style, split_legend, take_rows, value_style, Component,
};
use crate::engine::{GameEngine, GameStatus, HelperKind, MaskSlot, RoundView};
use crate::keys::{ctrl_char, plain_char};

const LABEL_WIDTH: usize = 11;
const CELL_WIDTH: u16 = 5;

fn label(text: &str) -> Span<'static> {
    Span::styled(format!("{text:<LABEL_WIDTH$}"), label_style())
}

fn helper_label(kind: HelperKind) -> &'static str {
    match kind {
        HelperKind::DiscardLetter => "Discard",
        HelperKind::RevealLetter => "Reveal",
        HelperKind::RevealHint => "Another hint",
    }
}

/// The board for a running (or paused) game.
#[derive(Debug, Default)]
pub struct GameView {
    statistics: StatisticsPane,
    show_statistics: bool,
    messages: MessageQueue,
    done: bool,
}

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh board for a new game.
    pub fn reset(&mut self) {
        self.show_statistics = false;
        self.done = false;
        self.messages.drain_and_clear();
    }

    pub fn is_showing_statistics(&self) -> bool {
        self.show_statistics
    }

    pub fn messages(&self) -> &MessageQueue {
        &self.messages
    }

    fn header(&self, engine: &dyn GameEngine) -> Line<'static> {
        let mut spans = Vec::new();
        if let Some(stats) = engine.statistics() {
            spans.push(label("Round:"));
            spans.push(Span::styled(format!("{:<8}", stats.rounds + 1), value_style()));
        }
        spans.push(Span::styled("Level: ", label_style()));
        let level = engine
            .difficulty()
            .map(|d| d.to_string())
            .unwrap_or_default();
        spans.push(Span::styled(format!("{level:<10}"), value_style()));
        if let Some(stats) = engine.statistics() {
            spans.push(Span::styled("Streak: ", label_style()));
            spans.push(Span::styled(stats.consecutive_wins.to_string(), value_style()));
        }
        if engine.status() == Some(GameStatus::Paused) {
            spans.push(Span::raw("   "));
            spans.push(banner("❚❚ PAUSED", Color::Yellow));
        }
        Line::from(spans)
    }

    fn attempts(engine: &dyn GameEngine, round: &RoundView) -> Line<'static> {
        let total = engine.config().map(|c| c.attempts).unwrap_or(0);
        let remaining = round.remaining_attempts;
        let used = total.saturating_sub(remaining);
        let mut spans = vec![label("Attempts:")];
        spans.extend((0..used).map(|_| Span::styled("███ ", Style::default().fg(Color::Red))));
        spans.extend((0..remaining).map(|_| Span::raw("███ ")));
        Line::from(spans)
    }

    fn word(round: &RoundView) -> Line<'static> {
        let mut spans = vec![label("Word:")];
        for slot in &round.mask {
            let span = match slot {
                MaskSlot::Hidden => Span::raw(" ___ "),
                MaskSlot::Space => Span::raw("     "),
                MaskSlot::Revealed(c) => Span::styled(
                    format!(" _{}_ ", c.to_uppercase()),
                    value_style().add_modifier(Modifier::UNDERLINED),
                ),
            };
            spans.push(span);
        }
        Line::from(spans)
    }

    fn hint(round: &RoundView) -> Line<'static> {
        let first = round
            .category
            .clone()
            .or_else(|| round.definition.clone())
            .or_else(|| round.hints.first().cloned());
        match first {
            Some(hint) => Line::from(vec![label("Hint:"), Span::raw(hint)]),
            None => Line::default(),
        }
    }

    /// Alphabet rows wrapped to `width`: unused letters plain, used ones
    /// green when they are in the word and red otherwise.
    fn letters(engine: &dyn GameEngine, round: &RoundView, width: u16) -> Vec<Line<'static>> {
        let per_row = (width.saturating_sub(LABEL_WIDTH as u16) / CELL_WIDTH).max(1) as usize;
        let mut lines = vec![Line::from(label("Letters:"))];
        for chunk in engine.alphabet().chunks(per_row) {
            let mut spans = vec![Span::raw(" ".repeat(LABEL_WIDTH))];
            for &letter in chunk {
                let style = if round.is_remaining(letter) {
                    bold_style()
                } else if round.reveals(letter) {
                    bold_style().fg(Color::Green)
                } else {
                    bold_style().fg(Color::Red)
                };
                spans.push(Span::styled(format!("  {}  ", letter.to_uppercase()), style));
            }
            lines.push(Line::from(spans));
        }
        lines
    }

    fn helpers(round: &RoundView) -> Line<'static> {
        let mut spans = vec![label("Helpers:")];
        for kind in HelperKind::ALL {
            if round.remaining_helpers(kind) == 0 {
                continue;
            }
            if kind == HelperKind::RevealHint && round.hidden_hints == 0 {
                continue;
            }
            spans.push(Span::raw(format!(
                " {} (Key {})   ",
                helper_label(kind),
                kind.key()
            )));
        }
        Line::from(spans)
    }

    fn render_messages(&self, round: Option<&RoundView>, area: Rect, buf: &mut Buffer) {
        match round {
            Some(round) if round.is_finished() => {
                let outcome = if round.completed {
                    banner("Y O U   W O N !  ☺", Color::Green)
                } else {
                    banner("Y O U   L O S T  ☹", Color::Red)
                };
                Paragraph::new(Line::from(outcome)).render(area, buf);
            }
            _ => self.messages.render(area, buf),
        }
    }

    fn legend(engine: &dyn GameEngine, round: Option<&RoundView>) -> KeyLegend {
        let mut legend = KeyLegend::new();
        legend.add_option("CTRL+E", "Exit");
        if engine.statistics().is_some() {
            legend.add_option("CTRL+S", "Statistics");
        }
        match engine.status() {
            Some(GameStatus::Playing) => legend.add_option("CTRL+P", "Pause"),
            Some(GameStatus::Paused) => legend.add_option("CTRL+R", "Resume"),
            _ => {}
        }
        if round.is_some_and(RoundView::is_finished) {
            legend.add_option("ENTER", "Next");
        }
        legend
    }

    fn on_ctrl(&mut self, engine: &mut dyn GameEngine, c: char) {
        let result = match c {
            'e' => {
                engine.finish();
                self.done = true;
                Ok(())
            }
            's' => {
                self.show_statistics = engine.statistics().is_some();
                if !self.show_statistics {
                    self.messages.info("No statistics yet");
                }
                Ok(())
            }
            'p' => engine.pause(),
            'r' => engine.resume(),
            'n' => engine.next(),
            'b' => {
                self.show_statistics = false;
                Ok(())
            }
            other => {
                self.messages.info(format!(
                    "Combination CTRL+{} is not supported",
                    other.to_uppercase()
                ));
                Ok(())
            }
        };
        if let Err(e) = result {
            log::debug!("ctrl+{c} rejected: {e}");
            self.messages.error(e.to_string());
        }
    }

    fn on_helper(&mut self, engine: &mut dyn GameEngine, kind: HelperKind) {
        match engine.use_helper(kind) {
            Ok(()) => self.messages.success(format!("Used helper: {kind}")),
            Err(e) => self.messages.error(format!("Helper {kind} failed: {e}")),
        }
    }

    fn on_letter(&mut self, engine: &mut dyn GameEngine, key: &KeyEvent) {
        let letter = plain_char(key).filter(|c| engine.alphabet().contains(c));
        let Some(letter) = letter else {
            self.messages.error("Pick one of the letters on the board");
            return;
        };
        let Some(round) = engine.round() else {
            return;
        };
        let shown = letter.to_uppercase();
        if !round.is_remaining(letter) {
            self.messages.warn(format!("Letter {shown} already used"));
            return;
        }
        match engine.prove_letter(letter) {
            Ok(true) => self.messages.success(format!("Letter {shown} found ✔")),
            Ok(false) => self.messages.error(format!("Letter {shown} not found ✘")),
            Err(e) => self.messages.error(e.to_string()),
        }
    }
}

impl Component for GameView {
    fn render(&self, engine: &dyn GameEngine, area: Rect, buf: &mut Buffer) {
        if self.show_statistics {
            self.statistics.render(engine, area, buf);
            return;
        }

        let round = engine.round();
        let (mut body, legend_area) = split_legend(area);

        let mut lines = vec![self.header(engine), Line::default()];
        if let Some(round) = &round {
            lines.push(Self::attempts(engine, round));
            lines.push(Line::default());
            lines.push(Self::word(round));
            lines.push(Line::default());
            lines.push(Self::hint(round));
            lines.push(Line::default());
            lines.extend(Self::letters(engine, round, body.width));
            lines.push(Line::default());
            lines.push(Self::helpers(round));
            lines.push(Line::default());
        }
        let board = take_rows(&mut body, lines.len() as u16);
        Paragraph::new(lines).render(board, buf);

        self.render_messages(round.as_ref(), body, buf);
        Self::legend(engine, round.as_ref()).render(legend_area, buf);
    }

    fn update(&mut self, engine: &mut dyn GameEngine, key: &KeyEvent) {
        // Each action starts a new batch of feedback.
        self.messages.drain_and_clear();

        if let Some(c) = ctrl_char(key) {
            self.on_ctrl(engine, c);
            return;
        }

        if self.show_statistics {
            if plain_char(key) == Some('b') || key.code == KeyCode::Backspace {
                self.show_statistics = false;
            }
            return;
        }

        match key.code {
            KeyCode::Enter => {
                if engine.round().is_some_and(|round| round.is_finished()) {
                    if let Err(e) = engine.next() {
                        self.messages.error(e.to_string());
                    }
                }
                return;
            }
            KeyCode::Backspace => {
                engine.finish();
                self.done = true;
                return;
            }
            _ => {}
        }

        if let Some(kind) = plain_char(key).and_then(HelperKind::from_key) {
            self.on_helper(engine, kind);
            return;
        }

        if engine.status() == Some(GameStatus::Playing) {
            self.on_letter(engine, key);
        }
    }

    fn is_done(&self) -> bool {
        self.done
    }
}
