use crossterm::event::KeyEvent;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::legend::KeyLegend;
use super::{banner, dim_style, label_style, split_legend, value_style, Component};
use crate::engine::{GameEngine, HelperKind, Statistics};

/// Read-only overlay over the engine's statistics. The owning view decides
/// when it is shown and which keys dismiss it.
#[derive(Debug, Default)]
pub struct StatisticsPane;

fn row(label: &str, value: u64) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label:<26}"), label_style()),
        Span::styled(value.to_string(), value_style()),
    ])
}

fn statistics_lines(stats: &Statistics) -> Vec<Line<'static>> {
    let mut lines = vec![
        row("Rounds", stats.rounds),
        row("Wins", stats.wins),
        row("Lost", stats.lost),
        row("Consecutive wins", stats.consecutive_wins),
        row("Best streak", stats.highest_consecutive_wins),
        row("Correct letters", stats.correct_letter_count),
        row("Wrong letters", stats.wrong_letter_count),
        row("Rounds without mistakes", stats.no_wrong_letters_count),
        Line::default(),
        Line::from(Span::styled("  Helpers used", dim_style())),
    ];
    lines.extend(
        HelperKind::ALL
            .into_iter()
            .map(|kind| row(&format!("  {kind}"), stats.helper_count(kind))),
    );
    lines
}

impl Component for StatisticsPane {
    fn render(&self, engine: &dyn GameEngine, area: Rect, buf: &mut Buffer) {
        let (body, legend_area) = split_legend(area);

        let mut lines = vec![
            Line::from(banner("S T A T I S T I C S", Color::LightCyan)),
            Line::default(),
        ];
        match engine.statistics() {
            Some(stats) => lines.extend(statistics_lines(stats)),
            None => lines.push(Line::from(Span::styled("  No statistics", dim_style()))),
        }
        Paragraph::new(lines).render(body, buf);

        let mut legend = KeyLegend::new();
        legend.add_option("CTRL+B", "Back");
        legend.render(legend_area, buf);
    }

    fn update(&mut self, _engine: &mut dyn GameEngine, _key: &KeyEvent) {}

    fn is_done(&self) -> bool {
        true
    }
}
