pub mod categories;
pub mod difficulty;
pub mod game;
pub mod language;
pub mod legend;
pub mod messages;
pub mod screen;
pub mod setup;
pub mod statistics;
pub mod title;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub use screen::{ActiveView, Component};

fn bold_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn label_style() -> Style {
    Style::default().fg(Color::Yellow)
}

fn value_style() -> Style {
    Style::default().patch(bold_style()).fg(Color::Green)
}

fn dim_style() -> Style {
    Style::default().fg(Color::Gray).add_modifier(Modifier::DIM)
}

fn prompt_style() -> Style {
    Style::default().fg(Color::Magenta)
}

/// Spaced-out heading on a coloured background, e.g. " S T A T S ".
fn banner(text: &str, bg: Color) -> Span<'static> {
    Span::styled(
        format!(" {text} "),
        Style::default()
            .patch(bold_style())
            .fg(Color::Black)
            .bg(bg),
    )
}

/// Splits `area` into a body and the bottom row reserved for the key legend.
fn split_legend(area: Rect) -> (Rect, Rect) {
    if area.height == 0 {
        return (area, area);
    }
    let body = Rect {
        height: area.height - 1,
        ..area
    };
    let legend = Rect {
        y: area.y + area.height - 1,
        height: 1,
        ..area
    };
    (body, legend)
}

/// Carves `height` rows off the top of `area`, clipped to what is left.
pub(crate) fn take_rows(area: &mut Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    let taken = Rect { height, ..*area };
    area.y += height;
    area.height -= height;
    taken
}

pub fn render_farewell(area: Rect, buf: &mut Buffer) {
    let farewell = Paragraph::new(Line::from(Span::styled(
        " Leaving...",
        Style::default()
            .patch(bold_style())
            .fg(Color::Magenta)
            .add_modifier(Modifier::ITALIC),
    )))
    .alignment(Alignment::Left);
    farewell.render(area, buf);
}

#[cfg(test)]
pub(crate) fn buffer_text(buf: &Buffer) -> String {
    let area = buf.area();
    (area.y..area.y + area.height)
        .map(|y| {
            (area.x..area.x + area.width)
                .map(|x| buf[(x, y)].symbol())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
