use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyOption {
    pub key: String,
    pub text: String,
}

/// A row of `key: action` hints drawn at the bottom of a view.
///
/// Views build a fresh legend on every render so entries never go stale.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KeyLegend {
    options: Vec<KeyOption>,
}

impl KeyLegend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_option(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.options.push(KeyOption {
            key: key.into(),
            text: text.into(),
        });
    }

    pub fn options(&self) -> &[KeyOption] {
        &self.options
    }

    /// Spans for the options that fit in `width` columns, in insertion order.
    pub fn line(&self, width: u16) -> Line<'static> {
        let key_style = Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD);
        let text_style = Style::default().fg(Color::DarkGray).bg(Color::White);

        let mut used = 0usize;
        let mut spans = Vec::new();
        for option in &self.options {
            let key = format!("{}:", option.key);
            let text = format!(" {} ", option.text);
            let cost = key.width() + text.width() + 2;
            if used + cost > width as usize {
                break;
            }
            used += cost;
            spans.push(Span::styled(key, key_style));
            spans.push(Span::styled(text, text_style));
            spans.push(Span::raw("  "));
        }
        Line::from(spans)
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.line(area.width)).render(area, buf);
    }
}
