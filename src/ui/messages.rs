use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
}

impl MessageKind {
    fn style(self) -> Style {
        let fg = match self {
            MessageKind::Info => Color::Cyan,
            MessageKind::Success => Color::Green,
            MessageKind::Warning => Color::Yellow,
            MessageKind::Error => Color::Red,
        };
        Style::default().fg(fg)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

/// Transient feedback for the current batch of actions.
#[derive(Debug, Default)]
pub struct MessageQueue {
    items: Vec<Message>,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: MessageKind, text: impl Into<String>) {
        self.items.push(Message {
            kind,
            text: text.into(),
        });
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(MessageKind::Info, text);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(MessageKind::Success, text);
    }

    pub fn warn(&mut self, text: impl Into<String>) {
        self.push(MessageKind::Warning, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(MessageKind::Error, text);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Takes every pending message, leaving the queue empty.
    pub fn drain_and_clear(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.items)
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let lines: Vec<Line> = self
            .items
            .iter()
            .map(|m| Line::from(Span::styled(format!("» {}", m.text), m.kind.style())))
            .collect();
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::buffer_text;

    #[test]
    fn drain_empties_queue_in_order() {
        let mut queue = MessageQueue::new();
        queue.info("one");
        queue.error("two");
        assert_eq!(queue.len(), 2);

        let drained = queue.drain_and_clear();
        assert!(queue.is_empty());
        assert_eq!(
            drained,
            vec![
                Message {
                    kind: MessageKind::Info,
                    text: "one".into()
                },
                Message {
                    kind: MessageKind::Error,
                    text: "two".into()
                },
            ]
        );
    }

    #[test]
    fn renders_each_message_on_its_own_line() {
        let mut queue = MessageQueue::new();
        queue.success("hit");
        queue.warn("careful");
        let area = Rect::new(0, 0, 20, 2);
        let mut buf = Buffer::empty(area);
        queue.render(area, &mut buf);
        let text = buffer_text(&buf);
        let rows: Vec<_> = text.lines().collect();
        assert!(rows[0].starts_with("» hit"));
        assert!(rows[1].starts_with("» careful"));
    }
}
