//! Small predicates over crossterm key events shared by the views.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// The reserved quit combination: `ctrl+c` or `escape`.
pub fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc || ctrl_char(key) == Some('c')
}

pub fn is_press(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
}

/// Lower-cased character of a `ctrl+<char>` combination.
pub fn ctrl_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            c.to_lowercase().next()
        }
        _ => None,
    }
}

/// Lower-cased character typed without control or alt held.
pub fn plain_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            c.to_lowercase().next()
        }
        _ => None,
    }
}

#[cfg(test)]
pub(crate) fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[cfg(test)]
pub(crate) fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}
