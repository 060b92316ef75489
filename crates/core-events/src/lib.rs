//! Logical input events consumed by the dispatcher.
//!
//! The set is closed: the input layer maps every terminal event it cares about
//! onto one of these variants and drops everything else, so the dispatcher can
//! match exhaustively. Each event is processed to completion before the next
//! one is read.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    PageUp,
    PageDown,
    Enter,
    /// Printable ASCII byte or tab.
    PrintableChar(u8),
    Backspace,
    Escape,
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
    Save,
    Quit,
}

impl Event {
    /// Stable variant name for logs. Never includes typed bytes.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::MoveUp => "MoveUp",
            Event::MoveDown => "MoveDown",
            Event::MoveLeft => "MoveLeft",
            Event::MoveRight => "MoveRight",
            Event::PageUp => "PageUp",
            Event::PageDown => "PageDown",
            Event::Enter => "Enter",
            Event::PrintableChar(_) => "PrintableChar",
            Event::Backspace => "Backspace",
            Event::Escape => "Escape",
            Event::Resize(..) => "Resize",
            Event::Save => "Save",
            Event::Quit => "Quit",
        }
    }

    pub fn is_motion(&self) -> bool {
        matches!(
            self,
            Event::MoveUp | Event::MoveDown | Event::MoveLeft | Event::MoveRight
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Resize(w, h) => write!(f, "Resize({w}x{h})"),
            other => f.write_str(other.kind()),
        }
    }
}
