//! Terminal writer: batches primitive terminal operations for one frame and
//! emits them in a single flush.
//!
//! Invariants:
//! * Commands preserve ordering; nothing is written before `flush_to`.
//! * Positions are absolute with a (0,0) origin; callers ensure bounds.
//! * A `Writer` is a short-lived per-frame value.

use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveTo(u16, u16),
    /// Clear the row the cursor is on; always preceded by `MoveTo(0, y)`.
    ClearLine,
    Print(String),
    HideCursor,
    ShowCursor,
}

#[derive(Debug, Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }

    /// Move to the start of row `y` and clear it.
    pub fn clear_row(&mut self, y: u16) {
        self.cmds.push(Command::MoveTo(0, y));
        self.cmds.push(Command::ClearLine);
    }

    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::Print(s));
        }
    }

    pub fn hide_cursor(&mut self) {
        self.cmds.push(Command::HideCursor);
    }

    pub fn show_cursor(&mut self) {
        self.cmds.push(Command::ShowCursor);
    }

    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    /// Queue every command onto `out` and flush it. Returns the number of
    /// print commands emitted.
    pub fn flush_to<W: Write>(self, out: &mut W) -> Result<usize> {
        let mut prints = 0;
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => queue!(out, MoveTo(x, y))?,
                Command::ClearLine => queue!(out, Clear(ClearType::CurrentLine))?,
                Command::Print(s) => {
                    prints += 1;
                    queue!(out, Print(s))?
                }
                Command::HideCursor => queue!(out, Hide)?,
                Command::ShowCursor => queue!(out, Show)?,
            }
        }
        out.flush()?;
        Ok(prints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_prints_are_dropped() {
        let mut w = Writer::new();
        w.print("");
        w.print(String::new());
        assert!(w.commands().is_empty());
    }

    #[test]
    fn flush_emits_text_in_order() {
        let mut w = Writer::new();
        w.clear_row(3);
        w.print("abc");
        w.move_to(1, 3);
        w.print("z");
        let mut out = Vec::new();
        assert_eq!(w.flush_to(&mut out).unwrap(), 2);
        let text = String::from_utf8(out).unwrap();
        let a = text.find("abc").unwrap();
        let z = text.find('z').unwrap();
        assert!(a < z);
    }
}
