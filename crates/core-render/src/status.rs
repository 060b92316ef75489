//! Status row composition.
//!
//! Format: `[MODE] <name>[*] Ln X, Col Y` followed by ` :<command>` in Command
//! mode and ` | <message>` when a status message is set.
//! * `<name>` is the base file name, or `[No Name]`.
//! * `*` appears when the document has unsaved edits.
//! * Line and column are 1-based; the column is the visual column.
//!
//! Composition is two-stage: `compose_status` produces ordered segments,
//! `format_status` renders them into a single row clipped to the terminal
//! width. Characters outside printable ASCII are shown as `?` so the string
//! length equals its width in cells.

use core_state::{EditorSession, Mode};
use std::borrow::Cow;
use std::fmt::Write as _;
use std::path::Path;

pub struct StatusContext<'a> {
    pub mode: &'a Mode,
    pub line: usize, // 0-based
    pub col: usize,  // 0-based visual column
    pub file_name: Option<&'a Path>,
    pub modified: bool,
    pub message: Option<&'a str>,
}

impl<'a> StatusContext<'a> {
    pub fn from_session(session: &'a EditorSession) -> Self {
        Self {
            mode: session.mode(),
            line: session.logical_position().line,
            col: session.logical_column(),
            file_name: session.file_name(),
            modified: session.is_modified(),
            message: session.status(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment<'a> {
    Mode(&'static str),
    FileName { name: Cow<'a, str>, modified: bool },
    Position { line_1: usize, col_1: usize },
    Command(&'a str),
    Message(&'a str),
}

/// A formatted status row. `command_cursor` is the cell just after the
/// command text when a command line is being typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub command_cursor: Option<usize>,
}

pub fn compose_status<'a>(ctx: &StatusContext<'a>) -> Vec<StatusSegment<'a>> {
    let name: Cow<'a, str> = match ctx.file_name {
        Some(p) => p
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or(Cow::Borrowed("[No Name]")),
        None => Cow::Borrowed("[No Name]"),
    };
    let mut out = Vec::with_capacity(5);
    out.push(StatusSegment::Mode(ctx.mode.label()));
    out.push(StatusSegment::FileName {
        name,
        modified: ctx.modified,
    });
    out.push(StatusSegment::Position {
        line_1: ctx.line + 1,
        col_1: ctx.col + 1,
    });
    if let Mode::Command(cmd) = ctx.mode {
        out.push(StatusSegment::Command(cmd));
    }
    if let Some(msg) = ctx.message {
        out.push(StatusSegment::Message(msg));
    }
    out
}

pub fn format_status(segments: &[StatusSegment<'_>], width: usize) -> StatusLine {
    let mut s = String::with_capacity(64);
    let mut command_cursor = None;
    for seg in segments {
        match seg {
            StatusSegment::Mode(m) => {
                let _ = write!(s, "[{m}]");
            }
            StatusSegment::FileName { name, modified } => {
                s.push(' ');
                push_sanitized(&mut s, name);
                if *modified {
                    s.push('*');
                }
            }
            StatusSegment::Position { line_1, col_1 } => {
                let _ = write!(s, " Ln {line_1}, Col {col_1}");
            }
            StatusSegment::Command(cmd) => {
                s.push_str(" :");
                push_sanitized(&mut s, cmd);
                command_cursor = Some(s.len());
            }
            StatusSegment::Message(msg) => {
                s.push_str(" | ");
                push_sanitized(&mut s, msg);
            }
        }
    }
    // Sanitized text is pure ASCII, so byte length == cell count.
    s.truncate(width);
    StatusLine {
        text: s,
        command_cursor: command_cursor.map(|c| c.min(width.saturating_sub(1))),
    }
}

pub fn build_status(session: &EditorSession, width: usize) -> StatusLine {
    format_status(&compose_status(&StatusContext::from_session(session)), width)
}

fn push_sanitized(out: &mut String, text: &str) {
    out.extend(text.chars().map(|c| {
        if c == ' ' || c.is_ascii_graphic() {
            c
        } else {
            '?'
        }
    }));
}
