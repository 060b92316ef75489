//! Frame assembly for the editor session.
//!
//! Two paths:
//! * Full: every text row is cleared and repainted, then the status row.
//!   Used whenever the session reports its visible region dirty (edits,
//!   scrolls, pans, resizes, load).
//! * Cursor-only: the text area is left alone; the status row is repainted
//!   when its contents changed, then the terminal cursor is repositioned.
//!
//! The engine never mutates the session. Frames are built into a `Writer`
//! first (`frame_full` / `frame_cursor_only`) so the emitted command stream
//! can be inspected without a terminal.

use crate::status::{StatusLine, build_status};
use crate::writer::Writer;
use anyhow::Result;
use core_state::{EditorSession, Mode};
use core_text::{ColumnMapper, Line};
use std::io::Write;

/// Filler shown on rows past the end of the document.
pub const FILLER: &str = "~";

/// Glyph for bytes that have no single-cell printable form.
pub const REPLACEMENT: char = '?';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub full_frames: u64,
    pub cursor_only_frames: u64,
    pub status_skipped: u64,
}

pub struct RenderEngine {
    status_enabled: bool,
    prev_status: Option<String>,
    stats: FrameStats,
}

impl RenderEngine {
    pub fn new(status_enabled: bool) -> Self {
        Self {
            status_enabled,
            prev_status: None,
            stats: FrameStats::default(),
        }
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Build the command stream for a full repaint.
    pub fn frame_full(&mut self, session: &EditorSession) -> Writer {
        let mut w = Writer::new();
        w.hide_cursor();
        for (y, row) in build_rows(session).into_iter().enumerate() {
            w.clear_row(to_u16(y));
            w.print(row);
        }
        let status = self.status_enabled.then(|| status_for(session));
        if let Some(status) = &status {
            self.paint_status(&mut w, session, status);
        }
        place_cursor(&mut w, session, status.as_ref());
        w.show_cursor();
        self.stats.full_frames += 1;
        w
    }

    /// Build the command stream for a cursor-only update.
    pub fn frame_cursor_only(&mut self, session: &EditorSession) -> Writer {
        let mut w = Writer::new();
        let status = self.status_enabled.then(|| status_for(session));
        if let Some(status) = &status {
            if self.prev_status.as_deref() == Some(status.text.as_str()) {
                self.stats.status_skipped += 1;
            } else {
                self.paint_status(&mut w, session, status);
            }
        }
        place_cursor(&mut w, session, status.as_ref());
        self.stats.cursor_only_frames += 1;
        w
    }

    pub fn render_full<W: Write>(&mut self, session: &EditorSession, out: &mut W) -> Result<()> {
        let prints = self.frame_full(session).flush_to(out)?;
        tracing::trace!(
            target: "render.engine",
            rows = session.viewport().height(),
            prints,
            line_offset = session.viewport().line_offset(),
            column_offset = session.viewport().column_offset(),
            "render_full"
        );
        Ok(())
    }

    pub fn render_cursor_only<W: Write>(
        &mut self,
        session: &EditorSession,
        out: &mut W,
    ) -> Result<()> {
        let prints = self.frame_cursor_only(session).flush_to(out)?;
        tracing::trace!(target: "render.engine", prints, "render_cursor_only");
        Ok(())
    }

    fn paint_status(&mut self, w: &mut Writer, session: &EditorSession, status: &StatusLine) {
        w.clear_row(status_row(session));
        w.print(status.text.clone());
        self.prev_status = Some(status.text.clone());
    }
}

fn status_for(session: &EditorSession) -> StatusLine {
    build_status(session, session.viewport().width())
}

fn status_row(session: &EditorSession) -> u16 {
    to_u16(session.viewport().height())
}

fn place_cursor(w: &mut Writer, session: &EditorSession, status: Option<&StatusLine>) {
    let command_cursor = match session.mode() {
        Mode::Command(_) => status.and_then(|s| s.command_cursor),
        Mode::Editor => None,
    };
    match command_cursor {
        Some(x) => w.move_to(to_u16(x), status_row(session)),
        None => {
            let cursor = session.cursor();
            w.move_to(to_u16(cursor.col()), to_u16(cursor.row()));
        }
    }
}

fn to_u16(v: usize) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}

/// Text rows for the current viewport: one string per screen row, filler
/// past the end of the document.
pub fn build_rows(session: &EditorSession) -> Vec<String> {
    let vp = session.viewport();
    let buffer = session.buffer();
    (0..vp.height())
        .map(|y| match buffer.line_at(vp.line_offset() + y) {
            Ok(line) => render_line(line, session.mapper(), vp.column_offset(), vp.width()),
            Err(_) => FILLER.to_string(),
        })
        .collect()
}

/// Render one line starting at visual column `column_offset`, clipped to
/// `width` cells.
///
/// Tabs expand to spaces up to the next tab stop; a tab straddling the left
/// edge contributes only its visible remainder. Bytes outside printable ASCII
/// occupy one cell and render as `?`.
pub fn render_line(line: &Line, mapper: ColumnMapper, column_offset: usize, width: usize) -> String {
    let end = column_offset + width;
    let mut out = String::with_capacity(width);
    let mut col = 0;
    for &b in line.content() {
        if col >= end {
            break;
        }
        let next = mapper.advance(col, b);
        if next > column_offset {
            if b == b'\t' {
                let visible = next.min(end) - col.max(column_offset);
                out.extend(std::iter::repeat_n(' ', visible));
            } else if b == b' ' || b.is_ascii_graphic() {
                out.push(char::from(b));
            } else {
                out.push(REPLACEMENT);
            }
        }
        col = next;
    }
    out
}
