//! Editor session: the single owned value the event loop mutates.
//!
//! `EditorSession` aggregates the document (`LineBuffer`), the column mapper,
//! the viewport and the cursor, plus the editor mode, the status message and
//! two flags:
//! * `dirty`: the visible region changed and the next frame must be a full
//!   repaint. Set by edits, scrolls, pans and resizes; cleared by the loop
//!   after painting.
//! * `modified`: the document differs from what was last loaded or saved.
//!
//! Every operation either applies completely or leaves the session as it was.
//! Index errors coming back from `core-text` are contract violations here (the
//! session only ever passes positions it derived from its own state): they
//! trip a `debug_assert!` and in release builds are logged on target `state`
//! with the session left unchanged.
//!
//! Logged fields never include document bytes; only lengths, indices and counts.

use core_model::{Cursor, Viewport};
use core_text::{ColumnMapper, LineBuffer, Position, TextError};
use std::path::{Path, PathBuf};
use tracing::{debug, error, trace};

/// Current editor mode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    /// Navigation and text entry.
    #[default]
    Editor,
    /// Collecting a command line (the partially typed text).
    Command(String),
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Editor => "EDITOR",
            Mode::Command(_) => "COMMAND",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Bytes accepted by `insert_byte`: printable ASCII and tab.
pub fn is_insertable(byte: u8) -> bool {
    byte == b'\t' || (0x20..=0x7e).contains(&byte)
}

pub struct EditorSession {
    buffer: LineBuffer,
    mapper: ColumnMapper,
    viewport: Viewport,
    cursor: Cursor,
    mode: Mode,
    file_name: Option<PathBuf>,
    status: Option<String>,
    dirty: bool,
    modified: bool,
}

impl EditorSession {
    /// Empty session (one empty line) sized to a `width` x `height` text area.
    pub fn new(mapper: ColumnMapper, width: usize, height: usize) -> Self {
        let mut buffer = LineBuffer::new();
        buffer.append(Vec::new());
        Self {
            buffer,
            mapper,
            viewport: Viewport::new(width, height),
            cursor: Cursor::new(),
            mode: Mode::Editor,
            file_name: None,
            status: None,
            dirty: true,
            modified: false,
        }
    }

    pub fn with_file_name(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_name = Some(path.into());
        self
    }

    /// Replace the document with `records`, one line each, bytes unmodified.
    /// An empty record stream yields a single empty, unterminated line.
    pub fn load_into<I, R>(&mut self, records: I)
    where
        I: IntoIterator<Item = R>,
        R: Into<Vec<u8>>,
    {
        let mut buffer = LineBuffer::from_records(records);
        if buffer.is_empty() {
            buffer.append(Vec::new());
        }
        debug!(
            target: "state",
            lines = buffer.count(),
            bytes = buffer.byte_len(),
            "load_into"
        );
        self.buffer = buffer;
        self.cursor = Cursor::new();
        let (width, height) = (self.viewport.width(), self.viewport.height());
        self.viewport = Viewport::new(width, height);
        self.mode = Mode::Editor;
        self.modified = false;
        self.dirty = true;
    }

    // --- accessors -------------------------------------------------------

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn mapper(&self) -> ColumnMapper {
        self.mapper
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Logical (line, byte) under the cursor.
    pub fn logical_position(&self) -> Position {
        self.cursor
            .position(&self.buffer, self.mapper, &self.viewport)
    }

    pub fn cursor_byte_offset(&self) -> usize {
        self.logical_position().byte
    }

    /// Logical visual column of the cursor.
    pub fn logical_column(&self) -> usize {
        self.cursor.logical_column(&self.viewport)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// True when there are edits not yet written to disk.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    // --- motion ----------------------------------------------------------

    pub fn move_up(&mut self) {
        let changed = self
            .cursor
            .move_vertical(-1, &self.buffer, self.mapper, &mut self.viewport);
        self.dirty |= changed;
    }

    pub fn move_down(&mut self) {
        let changed = self
            .cursor
            .move_vertical(1, &self.buffer, self.mapper, &mut self.viewport);
        self.dirty |= changed;
    }

    pub fn move_left(&mut self) {
        let changed = self
            .cursor
            .move_horizontal(-1, &self.buffer, self.mapper, &mut self.viewport);
        self.dirty |= changed;
    }

    pub fn move_right(&mut self) {
        let changed = self
            .cursor
            .move_horizontal(1, &self.buffer, self.mapper, &mut self.viewport);
        self.dirty |= changed;
    }

    /// Scroll half a screen (at least one line). The cursor keeps its screen
    /// row when that row still names a document line and re-snaps its column
    /// to the target column.
    pub fn handle_scroll_page(&mut self, direction: ScrollDirection) {
        let half = (self.viewport.height() / 2).max(1) as isize;
        let amount = match direction {
            ScrollDirection::Up => -half,
            ScrollDirection::Down => half,
        };
        let outcome = self.viewport.scroll_by(amount, self.buffer.count());
        let followed = self
            .cursor
            .follow_scroll(&self.buffer, self.mapper, &mut self.viewport);
        debug!(
            target: "state",
            ?direction,
            amount,
            line_offset = self.viewport.line_offset(),
            clamp = ?outcome.clamp,
            "scroll_page"
        );
        self.dirty |= outcome.changed || followed;
    }

    /// New terminal text area dimensions. Keeps the logical cursor position and
    /// the target column; always forces a full repaint.
    pub fn resize(&mut self, width: usize, height: usize) {
        let resized = self.viewport.resize(width, height);
        let moved = self.cursor.reconcile(&self.buffer, &mut self.viewport);
        debug!(
            target: "state",
            width = self.viewport.width(),
            height = self.viewport.height(),
            resized,
            moved,
            "resize"
        );
        self.dirty = true;
    }

    // --- editing ---------------------------------------------------------

    /// Split the current line at the cursor; the cursor moves to the start of
    /// the new line and the horizontal offset resets to 0.
    pub fn insert_line_break_at_cursor(&mut self) {
        let pos = self.logical_position();
        if contract(self.buffer.split_at(pos.line, pos.byte), "split_at").is_none() {
            return;
        }
        self.cursor.jump_to(pos.line + 1, 0, &mut self.viewport);
        debug!(target: "state", line = pos.line, byte = pos.byte, "line_break");
        self.note_edit();
    }

    /// Insert `byte` before the cursor and advance past it. Bytes other than
    /// printable ASCII and tab are ignored (returns false).
    pub fn insert_byte(&mut self, byte: u8) -> bool {
        if !is_insertable(byte) {
            trace!(target: "state", byte, "insert_byte ignored");
            return false;
        }
        let pos = self.logical_position();
        if contract(self.buffer.insert_byte(pos.line, pos.byte, byte), "insert_byte").is_none() {
            return false;
        }
        let column = self.column_of(Position::new(pos.line, pos.byte + 1));
        self.cursor.jump_to(pos.line, column, &mut self.viewport);
        self.note_edit();
        true
    }

    /// Delete the byte before the cursor. At the start of a line other than
    /// the first, join the line onto the previous one and land on the join
    /// point. No-op at the very start of the document.
    pub fn delete_backward(&mut self) {
        let pos = self.logical_position();
        if pos.byte > 0 {
            if contract(self.buffer.remove_byte(pos.line, pos.byte - 1), "remove_byte").is_none() {
                return;
            }
            let column = self.column_of(Position::new(pos.line, pos.byte - 1));
            self.cursor.jump_to(pos.line, column, &mut self.viewport);
        } else if pos.line > 0 {
            let Some(join) = contract(self.buffer.join_with_next(pos.line - 1), "join_with_next")
            else {
                return;
            };
            let column = self.column_of(Position::new(pos.line - 1, join));
            self.cursor.jump_to(pos.line - 1, column, &mut self.viewport);
            debug!(target: "state", line = pos.line - 1, join, "join_lines");
        } else {
            return;
        }
        self.note_edit();
    }

    fn column_of(&self, pos: Position) -> usize {
        self.buffer
            .line_at(pos.line)
            .map(|line| self.mapper.column_for_byte(line, pos.byte))
            .unwrap_or(0)
    }

    fn note_edit(&mut self) {
        self.modified = true;
        self.dirty = true;
        self.status = None;
    }

    // --- command mode ----------------------------------------------------

    pub fn enter_command_mode(&mut self) {
        self.mode = Mode::Command(String::new());
        self.status = None;
        trace!(target: "state", "enter_command_mode");
    }

    /// Append a printable ASCII byte to the command line. Ignored in Editor mode.
    pub fn command_push(&mut self, byte: u8) {
        if let Mode::Command(line) = &mut self.mode
            && (0x20..=0x7e).contains(&byte)
        {
            line.push(char::from(byte));
        }
    }

    /// Remove the last command character; on an already empty command line
    /// leave Command mode.
    pub fn command_backspace(&mut self) {
        if let Mode::Command(line) = &mut self.mode
            && line.pop().is_none()
        {
            self.mode = Mode::Editor;
        }
    }

    pub fn cancel_command(&mut self) {
        if matches!(self.mode, Mode::Command(_)) {
            self.mode = Mode::Editor;
            trace!(target: "state", "cancel_command");
        }
    }

    /// Leave Command mode. Command execution is not supported: a non-empty
    /// command line produces a status message saying so.
    pub fn execute_command(&mut self) {
        let Mode::Command(line) = std::mem::take(&mut self.mode) else {
            return;
        };
        debug!(target: "state", len = line.len(), "execute_command");
        if !line.is_empty() {
            self.status = Some(format!("not supported: {line}"));
        }
    }
}

/// Unwrap a buffer result whose failure would mean the session computed an
/// out-of-range position.
fn contract<T>(result: Result<T, TextError>, op: &'static str) -> Option<T> {
    debug_assert!(result.is_ok(), "{op}: {:?}", result.as_ref().err());
    result
        .map_err(|err| error!(target: "state", op, %err, "buffer contract violation"))
        .ok()
}
