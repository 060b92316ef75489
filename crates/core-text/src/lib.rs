//! Line-oriented document storage.
//!
//! A document is an ordered `Vec<Line>` where every line exclusively owns its
//! bytes. Line bytes include the terminating `\n` except possibly for the final
//! line of the document, so concatenating every line reproduces the source file
//! byte-for-byte.
//!
//! Invariants:
//! * `Line::len() == Line::as_bytes().len()`.
//! * Only the last line of a document may lack a terminator (mutations never
//!   introduce an unterminated line anywhere else).
//! * Every mutation validates its indices first and either applies completely
//!   or returns a `TextError` leaving the buffer untouched.
//!
//! Line indices are stable only until the next structural mutation
//! (`split_at`, `join_with_next`); callers re-resolve after editing.

pub mod column;
mod error;

pub use column::ColumnMapper;
pub use error::TextError;

/// Line terminator byte.
pub const NEWLINE: u8 = b'\n';

/// A single document line. Bytes include the trailing newline when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    bytes: Vec<u8>,
}

impl Line {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Raw bytes including the terminator (if any).
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Byte count including the terminator.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn has_terminator(&self) -> bool {
        self.bytes.last() == Some(&NEWLINE)
    }

    /// Navigable content: the line without its terminator.
    pub fn content(&self) -> &[u8] {
        match self.bytes.split_last() {
            Some((&NEWLINE, rest)) => rest,
            _ => &self.bytes,
        }
    }

    /// Byte length of `content()`.
    pub fn content_len(&self) -> usize {
        self.content().len()
    }
}

/// A position inside a buffer expressed as (line index, byte offset within that line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub byte: usize,
}

impl Position {
    pub fn new(line: usize, byte: usize) -> Self {
        Self { line, byte }
    }
    pub fn origin() -> Self {
        Self { line: 0, byte: 0 }
    }
}

/// Ordered, mutable sequence of lines. Owns all document memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<Line>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a buffer from pre-split records (each one line including its terminator).
    pub fn from_records<I, R>(records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Vec<u8>>,
    {
        let mut buf = Self::new();
        for record in records {
            buf.append(record);
        }
        buf
    }

    /// Append a new line at the end. Used while loading.
    pub fn append(&mut self, bytes: impl Into<Vec<u8>>) {
        self.lines.push(Line::new(bytes));
    }

    /// Number of lines.
    pub fn count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Read view of line `index`.
    pub fn line_at(&self, index: usize) -> Result<&Line, TextError> {
        self.lines.get(index).ok_or(TextError::LineOutOfRange {
            index,
            count: self.lines.len(),
        })
    }

    /// Ordered read-only iteration used by the save path.
    pub fn lines(&self) -> impl ExactSizeIterator<Item = &Line> + '_ {
        self.lines.iter()
    }

    /// Total byte size of the document.
    pub fn byte_len(&self) -> usize {
        self.lines.iter().map(Line::len).sum()
    }

    fn check_offset(&self, index: usize, offset: usize) -> Result<&Line, TextError> {
        let line = self.line_at(index)?;
        let len = line.content_len();
        if offset > len {
            return Err(TextError::OffsetOutOfRange {
                line: index,
                offset,
                len,
            });
        }
        Ok(line)
    }

    /// Split line `index` at `byte_offset`.
    ///
    /// The first half keeps `[0, byte_offset)` plus a synthesized newline; the
    /// second half receives `[byte_offset, len)` unchanged (including the
    /// original terminator, if there was one) and is inserted right after.
    pub fn split_at(&mut self, index: usize, byte_offset: usize) -> Result<(), TextError> {
        self.check_offset(index, byte_offset)?;
        let line = &mut self.lines[index];
        let tail = line.bytes.split_off(byte_offset);
        line.bytes.push(NEWLINE);
        self.lines.insert(index + 1, Line::new(tail));
        tracing::trace!(target: "text", index, byte_offset, count = self.lines.len(), "split_at");
        Ok(())
    }

    /// Insert a single byte into line `index` at `byte_offset` (within content).
    pub fn insert_byte(&mut self, index: usize, byte_offset: usize, byte: u8) -> Result<(), TextError> {
        self.check_offset(index, byte_offset)?;
        self.lines[index].bytes.insert(byte_offset, byte);
        Ok(())
    }

    /// Remove the content byte at `byte_offset`. The terminator cannot be removed here.
    pub fn remove_byte(&mut self, index: usize, byte_offset: usize) -> Result<u8, TextError> {
        let line = self.line_at(index)?;
        let len = line.content_len();
        if byte_offset >= len {
            return Err(TextError::OffsetOutOfRange {
                line: index,
                offset: byte_offset,
                len,
            });
        }
        Ok(self.lines[index].bytes.remove(byte_offset))
    }

    /// Merge line `index + 1` into line `index`, dropping `index`'s terminator.
    /// Returns the byte offset of the join point.
    pub fn join_with_next(&mut self, index: usize) -> Result<usize, TextError> {
        self.line_at(index + 1)?;
        let next = self.lines.remove(index + 1);
        let line = &mut self.lines[index];
        let join = line.content_len();
        line.bytes.truncate(join);
        line.bytes.extend_from_slice(&next.bytes);
        tracing::trace!(target: "text", index, join, count = self.lines.len(), "join_with_next");
        Ok(join)
    }
}
