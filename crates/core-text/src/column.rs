//! Byte offset <-> visual column translation for a single line.
//!
//! Every byte other than a tab occupies exactly one column; a tab advances to
//! the next multiple of the tab stop. The line terminator is not navigable and
//! contributes no width.
//!
//! Both directions round down: a column that falls inside a tab's span maps to
//! the tab's byte offset, and mapping that offset back yields the column where
//! the tab starts. So `column_for_byte(l, byte_for_column(l, c)) <= c` always
//! holds, with equality whenever `c` sits on a cell boundary.

use crate::Line;

pub const DEFAULT_TAB_STOP: usize = 2;

const TAB: u8 = b'\t';

/// Stateless column mapper parameterized by the tab stop width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapper {
    tab_stop: usize,
}

impl Default for ColumnMapper {
    fn default() -> Self {
        Self::new(DEFAULT_TAB_STOP)
    }
}

impl ColumnMapper {
    /// A zero tab stop is clamped to 1.
    pub const fn new(tab_stop: usize) -> Self {
        Self {
            tab_stop: if tab_stop == 0 { 1 } else { tab_stop },
        }
    }

    pub const fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    /// First tab stop strictly after `col`.
    pub const fn next_tab_stop(&self, col: usize) -> usize {
        (col / self.tab_stop + 1) * self.tab_stop
    }

    /// Column reached after drawing `byte` starting at `col`.
    #[inline]
    pub const fn advance(&self, col: usize, byte: u8) -> usize {
        if byte == TAB {
            self.next_tab_stop(col)
        } else {
            col + 1
        }
    }

    /// Visual column of `byte_offset` within `content` (terminator already stripped).
    pub fn column_for_offset(&self, content: &[u8], byte_offset: usize) -> usize {
        let end = byte_offset.min(content.len());
        content[..end]
            .iter()
            .fold(0, |col, &b| self.advance(col, b))
    }

    /// Byte offset of the cell containing `column`, or the content length when
    /// `column` is at or past the visual width.
    pub fn offset_for_column(&self, content: &[u8], column: usize) -> usize {
        let mut col = 0;
        for (i, &b) in content.iter().enumerate() {
            let next = self.advance(col, b);
            if column < next {
                return i;
            }
            col = next;
        }
        content.len()
    }

    /// Visual column for a byte offset on `line`.
    pub fn column_for_byte(&self, line: &Line, byte_offset: usize) -> usize {
        self.column_for_offset(line.content(), byte_offset)
    }

    /// Byte offset for a visual column on `line` (rounding down inside tabs).
    pub fn byte_for_column(&self, line: &Line, column: usize) -> usize {
        self.offset_for_column(line.content(), column)
    }

    /// Visual width of the navigable content; also the end-of-line column.
    pub fn width(&self, line: &Line) -> usize {
        self.column_for_offset(line.content(), usize::MAX)
    }

    /// Nearest real cell boundary at or before `column`, clamped to the line width.
    pub fn snap(&self, line: &Line, column: usize) -> usize {
        self.column_for_byte(line, self.byte_for_column(line, column))
    }

    /// Boundary one cell to the right of `column`, or `None` at end of content.
    /// A tab is crossed in a single step.
    pub fn next_boundary(&self, line: &Line, column: usize) -> Option<usize> {
        let content = line.content();
        let byte = self.offset_for_column(content, column);
        if byte >= content.len() {
            return None;
        }
        Some(self.column_for_offset(content, byte + 1))
    }

    /// Boundary one cell to the left of `column`, or `None` at column 0.
    pub fn prev_boundary(&self, line: &Line, column: usize) -> Option<usize> {
        let content = line.content();
        let byte = self.offset_for_column(content, column);
        if byte == 0 {
            return None;
        }
        Some(self.column_for_offset(content, byte - 1))
    }
}
