//! Cursor controller: screen-space cursor plus the sticky target column.
//!
//! The cursor lives in screen coordinates (`row`, `col`); logical coordinates
//! are derived from the viewport offsets. `target_column` is the visual column
//! vertical motion tries to reach. Horizontal moves and edits redefine it,
//! vertical moves only read it, which is what lets a cursor travel through
//! short lines and come back to its original column.
//!
//! All operations take the buffer, mapper and viewport explicitly and return
//! whether the viewport moved (the caller's repaint signal). Callers guarantee
//! the document has at least one line.

use crate::viewport::Viewport;
use core_text::{ColumnMapper, LineBuffer, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    row: usize,
    col: usize,
    target_column: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn target_column(&self) -> usize {
        self.target_column
    }

    pub fn logical_line(&self, viewport: &Viewport) -> usize {
        self.row + viewport.line_offset()
    }

    pub fn logical_column(&self, viewport: &Viewport) -> usize {
        self.col + viewport.column_offset()
    }

    /// Logical (line, byte) position of the cursor.
    pub fn position(
        &self,
        buffer: &LineBuffer,
        mapper: ColumnMapper,
        viewport: &Viewport,
    ) -> Position {
        let line = self.logical_line(viewport);
        let byte = buffer
            .line_at(line)
            .map(|l| mapper.byte_for_column(l, self.logical_column(viewport)))
            .unwrap_or(0);
        Position::new(line, byte)
    }

    /// Move `delta` lines up (negative) or down (positive), one line at a time.
    ///
    /// Moving up from the first document line or down from the last is a no-op.
    /// At the top/bottom screen row the viewport scrolls instead of the row
    /// changing. The landing column is `target_column` snapped to a real cell
    /// boundary of the destination line (its end when the line is shorter).
    pub fn move_vertical(
        &mut self,
        delta: isize,
        buffer: &LineBuffer,
        mapper: ColumnMapper,
        viewport: &mut Viewport,
    ) -> bool {
        let mut changed = false;
        for _ in 0..delta.unsigned_abs() {
            match self.step_vertical(delta < 0, buffer, mapper, viewport) {
                Some(scrolled) => changed |= scrolled,
                None => break,
            }
        }
        changed
    }

    fn step_vertical(
        &mut self,
        up: bool,
        buffer: &LineBuffer,
        mapper: ColumnMapper,
        viewport: &mut Viewport,
    ) -> Option<bool> {
        let count = buffer.count();
        let line = self.logical_line(viewport);
        if (up && line == 0) || (!up && line + 1 >= count) {
            return None;
        }
        let mut changed = false;
        if up {
            if self.row == 0 {
                changed |= viewport.scroll_by(-1, count).changed;
            } else {
                self.row -= 1;
            }
        } else if self.row + 1 >= viewport.height() {
            changed |= viewport.scroll_by(1, count).changed;
        } else {
            self.row += 1;
        }
        changed |= self.land_on_target(buffer, mapper, viewport);
        tracing::trace!(
            target: "model.cursor",
            up,
            to_line = self.logical_line(viewport),
            to_col = self.logical_column(viewport),
            target = self.target_column,
            "vertical"
        );
        Some(changed)
    }

    /// Resolve the column on the current line from `target_column` and pan so
    /// it is visible. Leaves `target_column` untouched.
    fn land_on_target(
        &mut self,
        buffer: &LineBuffer,
        mapper: ColumnMapper,
        viewport: &mut Viewport,
    ) -> bool {
        let landing = buffer
            .line_at(self.logical_line(viewport))
            .map(|l| mapper.snap(l, self.target_column))
            .unwrap_or(0);
        let changed = viewport.reveal_column(landing);
        self.col = landing - viewport.column_offset();
        changed
    }

    /// Move `delta` cells left (negative) or right (positive) within the line.
    ///
    /// A tab is crossed in a single step. There is no wraparound: at column 0
    /// moving left and at end of content moving right leave the cursor where it
    /// is. The target column is reset to the resulting column either way.
    pub fn move_horizontal(
        &mut self,
        delta: isize,
        buffer: &LineBuffer,
        mapper: ColumnMapper,
        viewport: &mut Viewport,
    ) -> bool {
        let Ok(line) = buffer.line_at(self.logical_line(viewport)) else {
            return false;
        };
        let mut column = self.logical_column(viewport);
        for _ in 0..delta.unsigned_abs() {
            let step = if delta < 0 {
                mapper.prev_boundary(line, column)
            } else {
                mapper.next_boundary(line, column)
            };
            match step {
                Some(next) => column = next,
                None => break,
            }
        }
        let changed = viewport.reveal_column(column);
        self.col = column - viewport.column_offset();
        self.target_column = column;
        changed
    }

    /// Place the cursor at a logical `(line, column)`, scrolling and panning
    /// minimally, and make `column` the new target. Used after edits.
    pub fn jump_to(&mut self, line: usize, column: usize, viewport: &mut Viewport) -> bool {
        let mut changed = viewport.reveal_line(line);
        self.row = line - viewport.line_offset();
        changed |= viewport.reveal_column(column);
        self.col = column - viewport.column_offset();
        self.target_column = column;
        changed
    }

    /// Keep the logical position visible after the viewport dimensions
    /// changed. Idempotent; `target_column` is not touched.
    pub fn reconcile(&mut self, buffer: &LineBuffer, viewport: &mut Viewport) -> bool {
        let last = buffer.count().saturating_sub(1);
        let line = self.logical_line(viewport).min(last);
        let column = self.logical_column(viewport);
        let mut changed = viewport.reveal_line(line);
        self.row = line - viewport.line_offset();
        changed |= viewport.reveal_column(column);
        self.col = column - viewport.column_offset();
        changed
    }

    /// Re-seat the cursor after the viewport scrolled underneath it.
    ///
    /// The screen row is kept when it still names a document line; otherwise
    /// it is clamped to the last line. The column is re-resolved from
    /// `target_column` exactly like a vertical move.
    pub fn follow_scroll(
        &mut self,
        buffer: &LineBuffer,
        mapper: ColumnMapper,
        viewport: &mut Viewport,
    ) -> bool {
        let last = buffer.count().saturating_sub(1);
        let mut changed = false;
        if viewport.line_offset() > last {
            changed |= viewport.set_line_offset(last);
        }
        let max_row = (viewport.height() - 1).min(last - viewport.line_offset());
        self.row = self.row.min(max_row);
        changed |= self.land_on_target(buffer, mapper, viewport);
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(lines: &[&str]) -> LineBuffer {
        LineBuffer::from_records(lines.iter().map(|l| l.as_bytes().to_vec()))
    }

    struct Fixture {
        buffer: LineBuffer,
        mapper: ColumnMapper,
        viewport: Viewport,
        cursor: Cursor,
    }

    impl Fixture {
        fn new(lines: &[&str], tab: usize, width: usize, height: usize) -> Self {
            Self {
                buffer: doc(lines),
                mapper: ColumnMapper::new(tab),
                viewport: Viewport::new(width, height),
                cursor: Cursor::new(),
            }
        }
        fn up(&mut self) -> bool {
            self.cursor
                .move_vertical(-1, &self.buffer, self.mapper, &mut self.viewport)
        }
        fn down(&mut self) -> bool {
            self.cursor
                .move_vertical(1, &self.buffer, self.mapper, &mut self.viewport)
        }
        fn left(&mut self) -> bool {
            self.cursor
                .move_horizontal(-1, &self.buffer, self.mapper, &mut self.viewport)
        }
        fn right(&mut self) -> bool {
            self.cursor
                .move_horizontal(1, &self.buffer, self.mapper, &mut self.viewport)
        }
        fn logical(&self) -> (usize, usize) {
            (
                self.cursor.logical_line(&self.viewport),
                self.cursor.logical_column(&self.viewport),
            )
        }
        fn byte(&self) -> usize {
            self.cursor
                .position(&self.buffer, self.mapper, &self.viewport)
                .byte
        }
    }

    #[test]
    fn tab_scenario_right_right_down() {
        let mut f = Fixture::new(&["a\tb\n", "cd\n"], 2, 80, 10);
        f.right();
        assert_eq!(f.logical(), (0, 1));
        assert_eq!(f.byte(), 1, "cursor sits on the tab");
        f.right();
        assert_eq!(f.logical(), (0, 2));
        assert_eq!(f.cursor.target_column(), 2);
        f.down();
        assert_eq!(f.logical(), (1, 2));
        assert_eq!(f.byte(), 2, "end of \"cd\"");
    }

    #[test]
    fn sticky_column_survives_short_lines() {
        let mut f = Fixture::new(&["0123456789\n", "ab\n", "\n", "0123456789\n"], 4, 80, 10);
        for _ in 0..7 {
            f.right();
        }
        assert_eq!(f.logical(), (0, 7));
        f.down();
        assert_eq!(f.logical(), (1, 2));
        f.down();
        assert_eq!(f.logical(), (2, 0));
        f.down();
        assert_eq!(f.logical(), (3, 7));
        f.up();
        f.up();
        f.up();
        assert_eq!(f.logical(), (0, 7));
        assert_eq!(f.cursor.target_column(), 7);
    }

    #[test]
    fn vertical_landing_inside_tab_rounds_down() {
        let mut f = Fixture::new(&["abcdef\n", "a\tb\n"], 4, 80, 10);
        for _ in 0..3 {
            f.right();
        }
        f.down();
        assert_eq!(f.logical(), (1, 1), "column 3 lies inside the tab span [1,4)");
        assert_eq!(f.cursor.target_column(), 3);
        f.up();
        assert_eq!(f.logical(), (0, 3));
    }

    #[test]
    fn boundaries_are_noops() {
        let mut f = Fixture::new(&["ab\n", "cd"], 2, 80, 10);
        assert!(!f.up());
        assert_eq!(f.logical(), (0, 0));
        assert!(!f.left());
        assert_eq!(f.logical(), (0, 0));
        f.down();
        assert!(!f.down());
        assert_eq!(f.logical(), (1, 0));
    }

    #[test]
    fn no_wrap_at_end_of_line() {
        let mut f = Fixture::new(&["ab\n", "cd\n"], 2, 80, 10);
        f.right();
        f.right();
        assert_eq!(f.logical(), (0, 2));
        f.right();
        assert_eq!(f.logical(), (0, 2), "right at end of content stays put");
    }

    #[test]
    fn horizontal_noop_still_resets_target() {
        let mut f = Fixture::new(&["abcdef\n", "ab\n"], 2, 80, 10);
        for _ in 0..5 {
            f.right();
        }
        f.down();
        assert_eq!(f.logical(), (1, 2));
        f.right();
        assert_eq!(f.logical(), (1, 2));
        assert_eq!(f.cursor.target_column(), 2);
        f.up();
        assert_eq!(f.logical(), (0, 2));
    }

    #[test]
    fn moving_down_past_bottom_row_scrolls() {
        let mut f = Fixture::new(&["0\n", "1\n", "2\n", "3\n", "4\n"], 2, 80, 3);
        f.down();
        f.down();
        assert_eq!((f.cursor.row(), f.viewport.line_offset()), (2, 0));
        assert!(f.down(), "scrolling marks the viewport changed");
        assert_eq!((f.cursor.row(), f.viewport.line_offset()), (2, 1));
        f.down();
        assert_eq!(f.logical(), (4, 0));
        assert!(!f.down());
        f.up();
        f.up();
        assert_eq!((f.cursor.row(), f.viewport.line_offset()), (0, 2));
        assert!(f.up());
        assert_eq!((f.cursor.row(), f.viewport.line_offset()), (0, 1));
    }

    #[test]
    fn plain_vertical_move_does_not_report_change() {
        let mut f = Fixture::new(&["ab\n", "cd\n"], 2, 80, 10);
        assert!(!f.down());
        assert!(!f.up());
    }

    #[test]
    fn right_pans_at_window_edge() {
        let mut f = Fixture::new(&["abcdefghij\n"], 2, 4, 2);
        for _ in 0..3 {
            assert!(!f.right());
        }
        assert_eq!((f.cursor.col(), f.viewport.column_offset()), (3, 0));
        assert!(f.right());
        assert_eq!((f.cursor.col(), f.viewport.column_offset()), (3, 1));
        assert_eq!(f.logical(), (0, 4));
    }

    #[test]
    fn right_across_tab_pans_by_span() {
        let mut f = Fixture::new(&["ab\tc\n"], 4, 4, 2);
        f.right();
        f.right();
        assert_eq!(f.logical(), (0, 2));
        f.right();
        assert_eq!(f.logical(), (0, 4));
        assert_eq!((f.cursor.col(), f.viewport.column_offset()), (3, 1));
    }

    #[test]
    fn left_past_offset_pans_by_deficit() {
        let mut f = Fixture::new(&["a\tbcdefgh\n"], 4, 4, 2);
        for _ in 0..4 {
            f.right();
        }
        assert_eq!(f.logical(), (0, 6));
        assert_eq!(f.viewport.column_offset(), 3);
        f.left();
        f.left();
        assert_eq!(f.logical(), (0, 4));
        assert_eq!(f.cursor.col(), 1);
        assert!(f.left(), "crossing the tab leftwards pans");
        assert_eq!(f.logical(), (0, 1));
        assert_eq!((f.cursor.col(), f.viewport.column_offset()), (0, 1));
    }

    #[test]
    fn vertical_to_short_line_pans_left() {
        let mut f = Fixture::new(&["abcdefghij\n", "ab\n"], 2, 4, 3);
        for _ in 0..8 {
            f.right();
        }
        assert_eq!(f.viewport.column_offset(), 5);
        assert!(f.down());
        assert_eq!(f.viewport.column_offset(), 2);
        assert_eq!((f.cursor.col(), f.logical()), (0, (1, 2)));
        assert!(f.up(), "returning to the long line pans right to the target");
        assert_eq!(f.logical(), (0, 8));
        assert_eq!(f.cursor.col(), 3);
    }

    #[test]
    fn reconcile_is_idempotent_and_keeps_target() {
        let lines: Vec<String> = (0..20).map(|i| format!("line {i:02} content\n")).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let mut f = Fixture::new(&refs, 2, 20, 10);
        for _ in 0..9 {
            f.down();
        }
        for _ in 0..12 {
            f.right();
        }
        let before = f.logical();
        let target = f.cursor.target_column();
        f.viewport.resize(6, 4);
        assert!(f.cursor.reconcile(&f.buffer, &mut f.viewport));
        assert_eq!(f.logical(), before);
        assert!(f.cursor.row() < 4 && f.cursor.col() < 6);
        let snapshot = (f.cursor, f.viewport);
        assert!(!f.cursor.reconcile(&f.buffer, &mut f.viewport));
        assert_eq!((f.cursor, f.viewport), snapshot);
        assert_eq!(f.cursor.target_column(), target);
    }

    #[test]
    fn follow_scroll_clamps_row_to_document() {
        let mut f = Fixture::new(&["0\n", "1\n", "2\n", "3\n"], 2, 10, 3);
        f.down();
        f.down();
        f.viewport.scroll_by(1000, f.buffer.count());
        f.cursor.follow_scroll(&f.buffer, f.mapper, &mut f.viewport);
        assert_eq!(f.viewport.line_offset(), 3);
        assert_eq!(f.cursor.row(), 0);
        assert_eq!(f.logical(), (3, 0));
    }

    #[test]
    fn jump_to_scrolls_and_sets_target() {
        let mut f = Fixture::new(&["0\n", "1\n", "2\n", "3\n", "4\n"], 2, 10, 2);
        f.cursor.jump_to(4, 0, &mut f.viewport);
        assert_eq!(f.viewport.line_offset(), 3);
        assert_eq!(f.cursor.row(), 1);
        assert_eq!(f.cursor.target_column(), 0);
    }
}
