//! Viewport scroller: the visible window into the document.
//!
//! Guarantees:
//! * `line_offset` is the index of the topmost document line on screen;
//!   `column_offset` is the first visible visual column.
//! * `width`/`height` are the text area dimensions and are never 0 (a zero
//!   report from the terminal is treated as 1 so cursor arithmetic stays valid).
//! * Every setter reports whether the stored value actually changed; only real
//!   changes should trigger a repaint.

/// Which bound `scroll_by` ran into, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollClamp {
    None,
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollOutcome {
    pub changed: bool,
    pub clamp: ScrollClamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    line_offset: usize,
    column_offset: usize,
    width: usize,
    height: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            line_offset: 0,
            column_offset: 0,
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn line_offset(&self) -> usize {
        self.line_offset
    }

    pub fn column_offset(&self) -> usize {
        self.column_offset
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Store new text area dimensions. Returns true if either changed.
    pub fn resize(&mut self, width: usize, height: usize) -> bool {
        let (width, height) = (width.max(1), height.max(1));
        let changed = width != self.width || height != self.height;
        self.width = width;
        self.height = height;
        changed
    }

    pub fn set_line_offset(&mut self, offset: usize) -> bool {
        let changed = offset != self.line_offset;
        self.line_offset = offset;
        changed
    }

    /// Set the horizontal scroll offset.
    pub fn pan_columns_to(&mut self, target: usize) -> bool {
        let changed = target != self.column_offset;
        if changed {
            tracing::trace!(target: "model.viewport", from = self.column_offset, to = target, "pan");
        }
        self.column_offset = target;
        changed
    }

    /// Move `line_offset` by `amount`, clamped to `[0, line_count - 1]`.
    ///
    /// Underflow (driving below zero) and overflow (driving past the last
    /// line, including arithmetic overflow) are detected explicitly and
    /// reported through `ScrollOutcome::clamp`.
    pub fn scroll_by(&mut self, amount: isize, line_count: usize) -> ScrollOutcome {
        let last = line_count.saturating_sub(1);
        let (target, clamp) = match self.line_offset.checked_add_signed(amount) {
            None if amount < 0 => (0, ScrollClamp::Top),
            None => (last, ScrollClamp::Bottom),
            Some(t) if t > last => (last, ScrollClamp::Bottom),
            Some(t) => (t, ScrollClamp::None),
        };
        let changed = self.set_line_offset(target);
        if changed || clamp != ScrollClamp::None {
            tracing::trace!(target: "model.viewport", amount, line_offset = target, ?clamp, "scroll_by");
        }
        ScrollOutcome { changed, clamp }
    }

    /// Vertical scroll so `line` is inside the window. Returns true if scrolled.
    pub fn reveal_line(&mut self, line: usize) -> bool {
        match compute_scroll_intent(self.line_offset, line, self.height) {
            Some(first) => self.set_line_offset(first),
            None => false,
        }
    }

    /// Pan horizontally by the minimum amount that makes `column` visible.
    pub fn reveal_column(&mut self, column: usize) -> bool {
        if column < self.column_offset {
            self.pan_columns_to(column)
        } else if column >= self.column_offset + self.width {
            self.pan_columns_to(column + 1 - self.width)
        } else {
            false
        }
    }

    /// Last document line index visible in the window (`None` for empty documents).
    pub fn last_visible_line(&self, line_count: usize) -> Option<usize> {
        if self.line_offset >= line_count {
            return None;
        }
        Some((self.line_offset + self.height - 1).min(line_count - 1))
    }
}

/// Compute the first visible line needed to keep `line` within a window of
/// `height` rows starting at `first`. `None` when no scroll is needed.
pub fn compute_scroll_intent(first: usize, line: usize, height: usize) -> Option<usize> {
    if height == 0 {
        return None;
    }
    if line < first {
        Some(line)
    } else if line >= first + height {
        Some(line + 1 - height)
    } else {
        None
    }
}
