//! Presentation model for a single document: the viewport window and the
//! cursor that moves through it.
//!
//! The three coordinate spaces meet here:
//! * byte offset within a line (owned by `core-text`),
//! * visual column, after tab expansion (`core_text::ColumnMapper`),
//! * screen row/column, relative to the viewport offsets.
//!
//! `Viewport` owns the offsets and dimensions; `Cursor` owns the screen
//! position and the sticky target column. Neither type holds a reference to
//! the buffer: callers pass it in, which keeps borrows short in the session.

mod cursor;
mod viewport;

pub use cursor::Cursor;
pub use viewport::{ScrollClamp, ScrollOutcome, Viewport, compute_scroll_intent};
