//! Screen painting for the editor session.
//!
//! Layout: text rows `0..height` show the document from the viewport offsets
//! (rows past the end show `~`), followed by one status row when enabled.
//! Each document byte occupies one cell except tabs, which expand to the next
//! tab stop, so painted columns agree with `core_text::ColumnMapper`.
//!
//! Components:
//! - `render_engine`: full and cursor-only frame assembly.
//! - `status`: status row segments and formatting.
//! - `writer`: ordered terminal command batch flushed once per frame.

pub mod render_engine;
pub mod status;
pub mod writer;

pub use render_engine::{FrameStats, RenderEngine, build_rows, render_line};
pub use status::{StatusLine, build_status};
