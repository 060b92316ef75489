//! Event dispatch and file IO collaborators for the editor session.
//!
//! `dispatch` turns one logical `Event` into exactly one `EditorSession`
//! operation (Save additionally goes through `io_ops`). File loading and
//! saving live in `io_ops` and preserve document bytes exactly.

pub mod dispatcher;
pub mod io_ops;

pub use dispatcher::{DispatchResult, dispatch};
pub use io_ops::{LoadError, SaveError, load_session, read_records, write_session};
