use thiserror::Error;

/// Buffer contract violation: an index or offset outside the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TextError {
    #[error("line {index} out of range (document has {count} lines)")]
    LineOutOfRange { index: usize, count: usize },
    #[error("byte offset {offset} out of range for line {line} (content length {len})")]
    OffsetOutOfRange { line: usize, offset: usize, len: usize },
}
