// src/error.rs

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DineError>;

#[derive(Debug, Error)]
pub enum DineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A source row that cannot become an index entry. Skipped during a build.
    #[error("malformed record at line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    #[error("category path must have {expected} labels, got {actual}")]
    PathLength { expected: usize, actual: usize },

    #[error("path field {position} holds no label")]
    EmptyLabel { position: usize },

    /// A leaf was found where a category was expected, or the reverse.
    #[error("node '{label}' has the wrong shape for its depth")]
    NodeShape { label: String },

    #[error("children of '{parent}' are not strictly ascending at '{label}'")]
    UnsortedChildren { parent: String, label: String },

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// A selected index has no backing record; the builder and index disagree.
    #[error("no record with original index {0}")]
    UnresolvableIndex(usize),
}
