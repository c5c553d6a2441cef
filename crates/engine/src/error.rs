//! The module contains the errors the engine can return.
//!
//! The errors fall in five groups:
//!
//! - input format errors ([`InvalidAmount`], [`InvalidDate`], [`Format`]) raised
//!   while parsing user or bulk-file input;
//! - addressing errors ([`CategoryIndex`], [`TransactionIndex`]) raised by
//!   positional update/delete;
//! - [`TotalOverflow`] raised when a summary total does not fit in cents;
//! - [`EmptyQuery`] raised by search on a blank query;
//! - persistence errors ([`SnapshotParse`], [`SnapshotEncode`], [`Io`]).
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidDate`]: EngineError::InvalidDate
//!  [`Format`]: EngineError::Format
//!  [`CategoryIndex`]: EngineError::CategoryIndex
//!  [`TransactionIndex`]: EngineError::TransactionIndex
//!  [`TotalOverflow`]: EngineError::TotalOverflow
//!  [`EmptyQuery`]: EngineError::EmptyQuery
//!  [`SnapshotParse`]: EngineError::SnapshotParse
//!  [`SnapshotEncode`]: EngineError::SnapshotEncode
//!  [`Io`]: EngineError::Io
use std::path::PathBuf;

use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid date \"{0}\": expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("line {line}: {reason}")]
    Format { line: u64, reason: String },
    #[error("category index {index} out of range ({len} categories)")]
    CategoryIndex { index: usize, len: usize },
    #[error("transaction index {index} out of range for \"{category}\" ({len} transactions)")]
    TransactionIndex {
        category: String,
        index: usize,
        len: usize,
    },
    #[error("total is too large to compute")]
    TotalOverflow,
    #[error("Search term cannot be empty.")]
    EmptyQuery,
    #[error("invalid snapshot {}: {source}", path.display())]
    SnapshotParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unable to encode snapshot: {0}")]
    SnapshotEncode(#[source] serde_json::Error),
    #[error("unable to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EngineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` when the error is a missing file.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
