//! Store error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::customer::DecodeError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing medium could not be read or written
    #[error("failed to {op} {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A stored line did not decode (strict mode only)
    #[error("malformed record at line {line}: {reason}")]
    Malformed {
        line: usize,
        #[source]
        reason: DecodeError,
    },
}

impl StoreError {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// 1-based line number for malformed-record errors
    pub fn line(&self) -> Option<usize> {
        match self {
            StoreError::Malformed { line, .. } => Some(*line),
            StoreError::Io { .. } => None,
        }
    }
}
