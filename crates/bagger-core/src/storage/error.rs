//! Storage error types

use std::path::PathBuf;
use thiserror::Error;

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the profile store
#[derive(Error, Debug)]
pub enum StoreError {
    /// No row exists for the requested id
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// Any other read failure
    #[error("SQLite error: {0}")]
    Query(#[from] rusqlite::Error),

    /// An INSERT or UPDATE statement failed
    #[error("Failed to write {entity}: {source}")]
    Write {
        entity: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// The replay log could not be written
    #[error("I/O error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A core entity could be neither updated nor inserted
    #[error("{entity} update not supported: {reason}")]
    Unsupported { entity: &'static str, reason: String },

    /// Schema setup failed
    #[error("Migration error: {0}")]
    Migration(String),
}

impl StoreError {
    pub(crate) fn write(entity: &'static str, source: rusqlite::Error) -> Self {
        StoreError::Write { entity, source }
    }

    /// Whether this is the "no such row" outcome of a load
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
