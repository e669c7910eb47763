//! Error types for the store module.

use thiserror::Error;

/// Errors that can occur during rule store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The storage backend could not be reached or its executor failed.
    /// The only category where a caller-side retry is reasonable.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A stored row could not be decoded into a rule.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
