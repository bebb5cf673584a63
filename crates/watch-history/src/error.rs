//! Error types for the watch-history crate.
//!
//! Two families live here:
//! - `DecodeError` describes a single corrupt history line. It is always
//!   absorbed at the record boundary and never fails a whole batch.
//! - `HistoryError` covers the store itself (file I/O, JSON, locking).

use thiserror::Error;

/// Why a single encoded history line could not be turned into a record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Fewer delimited fields than even the legacy format carries
    #[error("Expected at least {expected} fields but found {found}")]
    TooFewFields { expected: usize, found: usize },

    /// The leading id field is not a non-negative integer
    #[error("Invalid value for id: {value}")]
    InvalidId { value: String },
}

/// Errors that can occur while loading, reading or writing a history store
#[derive(Error, Debug)]
pub enum HistoryError {
    /// I/O error occurred while reading or writing the history file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// History file is not the expected JSON shape
    #[error("Malformed history file: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A writer panicked while holding a user's list
    #[error("History store lock poisoned")]
    LockPoisoned,
}

/// Convenience type alias for store operations in this crate
pub type Result<T> = std::result::Result<T, HistoryError>;
