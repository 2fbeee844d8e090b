//! Error types for college-api

use thiserror::Error;

/// Result type alias for college-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the store and the service layer
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or malformed caller input, detected before touching the store
    #[error("{0}")]
    Validation(String),

    /// No record matched the request
    #[error("{0}")]
    NotFound(String),

    /// Any failure inside SQLite
    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    /// A previous holder of the connection panicked
    #[error("Store connection lock poisoned")]
    LockPoisoned,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Error::NotFound(message.into())
    }
}
