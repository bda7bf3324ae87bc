//! Error types for netlookup.

use thiserror::Error;

/// Error type for netlookup operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Backing store could not be reached
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// Offset or pointer outside the database buffer
    #[error("corrupt database {source_name}: {reason}")]
    CorruptData { source_name: String, reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn corrupt(source_name: &str, reason: impl Into<String>) -> Self {
        Error::CorruptData {
            source_name: source_name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for netlookup operations.
pub type Result<T> = std::result::Result<T, Error>;
