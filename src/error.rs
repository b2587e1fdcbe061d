//! Error types and handling.

use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Slot file I/O failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record could not be serialized for persistence
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Persisted slot exists but does not hold the expected data
    #[error("Slot '{slot}' is corrupt: {source}")]
    Corrupt {
        slot: String,
        #[source]
        source: serde_json::Error,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create a corrupt-slot error for the given slot key
    pub fn corrupt(slot: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Corrupt {
            slot: slot.into(),
            source,
        }
    }

    /// Create a validation error with message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error with message
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}
