//! Error types for the time management system

use thiserror::Error;

/// Result type alias for data-access operations
pub type Result<T> = std::result::Result<T, TmsError>;

/// Unified error type for all data-access operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TmsError {
    /// Missing or invalid required setting (fatal at startup)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Initial or live connectivity failure
    #[error("Connection error: {0}")]
    Connection(String),

    /// Operational failure reported by the document store
    #[error("Store error: {0}")]
    Store(String),

    /// A string supplied as a document identifier does not decode
    #[error("Invalid document identifier '{value}': {reason}")]
    InvalidIdentifier { value: String, reason: String },

    #[error("Validation error: {0}")]
    Validation(String),
}

impl TmsError {
    /// Returns true if the failure came from connectivity rather than the operation itself
    pub fn is_connection_error(&self) -> bool {
        matches!(self, TmsError::Connection(_))
    }
}

// MongoDB-specific error conversions (when mongodb-errors feature is enabled)
#[cfg(feature = "mongodb-errors")]
impl From<mongodb::error::Error> for TmsError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;
        match err.kind.as_ref() {
            ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) => {
                TmsError::Connection(err.to_string())
            }
            _ => TmsError::Store(err.to_string()),
        }
    }
}
