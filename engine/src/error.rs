//! Error types for the Transmarin engine.

use thiserror::Error;

/// All possible errors from the Transmarin engine.
///
/// Reads never produce these: an unreadable collection is reported as empty.
/// Every mutating store operation surfaces substrate failures through this type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Substrate errors
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded { needed: usize, quota: usize },

    #[error("io error: {0}")]
    Io(String),

    #[error("serialization failed: {0}")]
    Serialization(String),

    // Lookup errors
    #[error("unknown collection: {0}")]
    UnknownCollection(String),

    #[error("invalid date: {0}")]
    InvalidDate(String),

    // Validation errors
    #[error("invalid {collection} record: {reason}")]
    InvalidRecord { collection: String, reason: String },
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
