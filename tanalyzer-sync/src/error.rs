//! Error types for the sync layer.

use crate::transport::TransportError;
use serde_json::Value;
use tanalyzer_types::EntityKind;
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur in sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The request never reached the backend.
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// The backend answered but rejected the request.
    #[error("backend rejected request: {payload}")]
    Rejected { payload: Value },

    /// The backend answered with something that does not fit the
    /// response conventions.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// An entity was handed to the wrong collection.
    #[error("entity kind mismatch: expected {expected}, found {found}")]
    KindMismatch {
        expected: EntityKind,
        found: EntityKind,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<tanalyzer_types::Error> for SyncError {
    fn from(err: tanalyzer_types::Error) -> Self {
        match err {
            tanalyzer_types::Error::Serialization(e) => SyncError::Serialization(e),
            other => SyncError::MalformedPayload(other.to_string()),
        }
    }
}
