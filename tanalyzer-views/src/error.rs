//! Error types for the view models.

use tanalyzer_sync::SyncError;
use thiserror::Error;

/// Result type for view operations.
pub type ViewResult<T> = Result<T, ViewError>;

/// Errors raised when a view cannot act on its current state.
#[derive(Debug, Error)]
pub enum ViewError {
    /// A required form field is empty.
    #[error("required field is empty: {0}")]
    MissingField(&'static str),

    /// A name that is not among the list's selectable items.
    #[error("{list} has no item named {name:?}")]
    UnknownItem { list: &'static str, name: String },

    /// The view has not been initialized from the store yet.
    #[error("view is not initialized: {0}")]
    NotReady(&'static str),

    /// The underlying backend operation failed.
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
