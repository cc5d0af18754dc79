//! Core type definitions for the transformation analyzer.
//!
//! This crate defines the plain data shared by the sync layer and the views:
//! - Entity kinds and the typed Environment / Communication records
//! - Dropdown items and the positional name index built from them
//! - Opaque per-kind settings blobs
//! - Load classes and load states
//! - Reserved names and payload conventions of the backend

mod entity;
mod kind;
mod names;
mod payload;
mod settings;
mod state;

pub use entity::{Communication, CommunicationField, DropDownListItem, Entity, Environment};
pub use kind::EntityKind;
pub use names::NameIndex;
pub use payload::{
    fatal_notification, is_application_error, is_save_success, DEFAULT_BASE_TYPE,
    DEFAULT_ENTITY_NAME, DETAILS_KEY, ERROR_KEY, FATAL_ERROR_KEY, FATAL_ERROR_MESSAGE,
    SETTINGS_FILE_NAME, SUCCESS_KEY,
};
pub use settings::SettingsBlob;
pub use state::{LoadClass, LoadState};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown entity kind: {0}")]
    UnknownKind(String),

    #[error("expected a JSON object, got {0}")]
    NotAnObject(String),
}
