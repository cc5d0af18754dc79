//! Reserved names and response conventions shared with the backend.

use serde_json::{json, Value};

/// Name of the base template present in every folder.
pub const DEFAULT_ENTITY_NAME: &str = "Default";

/// File holding the widget settings of a folder.
pub const SETTINGS_FILE_NAME: &str = "settingsDropdownElements";

/// Base type of a communication authored from scratch.
pub const DEFAULT_BASE_TYPE: &str = "NEW";

/// Marks a response the backend logically rejected.
pub const ERROR_KEY: &str = "ERROR";

/// Marks a successful save.
pub const SUCCESS_KEY: &str = "SUCCESS";

/// Extra explanation attached by the backend to errors and saves.
pub const DETAILS_KEY: &str = "Details";

pub const FATAL_ERROR_KEY: &str = "FATAL ERROR";
pub const FATAL_ERROR_MESSAGE: &str = "Something went wrong. Please check the logs.";

/// The fixed payload shown when a request never reached the backend.
pub fn fatal_notification() -> Value {
    json!({ FATAL_ERROR_KEY: FATAL_ERROR_MESSAGE })
}

/// Whether a payload is an application error (object carrying `ERROR`).
pub fn is_application_error(payload: &Value) -> bool {
    payload
        .as_object()
        .is_some_and(|map| map.contains_key(ERROR_KEY))
}

/// Whether a save response reports success.
pub fn is_save_success(payload: &Value) -> bool {
    payload
        .as_object()
        .is_some_and(|map| map.contains_key(SUCCESS_KEY))
}
