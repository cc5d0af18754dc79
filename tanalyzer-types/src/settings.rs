//! Opaque per-kind widget settings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// UI configuration loaded from the settings file of a kind.
///
/// The sync layer never interprets the contents; consumers look up the
/// widget they render by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsBlob(Map<String, Value>);

impl SettingsBlob {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a backend payload. Anything but an object is rejected.
    pub fn from_json(value: Value) -> crate::Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(crate::Error::NotAnObject(other.to_string())),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for SettingsBlob {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
