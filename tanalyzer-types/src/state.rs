//! Load classes and their states.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A class of backend operation. State is tracked per class, not per kind:
/// both kinds share the `Bulk` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadClass {
    Single,
    Bulk,
    Save,
    Analysis,
}

impl LoadClass {
    pub const ALL: [LoadClass; 4] = [
        LoadClass::Single,
        LoadClass::Bulk,
        LoadClass::Save,
        LoadClass::Analysis,
    ];
}

impl fmt::Display for LoadClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LoadClass::Single => "single",
            LoadClass::Bulk => "bulk",
            LoadClass::Save => "save",
            LoadClass::Analysis => "analysis",
        })
    }
}

/// Outcome of the most recent operation of a class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadState {
    #[default]
    NotInitialized,
    Success,
    Error,
}

impl LoadState {
    pub fn is_success(self) -> bool {
        self == LoadState::Success
    }
}
