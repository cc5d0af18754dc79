//! Entity kinds.
//!
//! The wire name of a kind is the backend folder that holds its files.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two kinds of configuration entity kept by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Environments,
    Communications,
}

impl EntityKind {
    /// Every kind, in startup load order.
    pub const ALL: [EntityKind; 2] = [EntityKind::Communications, EntityKind::Environments];

    /// Backend folder name, used as the `folderName` query parameter.
    #[must_use]
    pub const fn folder_name(self) -> &'static str {
        match self {
            EntityKind::Environments => "environments",
            EntityKind::Communications => "communications",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.folder_name())
    }
}

impl FromStr for EntityKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "environments" | "environment" | "env" => Ok(EntityKind::Environments),
            "communications" | "communication" | "comm" => Ok(EntityKind::Communications),
            other => Err(crate::Error::UnknownKind(other.to_string())),
        }
    }
}
