//! Environment and Communication records.
//!
//! Field names follow the JSON files kept by the backend (camelCase). Missing
//! lists deserialize as empty and unknown fields are ignored, so a partially
//! filled file still loads.

use crate::kind::EntityKind;
use serde::{Deserialize, Serialize};

/// One selectable item of a dropdown widget.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DropDownListItem {
    pub id: u32,
    #[serde(rename = "itemName")]
    pub item_name: String,
}

impl DropDownListItem {
    pub fn new(id: u32, item_name: impl Into<String>) -> Self {
        Self {
            id,
            item_name: item_name.into(),
        }
    }
}

/// An execution environment and the communications it supports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub name: String,
    #[serde(default)]
    pub supported_communications: Vec<DropDownListItem>,
}

impl Environment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            supported_communications: Vec::new(),
        }
    }

    /// Adds a supported communication by name, numbering it after the
    /// existing entries.
    pub fn with_communication(mut self, name: impl Into<String>) -> Self {
        let id = self.supported_communications.len() as u32 + 1;
        self.supported_communications
            .push(DropDownListItem::new(id, name));
        self
    }
}

/// The attribute-tag lists of a communication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommunicationField {
    CommunicationType,
    CommunicationPattern,
    RequestType,
    HeaderSize,
    PayloadType,
    PayloadSize,
    SecurityType,
    AuthenticationType,
    QosType,
    IotLevel,
}

impl CommunicationField {
    pub const ALL: [CommunicationField; 10] = [
        CommunicationField::CommunicationType,
        CommunicationField::CommunicationPattern,
        CommunicationField::RequestType,
        CommunicationField::HeaderSize,
        CommunicationField::PayloadType,
        CommunicationField::PayloadSize,
        CommunicationField::SecurityType,
        CommunicationField::AuthenticationType,
        CommunicationField::QosType,
        CommunicationField::IotLevel,
    ];

    /// JSON key of the field; also the settings key of its widget.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            CommunicationField::CommunicationType => "communicationType",
            CommunicationField::CommunicationPattern => "communicationPattern",
            CommunicationField::RequestType => "requestType",
            CommunicationField::HeaderSize => "headerSize",
            CommunicationField::PayloadType => "payloadType",
            CommunicationField::PayloadSize => "payloadSize",
            CommunicationField::SecurityType => "securityType",
            CommunicationField::AuthenticationType => "authenticationType",
            CommunicationField::QosType => "qosType",
            CommunicationField::IotLevel => "iotLevel",
        }
    }
}

/// A communication type described by its attribute tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Communication {
    pub name: String,
    pub base_type: String,
    pub communication_type: Vec<DropDownListItem>,
    pub communication_pattern: Vec<DropDownListItem>,
    pub request_type: Vec<DropDownListItem>,
    pub header_size: Vec<DropDownListItem>,
    pub payload_type: Vec<DropDownListItem>,
    pub payload_size: Vec<DropDownListItem>,
    pub security_type: Vec<DropDownListItem>,
    pub authentication_type: Vec<DropDownListItem>,
    pub qos_type: Vec<DropDownListItem>,
    pub iot_level: Vec<DropDownListItem>,
}

impl Communication {
    pub fn new(name: impl Into<String>, base_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_type: base_type.into(),
            ..Default::default()
        }
    }

    pub fn field(&self, field: CommunicationField) -> &[DropDownListItem] {
        match field {
            CommunicationField::CommunicationType => &self.communication_type,
            CommunicationField::CommunicationPattern => &self.communication_pattern,
            CommunicationField::RequestType => &self.request_type,
            CommunicationField::HeaderSize => &self.header_size,
            CommunicationField::PayloadType => &self.payload_type,
            CommunicationField::PayloadSize => &self.payload_size,
            CommunicationField::SecurityType => &self.security_type,
            CommunicationField::AuthenticationType => &self.authentication_type,
            CommunicationField::QosType => &self.qos_type,
            CommunicationField::IotLevel => &self.iot_level,
        }
    }

    pub fn field_mut(&mut self, field: CommunicationField) -> &mut Vec<DropDownListItem> {
        match field {
            CommunicationField::CommunicationType => &mut self.communication_type,
            CommunicationField::CommunicationPattern => &mut self.communication_pattern,
            CommunicationField::RequestType => &mut self.request_type,
            CommunicationField::HeaderSize => &mut self.header_size,
            CommunicationField::PayloadType => &mut self.payload_type,
            CommunicationField::PayloadSize => &mut self.payload_size,
            CommunicationField::SecurityType => &mut self.security_type,
            CommunicationField::AuthenticationType => &mut self.authentication_type,
            CommunicationField::QosType => &mut self.qos_type,
            CommunicationField::IotLevel => &mut self.iot_level,
        }
    }

    /// Builder-style setter for one attribute list, ids numbered from 1.
    pub fn with_field<I, S>(mut self, field: CommunicationField, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.field_mut(field) = names
            .into_iter()
            .enumerate()
            .map(|(i, n)| DropDownListItem::new(i as u32 + 1, n))
            .collect();
        self
    }
}

/// A stored entity of either kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Entity {
    Environment(Environment),
    Communication(Communication),
}

impl Entity {
    /// Parses a backend JSON object as an entity of the given kind.
    pub fn from_json(kind: EntityKind, value: serde_json::Value) -> crate::Result<Self> {
        if !value.is_object() {
            return Err(crate::Error::NotAnObject(value.to_string()));
        }
        Ok(match kind {
            EntityKind::Environments => Entity::Environment(serde_json::from_value(value)?),
            EntityKind::Communications => Entity::Communication(serde_json::from_value(value)?),
        })
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Environment(_) => EntityKind::Environments,
            Entity::Communication(_) => EntityKind::Communications,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Entity::Environment(e) => &e.name,
            Entity::Communication(c) => &c.name,
        }
    }

    pub fn as_environment(&self) -> Option<&Environment> {
        match self {
            Entity::Environment(e) => Some(e),
            Entity::Communication(_) => None,
        }
    }

    pub fn as_communication(&self) -> Option<&Communication> {
        match self {
            Entity::Communication(c) => Some(c),
            Entity::Environment(_) => None,
        }
    }

    pub fn into_environment(self) -> Option<Environment> {
        match self {
            Entity::Environment(e) => Some(e),
            Entity::Communication(_) => None,
        }
    }

    pub fn into_communication(self) -> Option<Communication> {
        match self {
            Entity::Communication(c) => Some(c),
            Entity::Environment(_) => None,
        }
    }
}

impl From<Environment> for Entity {
    fn from(env: Environment) -> Self {
        Entity::Environment(env)
    }
}

impl From<Communication> for Entity {
    fn from(comm: Communication) -> Self {
        Entity::Communication(comm)
    }
}
