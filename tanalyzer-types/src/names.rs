//! Positional name index.
//!
//! The index mirrors an entity collection one entry per entity, in the same
//! order. A bulk rebuild numbers entries `1..=N` by position; an append takes
//! `len + 1`.

use crate::entity::DropDownListItem;
use crate::payload::DEFAULT_ENTITY_NAME;
use serde::{Deserialize, Serialize};

/// `{id, itemName}` projection of one collection, used for selection lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameIndex(Vec<DropDownListItem>);

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index from names in order.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = Self::new();
        index.rebuild(names);
        index
    }

    /// Discards every entry and renumbers from 1 by position.
    pub fn rebuild<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0 = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| DropDownListItem::new(i as u32 + 1, name))
            .collect();
    }

    /// Appends one entry with `id = len + 1` and returns that id.
    pub fn push(&mut self, name: impl Into<String>) -> u32 {
        let id = self.0.len() as u32 + 1;
        self.0.push(DropDownListItem::new(id, name));
        id
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn items(&self) -> &[DropDownListItem] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &DropDownListItem> {
        self.0.iter()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|item| item.item_name == name)
    }

    /// The entries a user may pick as a base, i.e. everything except the
    /// reserved `Default` template.
    pub fn selectable(&self) -> Vec<DropDownListItem> {
        self.0
            .iter()
            .filter(|item| item.item_name != DEFAULT_ENTITY_NAME)
            .cloned()
            .collect()
    }
}

impl<'a> IntoIterator for &'a NameIndex {
    type Item = &'a DropDownListItem;
    type IntoIter = std::slice::Iter<'a, DropDownListItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
