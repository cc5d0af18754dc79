//! Dropdown selection state.

use crate::error::{ViewError, ViewResult};
use serde_json::Value;
use tanalyzer_types::{DropDownListItem, SettingsBlob};

/// One dropdown: what can be picked, how the widget is configured, and what
/// is currently picked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionList {
    pub items: Vec<DropDownListItem>,
    /// Widget configuration taken from the kind's settings blob.
    pub settings: Value,
    pub selected: Vec<DropDownListItem>,
}

impl SelectionList {
    /// A list with the given items, the widget settings stored under `key`
    /// and nothing selected.
    pub fn with_settings(items: Vec<DropDownListItem>, settings: &SettingsBlob, key: &str) -> Self {
        Self {
            items,
            settings: settings.get(key).cloned().unwrap_or(Value::Null),
            selected: Vec::new(),
        }
    }

    /// Replaces the items and drops the selection, keeping the settings.
    pub fn reset_items(&mut self, items: Vec<DropDownListItem>) {
        self.items = items;
        self.selected.clear();
    }

    pub fn find(&self, name: &str) -> Option<&DropDownListItem> {
        self.items.iter().find(|i| i.item_name == name)
    }

    /// Selects the named items, replacing the current selection. Fails
    /// without changing anything if a name is not among the items. `list`
    /// names the widget in the error.
    pub fn pick(&mut self, list: &'static str, names: &[&str]) -> ViewResult<()> {
        let picked = names
            .iter()
            .map(|name| {
                self.find(name).cloned().ok_or_else(|| ViewError::UnknownItem {
                    list,
                    name: (*name).to_string(),
                })
            })
            .collect::<ViewResult<Vec<_>>>()?;
        self.selected = picked;
        Ok(())
    }

    /// Names of the selected items.
    pub fn selected_names(&self) -> Vec<&str> {
        self.selected.iter().map(|i| i.item_name.as_str()).collect()
    }

    /// The first selected item, for single-selection widgets.
    pub fn first_selected(&self) -> Option<&DropDownListItem> {
        self.selected.first()
    }

    /// Whether the widget settings carry `"disabled": true`.
    pub fn is_disabled(&self) -> bool {
        self.settings
            .get("disabled")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Replaces the settings with a copy marked disabled.
    pub fn disable(&mut self) {
        let mut settings = match &self.settings {
            Value::Object(map) => map.clone(),
            _ => serde_json::Map::new(),
        };
        settings.insert("disabled".into(), Value::Bool(true));
        self.settings = Value::Object(settings);
    }
}
