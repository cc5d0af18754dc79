//! Communication editor.
//!
//! Every attribute list starts from the `Default` template. Customizing an
//! existing communication narrows each list to the base's values, keeps its
//! type and pattern selected and locks the type widget.

use crate::error::{ViewError, ViewResult};
use crate::naming::{synthesize_name, NameTag};
use crate::output::{render_value, OutputWindow};
use crate::selection::SelectionList;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tanalyzer_sync::{Consumer, Loader, StoreReader};
use tanalyzer_types::{
    Communication, CommunicationField, DropDownListItem, EntityKind, DEFAULT_BASE_TYPE,
    DEFAULT_ENTITY_NAME,
};
use tracing::{debug, warn};

const BASE_SETTINGS_KEY: &str = "baseCommunication";

/// Attributes a communication cannot be saved without.
pub const REQUIRED_FIELDS: [CommunicationField; 6] = [
    CommunicationField::CommunicationType,
    CommunicationField::CommunicationPattern,
    CommunicationField::RequestType,
    CommunicationField::HeaderSize,
    CommunicationField::PayloadType,
    CommunicationField::PayloadSize,
];

/// Attributes kept selected when customizing from a base.
const INHERITED_FIELDS: [CommunicationField; 2] = [
    CommunicationField::CommunicationType,
    CommunicationField::CommunicationPattern,
];

/// Form state of the communication editor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommunicationForm {
    pub base: SelectionList,
    pub name: String,
    pub base_type: String,
    pub fields: BTreeMap<CommunicationField, SelectionList>,
    /// Echo of the values last submitted.
    pub input: OutputWindow,
    pub output: OutputWindow,
}

impl CommunicationForm {
    pub fn field(&self, field: CommunicationField) -> Option<&SelectionList> {
        self.fields.get(&field)
    }
}

pub struct CommunicationEditor {
    store: Arc<dyn StoreReader>,
    form: Mutex<CommunicationForm>,
}

impl CommunicationEditor {
    pub fn new(store: Arc<dyn StoreReader>) -> Self {
        Self {
            store,
            form: Mutex::new(CommunicationForm::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CommunicationForm> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> CommunicationForm {
        self.lock().clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.lock().name = name.into();
    }

    /// Picks a base communication by name.
    pub fn select_base(&self, name: &str) -> ViewResult<()> {
        if name == DEFAULT_ENTITY_NAME {
            self.re_init();
            return Ok(());
        }
        let item = self
            .lock()
            .base
            .find(name)
            .cloned()
            .ok_or_else(|| ViewError::UnknownItem {
                list: BASE_SETTINGS_KEY,
                name: name.to_string(),
            })?;
        self.on_base_selection_changed(&item);
        Ok(())
    }

    pub fn select(&self, field: CommunicationField, names: &[&str]) -> ViewResult<()> {
        let mut form = self.lock();
        let list = form
            .fields
            .get_mut(&field)
            .ok_or(ViewError::NotReady("communication editor"))?;
        list.pick(field.key(), names)
    }

    /// The communication the form currently describes.
    pub fn draft(&self) -> Communication {
        let form = self.lock();
        let mut draft = Communication::new(form.name.clone(), form.base_type.clone());
        for (field, list) in &form.fields {
            *draft.field_mut(*field) = list.selected.clone();
        }
        draft
    }

    /// Saves the draft after echoing it to the input area.
    pub async fn submit(&self, loader: &Loader) -> ViewResult<Value> {
        let draft = self.draft();
        if draft.name.trim().is_empty() {
            return Err(ViewError::MissingField("name"));
        }
        if let Some(missing) = REQUIRED_FIELDS.iter().find(|f| draft.field(**f).is_empty()) {
            return Err(ViewError::MissingField(missing.key()));
        }

        let content = serde_json::to_value(&draft)?;
        self.echo_input(&content);
        Ok(loader
            .save(EntityKind::Communications, &draft.name, content)
            .await?)
    }

    fn echo_input(&self, content: &Value) {
        let mut form = self.lock();
        form.input.clear();
        let Value::Object(map) = content else {
            return;
        };
        for (key, value) in map {
            let rendered = match value {
                Value::Array(items) => items
                    .iter()
                    .map(|item| render_value(item.get("itemName").unwrap_or(item)))
                    .collect::<Vec<_>>()
                    .join(", "),
                other => render_value(other),
            };
            form.input.push_line(format!("{key}: {rendered}"));
        }
    }
}

impl Consumer for CommunicationEditor {
    fn re_init(&self) {
        let names = self.store.names(EntityKind::Communications);
        let settings = self.store.settings(EntityKind::Communications);
        let template = self.store.communication(DEFAULT_ENTITY_NAME);

        let Some(template) = template else {
            debug!("Communication editor waiting for the Default template");
            return;
        };
        if settings.is_empty() || names.is_empty() {
            debug!("Communication editor waiting for data");
            return;
        }

        let mut form = self.lock();
        form.base = SelectionList::with_settings(names.selectable(), &settings, BASE_SETTINGS_KEY);
        form.name.clear();
        form.base_type = DEFAULT_BASE_TYPE.to_string();
        form.fields = CommunicationField::ALL
            .into_iter()
            .map(|field| {
                let list =
                    SelectionList::with_settings(template.field(field).to_vec(), &settings, field.key());
                (field, list)
            })
            .collect();
    }

    fn display_result(&self, payload: &Value) {
        self.lock().output.append_result(payload);
    }

    fn on_base_selection_changed(&self, item: &DropDownListItem) {
        if item.item_name == DEFAULT_ENTITY_NAME {
            self.re_init();
            return;
        }
        let Some(base) = self.store.communication(&item.item_name) else {
            warn!("Base communication {} is not loaded", item.item_name);
            return;
        };

        let mut form = self.lock();
        form.base.selected = vec![item.clone()];
        form.name = synthesize_name(&item.item_name, NameTag::Communication);
        form.base_type = base.base_type.clone();

        for field in CommunicationField::ALL {
            let list = form.fields.entry(field).or_default();
            list.reset_items(base.field(field).to_vec());
            if INHERITED_FIELDS.contains(&field) {
                list.selected = base.field(field).to_vec();
            }
        }
        if let Some(list) = form.fields.get_mut(&CommunicationField::CommunicationType) {
            list.disable();
        }
    }
}
