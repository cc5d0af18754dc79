//! Environment editor.
//!
//! Lets the user create an environment from scratch or customize an
//! existing one. Picking a base preselects its supported communications and
//! proposes a fresh name.

use crate::error::{ViewError, ViewResult};
use crate::naming::{synthesize_name, NameTag};
use crate::output::OutputWindow;
use crate::selection::SelectionList;
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tanalyzer_sync::{Consumer, Loader, StoreReader};
use tanalyzer_types::{DropDownListItem, EntityKind, Environment, DEFAULT_ENTITY_NAME};
use tracing::{debug, warn};

const BASE_SETTINGS_KEY: &str = "baseEnvironment";
const SUPPORTED_SETTINGS_KEY: &str = "supportedCommunications";

/// Form state of the environment editor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvironmentForm {
    pub base: SelectionList,
    pub supported_communications: SelectionList,
    pub name: String,
    pub output: OutputWindow,
}

pub struct EnvironmentEditor {
    store: Arc<dyn StoreReader>,
    form: Mutex<EnvironmentForm>,
}

impl EnvironmentEditor {
    pub fn new(store: Arc<dyn StoreReader>) -> Self {
        Self {
            store,
            form: Mutex::new(EnvironmentForm::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, EnvironmentForm> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> EnvironmentForm {
        self.lock().clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.lock().name = name.into();
    }

    /// Picks a base environment by name.
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

    pub fn select_communications(&self, names: &[&str]) -> ViewResult<()> {
        self.lock()
            .supported_communications
            .pick(SUPPORTED_SETTINGS_KEY, names)
    }

    /// The environment the form currently describes.
    pub fn draft(&self) -> Environment {
        let form = self.lock();
        Environment {
            name: form.name.clone(),
            supported_communications: form.supported_communications.selected.clone(),
        }
    }

    /// Saves the draft. The backend's answer also lands in the output.
    pub async fn submit(&self, loader: &Loader) -> ViewResult<Value> {
        let draft = self.draft();
        if draft.name.trim().is_empty() {
            return Err(ViewError::MissingField("name"));
        }
        if draft.supported_communications.is_empty() {
            return Err(ViewError::MissingField(SUPPORTED_SETTINGS_KEY));
        }
        let content = serde_json::to_value(&draft)?;
        Ok(loader
            .save(EntityKind::Environments, &draft.name, content)
            .await?)
    }
}

impl Consumer for EnvironmentEditor {
    fn re_init(&self) {
        let env_names = self.store.names(EntityKind::Environments);
        let comm_names = self.store.names(EntityKind::Communications);
        let settings = self.store.settings(EntityKind::Environments);

        if settings.is_empty() || env_names.is_empty() || comm_names.is_empty() {
            debug!("Environment editor waiting for data");
            return;
        }

        let mut form = self.lock();
        form.base = SelectionList::with_settings(env_names.selectable(), &settings, BASE_SETTINGS_KEY);
        form.supported_communications =
            SelectionList::with_settings(comm_names.selectable(), &settings, SUPPORTED_SETTINGS_KEY);
        form.name.clear();
    }

    fn display_result(&self, payload: &Value) {
        self.lock().output.append_result(payload);
    }

    fn on_base_selection_changed(&self, item: &DropDownListItem) {
        if item.item_name == DEFAULT_ENTITY_NAME {
            self.re_init();
            return;
        }
        let Some(base) = self.store.environment(&item.item_name) else {
            warn!("Base environment {} is not loaded", item.item_name);
            return;
        };
        let comm_names = self.store.names(EntityKind::Communications);

        let mut form = self.lock();
        form.base.selected = vec![item.clone()];
        form.name = synthesize_name(&item.item_name, NameTag::Environment);
        form.supported_communications.items = comm_names.selectable();
        form.supported_communications.selected = base.supported_communications;
    }
}
