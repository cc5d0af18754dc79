//! Transformation analysis view.
//!
//! The user picks the environment a communication runs in today, that
//! communication, and the environment it should move to. The backend answers
//! with up to three parts:
//!
//! 1. a header (required / possible)
//! 2. one block per candidate communication in the new environment
//! 3. the suggested communication
//!
//! Each part is a key-value object or an array of them.

use crate::error::{ViewError, ViewResult};
use crate::output::{merge_pairs, OutputWindow};
use crate::selection::SelectionList;
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tanalyzer_sync::{Consumer, Loader, StoreReader};
use tanalyzer_types::{DropDownListItem, EntityKind, DEFAULT_ENTITY_NAME};
use tracing::{debug, warn};

const OLD_ENVIRONMENT_KEY: &str = "oldEnvironment";
const OLD_COMMUNICATION_KEY: &str = "oldCommunication";
const NEW_ENVIRONMENT_KEY: &str = "newEnvironment";

const SECTION_RULE: &str = "-------------------------------------------";
const ITEM_RULE: &str = "**********************************************";

/// A parsed analysis answer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisReport {
    pub header: Map<String, Value>,
    pub items: Vec<Map<String, Value>>,
    pub suggestion: Option<Map<String, Value>>,
}

impl AnalysisReport {
    /// Splits an array payload into its parts. Returns `None` for anything
    /// that is not a non-empty array.
    pub fn from_payload(payload: &Value) -> Option<Self> {
        let parts = payload.as_array().filter(|parts| !parts.is_empty())?;
        let items = match parts.get(1) {
            Some(Value::Array(blocks)) => blocks.iter().map(merge_pairs).collect(),
            Some(other) => vec![merge_pairs(other)],
            None => Vec::new(),
        };
        Some(Self {
            header: merge_pairs(&parts[0]),
            items,
            suggestion: parts.get(2).map(merge_pairs),
        })
    }

    /// Writes the report: header, then a ruled block per item, then the
    /// suggestion.
    pub fn render(&self, out: &mut OutputWindow) {
        out.push_pairs(&self.header);

        if !self.items.is_empty() {
            out.push_line(SECTION_RULE);
            out.push_line("");
            for item in &self.items {
                out.push_pairs(item);
                out.push_line(ITEM_RULE);
            }
        }

        if let Some(suggestion) = &self.suggestion {
            out.push_line(SECTION_RULE);
            out.push_line("");
            out.push_pairs(suggestion);
        }
    }
}

/// The three names an analysis request needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub old_environment: String,
    pub old_communication: String,
    pub new_environment: String,
}

/// Form state of the analysis view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisForm {
    pub old_environment: SelectionList,
    pub old_communication: SelectionList,
    pub new_environment: SelectionList,
    pub output: OutputWindow,
}

pub struct AnalysisView {
    store: Arc<dyn StoreReader>,
    form: Mutex<AnalysisForm>,
}

impl AnalysisView {
    pub fn new(store: Arc<dyn StoreReader>) -> Self {
        Self {
            store,
            form: Mutex::new(AnalysisForm::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, AnalysisForm> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> AnalysisForm {
        self.lock().clone()
    }

    /// Picks the current environment; its supported communications become
    /// the old-communication choices.
    pub fn select_old_environment(&self, name: &str) -> ViewResult<()> {
        let item = self
            .lock()
            .old_environment
            .find(name)
            .cloned()
            .ok_or_else(|| ViewError::UnknownItem {
                list: OLD_ENVIRONMENT_KEY,
                name: name.to_string(),
            })?;
        self.on_base_selection_changed(&item);
        Ok(())
    }

    pub fn select_old_communication(&self, name: &str) -> ViewResult<()> {
        self.lock()
            .old_communication
            .pick(OLD_COMMUNICATION_KEY, &[name])
    }

    pub fn select_new_environment(&self, name: &str) -> ViewResult<()> {
        self.lock().new_environment.pick(NEW_ENVIRONMENT_KEY, &[name])
    }

    /// The request described by the current selections.
    pub fn request(&self) -> ViewResult<AnalysisRequest> {
        let form = self.lock();
        let first = |list: &SelectionList, key: &'static str| {
            list.first_selected()
                .map(|item| item.item_name.clone())
                .ok_or(ViewError::MissingField(key))
        };
        Ok(AnalysisRequest {
            old_environment: first(&form.old_environment, OLD_ENVIRONMENT_KEY)?,
            old_communication: first(&form.old_communication, OLD_COMMUNICATION_KEY)?,
            new_environment: first(&form.new_environment, NEW_ENVIRONMENT_KEY)?,
        })
    }

    /// Runs the analysis for the current selections. Selections are kept so
    /// the user still sees what was analysed.
    pub async fn submit(&self, loader: &Loader) -> ViewResult<Value> {
        let request = self.request()?;
        Ok(loader
            .analyse(
                &request.old_environment,
                &request.new_environment,
                &request.old_communication,
            )
            .await?)
    }
}

impl Consumer for AnalysisView {
    fn re_init(&self) {
        let settings = self.store.settings(EntityKind::Environments);
        let names = self.store.names(EntityKind::Environments);

        if settings.is_empty() || names.is_empty() {
            debug!("Analysis view waiting for data");
            return;
        }

        let environments = names.selectable();
        let mut form = self.lock();
        form.old_environment =
            SelectionList::with_settings(environments.clone(), &settings, OLD_ENVIRONMENT_KEY);
        form.old_communication =
            SelectionList::with_settings(Vec::new(), &settings, OLD_COMMUNICATION_KEY);
        form.new_environment =
            SelectionList::with_settings(environments, &settings, NEW_ENVIRONMENT_KEY);
    }

    fn display_result(&self, payload: &Value) {
        let mut form = self.lock();
        form.output.clear();
        match AnalysisReport::from_payload(payload) {
            Some(report) => report.render(&mut form.output),
            None => form.output.append_result(payload),
        }
    }

    fn on_base_selection_changed(&self, item: &DropDownListItem) {
        if item.item_name == DEFAULT_ENTITY_NAME {
            self.re_init();
            return;
        }
        let Some(env) = self.store.environment(&item.item_name) else {
            warn!("Environment {} is not loaded", item.item_name);
            return;
        };

        let mut form = self.lock();
        form.old_environment.selected = vec![item.clone()];
        form.old_communication.reset_items(env.supported_communications);
    }
}
