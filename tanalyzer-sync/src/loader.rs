//! Load coordinator.
//!
//! Issues bulk loads, single loads, saves and analysis requests, interprets
//! the backend's response conventions, mutates the store and hands results
//! to the owning consumer. Every operation reports its outcome both ways:
//! to the consumer through the hub, and to the caller as a `SyncResult`.
//!
//! Failures never touch the collections. They mark the operation's load
//! class `Error` and show either the backend's error payload or the fixed
//! fatal payload. Nothing is retried.

use crate::error::{SyncError, SyncResult};
use crate::hub::{ConsumerRole, NotificationHub};
use crate::readiness::Readiness;
use crate::store::SharedStore;
use crate::transport::{BackendRequest, Transport, TransportError};
use serde_json::Value;
use std::sync::Arc;
use tanalyzer_types::{
    fatal_notification, is_application_error, is_save_success, Entity, EntityKind, LoadClass,
    LoadState, SettingsBlob, ERROR_KEY, SETTINGS_FILE_NAME,
};
use tracing::{debug, info, warn};

/// One load that failed during startup.
#[derive(Debug)]
pub struct StartupFailure {
    pub kind: EntityKind,
    pub class: LoadClass,
    pub error: SyncError,
}

/// Outcome of the concurrent startup loads.
#[derive(Debug, Default)]
pub struct StartupReport {
    pub failures: Vec<StartupFailure>,
}

impl StartupReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn record<T>(&mut self, kind: EntityKind, class: LoadClass, result: SyncResult<T>) {
        if let Err(error) = result {
            self.failures.push(StartupFailure { kind, class, error });
        }
    }
}

/// Drives backend requests and applies their results.
#[derive(Clone)]
pub struct Loader {
    transport: Arc<dyn Transport>,
    store: SharedStore,
    readiness: Arc<Readiness>,
    hub: Arc<NotificationHub>,
}

impl Loader {
    pub fn new(
        transport: Arc<dyn Transport>,
        store: SharedStore,
        readiness: Arc<Readiness>,
        hub: Arc<NotificationHub>,
    ) -> Self {
        Self {
            transport,
            store,
            readiness,
            hub,
        }
    }

    /// Loads both settings files and both collections concurrently.
    /// Completion order is whatever the transport yields.
    pub async fn start(&self) -> StartupReport {
        info!("Starting initial load");
        let (comm_settings, env_settings, envs, comms) = tokio::join!(
            self.load_single(EntityKind::Communications, SETTINGS_FILE_NAME),
            self.load_single(EntityKind::Environments, SETTINGS_FILE_NAME),
            self.load_multi(EntityKind::Environments),
            self.load_multi(EntityKind::Communications),
        );

        let mut report = StartupReport::default();
        report.record(EntityKind::Communications, LoadClass::Single, comm_settings);
        report.record(EntityKind::Environments, LoadClass::Single, env_settings);
        report.record(EntityKind::Environments, LoadClass::Bulk, envs);
        report.record(EntityKind::Communications, LoadClass::Bulk, comms);

        if report.is_complete() {
            info!("Initial load complete");
        } else {
            warn!("Initial load finished with {} failures", report.failures.len());
        }
        report
    }

    /// Replaces a kind's collection with the backend's. Returns the number
    /// of entities loaded.
    pub async fn load_multi(&self, kind: EntityKind) -> SyncResult<usize> {
        let role = ConsumerRole::owner_of(kind);
        let payload = self
            .fetch(BackendRequest::load_multi(kind), LoadClass::Bulk, role)
            .await?;

        let entities = match parse_collection(kind, payload) {
            Ok(entities) => entities,
            Err(e) => return Err(self.fail_fatal(LoadClass::Bulk, role, e)),
        };
        let count = entities.len();

        self.store.write(|store| {
            store.replace_all(kind, entities)?;
            store.set_load_state(LoadClass::Bulk, LoadState::Success);
            Ok::<_, SyncError>(())
        })?;
        self.readiness.mark_ready(kind);
        info!("Loaded {} {}", count, kind);

        self.hub.notify_all();
        Ok(count)
    }

    /// Loads one named file of a kind. The settings file replaces the kind's
    /// settings blob; any other file is appended to the collection.
    pub async fn load_single(&self, kind: EntityKind, name: &str) -> SyncResult<()> {
        let role = ConsumerRole::owner_of(kind);
        let payload = self
            .fetch(BackendRequest::load_single(kind, name), LoadClass::Single, role)
            .await?;

        if name == SETTINGS_FILE_NAME {
            let settings = match SettingsBlob::from_json(payload) {
                Ok(settings) => settings,
                Err(e) => return Err(self.fail_fatal(LoadClass::Single, role, e.into())),
            };
            self.store.write(|store| {
                store.set_settings(kind, settings);
                store.set_load_state(LoadClass::Single, LoadState::Success);
            });
            info!("Loaded {} settings", kind);
        } else {
            let entity = match Entity::from_json(kind, payload) {
                Ok(entity) => entity,
                Err(e) => return Err(self.fail_fatal(LoadClass::Single, role, e.into())),
            };
            let id = self.store.write(|store| {
                let id = store.append_one(entity);
                store.set_load_state(LoadClass::Single, LoadState::Success);
                id
            });
            info!("Loaded {}/{} (id {})", kind, name, id);
        }

        self.hub.notify_all();
        Ok(())
    }

    /// Saves `content` as file `name` of `kind`. The backend's answer is
    /// always shown to the kind's owner; on success the saved file is
    /// loaded back into the store.
    pub async fn save(&self, kind: EntityKind, name: &str, content: Value) -> SyncResult<Value> {
        let role = ConsumerRole::owner_of(kind);
        debug!("Saving {}/{}", kind, name);

        let payload = match self
            .transport
            .request(BackendRequest::create(kind, name, content))
            .await
        {
            Ok(payload) => payload,
            Err(e) => return Err(self.fail_transport(LoadClass::Save, role, e)),
        };
        self.hub.display(role, &payload);

        if !is_save_success(&payload) {
            warn!("Save of {}/{} rejected: {}", kind, name, payload);
            self.set_state(LoadClass::Save, LoadState::Error);
            return Err(SyncError::Rejected { payload });
        }

        self.set_state(LoadClass::Save, LoadState::Success);
        info!("Saved {}/{}", kind, name);

        if let Err(e) = self.load_single(kind, name).await {
            warn!("Reload of saved {}/{} failed: {}", kind, name, e);
        }
        Ok(payload)
    }

    /// Requests the transformation analysis between two environments for
    /// a communication of the first. The raw result goes to the analysis
    /// consumer; the store is never touched.
    pub async fn analyse(&self, env1: &str, env2: &str, old_comm: &str) -> SyncResult<Value> {
        let role = ConsumerRole::Analysis;
        debug!("Analysing {} -> {} for {}", env1, env2, old_comm);

        let payload = match self
            .transport
            .request(BackendRequest::analyse(env1, env2, old_comm))
            .await
        {
            Ok(payload) => payload,
            Err(e) => return Err(self.fail_transport(LoadClass::Analysis, role, e)),
        };
        self.hub.display(role, &payload);

        if is_analysis_error(&payload) {
            warn!("Analysis rejected: {}", payload);
            self.set_state(LoadClass::Analysis, LoadState::Error);
            return Err(SyncError::Rejected { payload });
        }

        self.set_state(LoadClass::Analysis, LoadState::Success);
        info!("Analysis complete");
        Ok(payload)
    }

    // ── Internals ────────────────────────────────────────────────

    /// Runs a load request and screens out transport failures and
    /// application errors.
    async fn fetch(
        &self,
        request: BackendRequest,
        class: LoadClass,
        role: ConsumerRole,
    ) -> SyncResult<Value> {
        let route = request.route();
        debug!("Request {}", route);

        let payload = match self.transport.request(request).await {
            Ok(payload) => payload,
            Err(e) => return Err(self.fail_transport(class, role, e)),
        };

        if is_application_error(&payload) {
            warn!("{} rejected: {}", route, payload);
            self.hub.display(role, &payload);
            self.set_state(class, LoadState::Error);
            return Err(SyncError::Rejected { payload });
        }
        Ok(payload)
    }

    fn set_state(&self, class: LoadClass, state: LoadState) {
        self.store.write(|store| store.set_load_state(class, state));
    }

    fn fail_transport(&self, class: LoadClass, role: ConsumerRole, error: TransportError) -> SyncError {
        self.fail_fatal(class, role, SyncError::Transport(error))
    }

    fn fail_fatal(&self, class: LoadClass, role: ConsumerRole, error: SyncError) -> SyncError {
        warn!("{} operation failed: {}", class, error);
        self.set_state(class, LoadState::Error);
        self.hub.display(role, &fatal_notification());
        error
    }
}

fn parse_collection(kind: EntityKind, payload: Value) -> SyncResult<Vec<Entity>> {
    match payload {
        Value::Array(items) => items
            .into_iter()
            .map(|item| Entity::from_json(kind, item).map_err(SyncError::from))
            .collect(),
        other => Err(SyncError::MalformedPayload(format!(
            "expected an array of {kind}, got {other}"
        ))),
    }
}

/// The backend reports analysis failures either as a plain error object or
/// as an array whose first part carries the error.
fn is_analysis_error(payload: &Value) -> bool {
    if is_application_error(payload) {
        return true;
    }
    payload
        .as_array()
        .and_then(|parts| parts.first())
        .is_some_and(|head| match head {
            Value::Object(map) => map.contains_key(ERROR_KEY),
            Value::Array(items) => items.iter().any(is_application_error),
            _ => false,
        })
}
