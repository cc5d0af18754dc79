//! Session wiring.
//!
//! A session owns one store, one set of readiness tokens, one hub and the
//! loader driving them. Consumers are subscribed before `start`.

use crate::config::SyncConfig;
use crate::error::SyncResult;
use crate::http::HttpTransport;
use crate::hub::{Consumer, ConsumerRole, NotificationHub};
use crate::loader::{Loader, StartupReport};
use crate::readiness::Readiness;
use crate::store::SharedStore;
use crate::transport::Transport;
use std::sync::Arc;

/// Everything one UI session needs to mirror the backend.
pub struct Session {
    store: SharedStore,
    readiness: Arc<Readiness>,
    hub: Arc<NotificationHub>,
    loader: Loader,
}

impl Session {
    /// Creates a session over an arbitrary transport.
    pub fn new(transport: Arc<dyn Transport>, config: &SyncConfig) -> Self {
        let store = SharedStore::new();
        let readiness = Arc::new(Readiness::new());
        let hub = Arc::new(NotificationHub::new(
            store.clone(),
            Arc::clone(&readiness),
            config.readiness_gate,
        ));
        let loader = Loader::new(
            transport,
            store.clone(),
            Arc::clone(&readiness),
            Arc::clone(&hub),
        );

        Self {
            store,
            readiness,
            hub,
            loader,
        }
    }

    /// Creates a session talking HTTP to `config.servlet_url`.
    pub fn over_http(config: &SyncConfig) -> SyncResult<Self> {
        config.validate()?;
        let transport = HttpTransport::new(config.http())?;
        Ok(Self::new(Arc::new(transport), config))
    }

    pub fn subscribe(&self, role: ConsumerRole, consumer: Arc<dyn Consumer>) {
        self.hub.subscribe(role, consumer);
    }

    /// Runs the startup loads.
    pub async fn start(&self) -> StartupReport {
        self.loader.start().await
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn readiness(&self) -> &Arc<Readiness> {
        &self.readiness
    }

    pub fn hub(&self) -> &Arc<NotificationHub> {
        &self.hub
    }

    pub fn loader(&self) -> &Loader {
        &self.loader
    }
}
