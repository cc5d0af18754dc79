//! Consumer contract and notification fan-out.
//!
//! Consumers register under a role. The hub re-initializes every subscriber
//! after a successful load, but only once the readiness gate is open, and
//! routes result payloads to the subscribers owning a kind or the analysis.

use crate::readiness::{Readiness, ReadinessGate};
use crate::store::{SharedStore, StoreReader};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tanalyzer_types::{DropDownListItem, EntityKind, LoadClass};
use tracing::{debug, info};

/// A UI surface fed by the store.
///
/// `re_init` recomputes the consumer's whole derived view from the current
/// store contents. It must leave derived lists empty while the data it
/// depends on is missing, and running it twice without an intervening store
/// change must produce the same view.
pub trait Consumer: Send + Sync {
    fn re_init(&self);

    /// Renders an arbitrary result payload.
    fn display_result(&self, payload: &Value);

    /// A base item was picked in the "customize from base" selector.
    fn on_base_selection_changed(&self, item: &DropDownListItem);

    fn on_base_selection_cleared(&self) {
        self.re_init();
    }
}

/// The capability a consumer subscribes with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsumerRole {
    EnvironmentEditor,
    CommunicationEditor,
    Analysis,
}

impl ConsumerRole {
    /// Role that receives results of operations on a kind.
    pub const fn owner_of(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Environments => ConsumerRole::EnvironmentEditor,
            EntityKind::Communications => ConsumerRole::CommunicationEditor,
        }
    }
}

struct Subscription {
    role: ConsumerRole,
    consumer: Arc<dyn Consumer>,
}

/// Gated fan-out of re-initialization signals.
pub struct NotificationHub {
    subscriptions: RwLock<Vec<Subscription>>,
    store: SharedStore,
    readiness: Arc<Readiness>,
    gate: ReadinessGate,
    dispatches: AtomicUsize,
}

impl NotificationHub {
    pub fn new(store: SharedStore, readiness: Arc<Readiness>, gate: ReadinessGate) -> Self {
        Self {
            subscriptions: RwLock::new(Vec::new()),
            store,
            readiness,
            gate,
            dispatches: AtomicUsize::new(0),
        }
    }

    pub fn subscribe(&self, role: ConsumerRole, consumer: Arc<dyn Consumer>) {
        debug!("Subscribed {:?}", role);
        self.subscriptions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Subscription { role, consumer });
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriptions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn gate(&self) -> ReadinessGate {
        self.gate
    }

    /// Whether re-initialization would currently be dispatched.
    pub fn is_open(&self) -> bool {
        let bulk = self.store.load_state(LoadClass::Bulk);
        self.readiness.gate_open(self.gate, bulk)
    }

    /// How many times `notify_all` got past the gate.
    pub fn dispatch_count(&self) -> usize {
        self.dispatches.load(Ordering::Relaxed)
    }

    fn consumers(&self, role: Option<ConsumerRole>) -> Vec<Arc<dyn Consumer>> {
        self.subscriptions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|sub| role.is_none_or(|r| sub.role == r))
            .map(|sub| Arc::clone(&sub.consumer))
            .collect()
    }

    /// Re-initializes every subscriber if the gate is open; otherwise does
    /// nothing. Returns whether the signal was dispatched.
    pub fn notify_all(&self) -> bool {
        if !self.is_open() {
            debug!("Notification gate closed ({:?}), skipping re-init", self.gate);
            return false;
        }

        let consumers = self.consumers(None);
        for consumer in &consumers {
            consumer.re_init();
        }
        self.dispatches.fetch_add(1, Ordering::Relaxed);
        info!("Re-initialized {} consumers", consumers.len());
        true
    }

    /// Sends a payload to the subscribers of one role.
    pub fn display(&self, role: ConsumerRole, payload: &Value) {
        let consumers = self.consumers(Some(role));
        if consumers.is_empty() {
            debug!("No {:?} subscriber for result {}", role, payload);
        }
        for consumer in consumers {
            consumer.display_result(payload);
        }
    }

    /// Sends a payload to the owner of a kind.
    pub fn display_for_kind(&self, kind: EntityKind, payload: &Value) {
        self.display(ConsumerRole::owner_of(kind), payload);
    }
}
