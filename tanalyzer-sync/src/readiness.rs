//! Per-kind readiness tokens.
//!
//! Each entity kind owns one token that flips to ready the first time its
//! bulk load succeeds. The all-ready combinator is what opens the default
//! notification gate. Tokens never flip back: a later failed reload leaves
//! the previously mirrored data in place.

use serde::{Deserialize, Serialize};
use tanalyzer_types::{EntityKind, LoadState};
use tokio::sync::watch;
use tracing::debug;

/// Which condition opens the notification gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessGate {
    /// Open once the bulk load of every kind has succeeded.
    #[default]
    AllKinds,
    /// Open while the shared `bulk` load state is `Success`, whichever kind
    /// set it last. A failed bulk load of one kind can be masked by the
    /// other kind completing after it.
    SharedBulkFlag,
}

/// Readiness tokens for both kinds.
#[derive(Debug)]
pub struct Readiness {
    environments: watch::Sender<bool>,
    communications: watch::Sender<bool>,
}

impl Default for Readiness {
    fn default() -> Self {
        Self::new()
    }
}

impl Readiness {
    pub fn new() -> Self {
        Self {
            environments: watch::channel(false).0,
            communications: watch::channel(false).0,
        }
    }

    fn token(&self, kind: EntityKind) -> &watch::Sender<bool> {
        match kind {
            EntityKind::Environments => &self.environments,
            EntityKind::Communications => &self.communications,
        }
    }

    pub fn mark_ready(&self, kind: EntityKind) {
        if !self.token(kind).send_replace(true) {
            debug!("{} ready", kind);
        }
    }

    pub fn is_ready(&self, kind: EntityKind) -> bool {
        *self.token(kind).borrow()
    }

    /// The all-ready combinator.
    pub fn all_ready(&self) -> bool {
        EntityKind::ALL.iter().all(|kind| self.is_ready(*kind))
    }

    /// Resolves once the given kind is ready.
    pub async fn wait_ready(&self, kind: EntityKind) {
        let mut rx = self.token(kind).subscribe();
        // The sender lives as long as `self`, so the wait cannot fail.
        let _ = rx.wait_for(|ready| *ready).await;
    }

    /// Resolves once every kind is ready.
    pub async fn wait_all(&self) {
        tokio::join!(
            self.wait_ready(EntityKind::Environments),
            self.wait_ready(EntityKind::Communications),
        );
    }

    /// Evaluates the gate. `bulk` is the shared bulk load state, consulted
    /// only by [`ReadinessGate::SharedBulkFlag`].
    pub fn gate_open(&self, gate: ReadinessGate, bulk: LoadState) -> bool {
        match gate {
            ReadinessGate::AllKinds => self.all_ready(),
            ReadinessGate::SharedBulkFlag => bulk.is_success(),
        }
    }
}
