//! In-memory mirror of the backend collections.
//!
//! One slot per entity kind holds the collection in arrival order, its
//! positional name index and the kind's settings blob. Load states are
//! tracked per load class and shared across kinds.
//!
//! Reads follow a copy-on-read contract: [`EntityStore::content`] hands out
//! owned copies, while name indices and settings are shared behind `Arc`.
//! The store replaces or copies-on-write those `Arc`s when it mutates them,
//! so a reference a consumer retained never changes underneath it.

use crate::error::{SyncError, SyncResult};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tanalyzer_types::{
    Communication, Entity, EntityKind, Environment, LoadClass, LoadState, NameIndex,
    SettingsBlob,
};

#[derive(Debug, Default)]
struct KindSlot {
    entities: Vec<Entity>,
    names: Arc<NameIndex>,
    settings: Arc<SettingsBlob>,
}

/// Canonical collections, name indices, settings and load states.
#[derive(Debug, Default)]
pub struct EntityStore {
    environments: KindSlot,
    communications: KindSlot,
    states: HashMap<LoadClass, LoadState>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, kind: EntityKind) -> &KindSlot {
        match kind {
            EntityKind::Environments => &self.environments,
            EntityKind::Communications => &self.communications,
        }
    }

    fn slot_mut(&mut self, kind: EntityKind) -> &mut KindSlot {
        match kind {
            EntityKind::Environments => &mut self.environments,
            EntityKind::Communications => &mut self.communications,
        }
    }

    // ── Reads ────────────────────────────────────────────────────

    /// Returns an independent copy of the first entity named `name`, or
    /// `None` when the kind holds no such entity.
    pub fn content(&self, kind: EntityKind, name: &str) -> Option<Entity> {
        self.slot(kind)
            .entities
            .iter()
            .find(|entity| entity.name() == name)
            .cloned()
    }

    pub fn environment(&self, name: &str) -> Option<Environment> {
        self.content(EntityKind::Environments, name)
            .and_then(Entity::into_environment)
    }

    pub fn communication(&self, name: &str) -> Option<Communication> {
        self.content(EntityKind::Communications, name)
            .and_then(Entity::into_communication)
    }

    /// Shared name index of a kind.
    pub fn names(&self, kind: EntityKind) -> Arc<NameIndex> {
        Arc::clone(&self.slot(kind).names)
    }

    /// Shared settings blob of a kind.
    pub fn settings(&self, kind: EntityKind) -> Arc<SettingsBlob> {
        Arc::clone(&self.slot(kind).settings)
    }

    pub fn len(&self, kind: EntityKind) -> usize {
        self.slot(kind).entities.len()
    }

    pub fn is_empty(&self, kind: EntityKind) -> bool {
        self.slot(kind).entities.is_empty()
    }

    pub fn load_state(&self, class: LoadClass) -> LoadState {
        self.states.get(&class).copied().unwrap_or_default()
    }

    // ── Mutations ────────────────────────────────────────────────

    /// Replaces the whole collection of a kind and renumbers its index.
    ///
    /// Every entity must belong to `kind`; otherwise nothing changes.
    pub fn replace_all(&mut self, kind: EntityKind, entities: Vec<Entity>) -> SyncResult<()> {
        if let Some(stray) = entities.iter().find(|e| e.kind() != kind) {
            return Err(SyncError::KindMismatch {
                expected: kind,
                found: stray.kind(),
            });
        }

        let slot = self.slot_mut(kind);
        slot.names = Arc::new(NameIndex::from_names(
            entities.iter().map(|e| e.name().to_string()),
        ));
        slot.entities = entities;
        Ok(())
    }

    /// Appends one entity to its kind's collection. Duplicate names are
    /// accepted. Returns the id assigned in the name index.
    pub fn append_one(&mut self, entity: Entity) -> u32 {
        let slot = self.slot_mut(entity.kind());
        let id = Arc::make_mut(&mut slot.names).push(entity.name());
        slot.entities.push(entity);
        id
    }

    pub fn set_settings(&mut self, kind: EntityKind, settings: SettingsBlob) {
        self.slot_mut(kind).settings = Arc::new(settings);
    }

    pub fn set_load_state(&mut self, class: LoadClass, state: LoadState) {
        self.states.insert(class, state);
    }
}

/// Typed read-only view of the store, injected into consumers.
pub trait StoreReader: Send + Sync {
    fn content(&self, kind: EntityKind, name: &str) -> Option<Entity>;

    fn names(&self, kind: EntityKind) -> Arc<NameIndex>;

    fn settings(&self, kind: EntityKind) -> Arc<SettingsBlob>;

    fn load_state(&self, class: LoadClass) -> LoadState;

    fn environment(&self, name: &str) -> Option<Environment> {
        self.content(EntityKind::Environments, name)
            .and_then(Entity::into_environment)
    }

    fn communication(&self, name: &str) -> Option<Communication> {
        self.content(EntityKind::Communications, name)
            .and_then(Entity::into_communication)
    }
}

impl StoreReader for EntityStore {
    fn content(&self, kind: EntityKind, name: &str) -> Option<Entity> {
        EntityStore::content(self, kind, name)
    }

    fn names(&self, kind: EntityKind) -> Arc<NameIndex> {
        EntityStore::names(self, kind)
    }

    fn settings(&self, kind: EntityKind) -> Arc<SettingsBlob> {
        EntityStore::settings(self, kind)
    }

    fn load_state(&self, class: LoadClass) -> LoadState {
        EntityStore::load_state(self, class)
    }
}

/// Cloneable handle to the session's store.
///
/// Locks are held only for the duration of the closure, never across an
/// `.await` or while consumers run.
#[derive(Debug, Clone, Default)]
pub struct SharedStore(Arc<RwLock<EntityStore>>);

impl SharedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read<R>(&self, f: impl FnOnce(&EntityStore) -> R) -> R {
        let guard = self.0.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    pub fn write<R>(&self, f: impl FnOnce(&mut EntityStore) -> R) -> R {
        let mut guard = self.0.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    pub fn len(&self, kind: EntityKind) -> usize {
        self.read(|store| store.len(kind))
    }
}

impl StoreReader for SharedStore {
    fn content(&self, kind: EntityKind, name: &str) -> Option<Entity> {
        self.read(|store| store.content(kind, name))
    }

    fn names(&self, kind: EntityKind) -> Arc<NameIndex> {
        self.read(|store| store.names(kind))
    }

    fn settings(&self, kind: EntityKind) -> Arc<SettingsBlob> {
        self.read(|store| store.settings(kind))
    }

    fn load_state(&self, class: LoadClass) -> LoadState {
        self.read(|store| store.load_state(class))
    }
}
