use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use tanalyzer_sync::{EntityStore, SharedStore, StoreReader, SyncError};
use tanalyzer_types::{
    Communication, DropDownListItem, Entity, EntityKind, Environment, LoadClass, LoadState,
    SettingsBlob,
};

fn env(name: &str) -> Entity {
    Environment::new(name).with_communication("MQTT").into()
}

fn comm(name: &str) -> Entity {
    Communication::new(name, "MessageBased").into()
}

// ── replace_all ──────────────────────────────────────────────────

#[test]
fn replace_all_rebuilds_name_index() {
    let mut store = EntityStore::new();
    store
        .replace_all(EntityKind::Environments, vec![env("Default"), env("EnvA")])
        .unwrap();

    assert_eq!(
        store.names(EntityKind::Environments).items(),
        &[
            DropDownListItem::new(1, "Default"),
            DropDownListItem::new(2, "EnvA"),
        ]
    );
    assert_eq!(store.len(EntityKind::Environments), 2);
    assert!(store.is_empty(EntityKind::Communications));
}

#[test]
fn replace_all_discards_previous_collection() {
    let mut store = EntityStore::new();
    store
        .replace_all(EntityKind::Environments, vec![env("A"), env("B"), env("C")])
        .unwrap();
    store
        .replace_all(EntityKind::Environments, vec![env("Z")])
        .unwrap();

    assert_eq!(store.len(EntityKind::Environments), 1);
    assert!(store.content(EntityKind::Environments, "A").is_none());
    assert_eq!(
        store.names(EntityKind::Environments).items(),
        &[DropDownListItem::new(1, "Z")]
    );
}

#[test]
fn replace_all_rejects_wrong_kind_without_mutating() {
    let mut store = EntityStore::new();
    store
        .replace_all(EntityKind::Environments, vec![env("Keep")])
        .unwrap();

    let err = store
        .replace_all(EntityKind::Environments, vec![env("A"), comm("MQTT")])
        .unwrap_err();
    assert!(matches!(
        err,
        SyncError::KindMismatch {
            expected: EntityKind::Environments,
            found: EntityKind::Communications
        }
    ));
    assert!(store.content(EntityKind::Environments, "Keep").is_some());
    assert_eq!(store.names(EntityKind::Environments).len(), 1);
}

// ── append_one ───────────────────────────────────────────────────

#[test]
fn append_one_grows_collection_and_index_by_one() {
    let mut store = EntityStore::new();
    store
        .replace_all(EntityKind::Environments, vec![env("Default"), env("EnvA")])
        .unwrap();

    let id = store.append_one(env("EnvB"));

    assert_eq!(id, 3);
    assert_eq!(store.len(EntityKind::Environments), 3);
    assert_eq!(store.names(EntityKind::Environments).len(), 3);
    assert_eq!(
        store.names(EntityKind::Environments).items()[2],
        DropDownListItem::new(3, "EnvB")
    );
}

#[test]
fn append_one_accepts_duplicate_names() {
    let mut store = EntityStore::new();
    store.append_one(env("EnvA"));
    store.append_one(env("EnvA"));
    assert_eq!(store.len(EntityKind::Environments), 2);
    assert_eq!(store.names(EntityKind::Environments).len(), 2);
}

#[test]
fn append_one_routes_by_entity_kind() {
    let mut store = EntityStore::new();
    store.append_one(comm("MQTT"));
    assert_eq!(store.len(EntityKind::Communications), 1);
    assert_eq!(store.len(EntityKind::Environments), 0);
}

// ── content ──────────────────────────────────────────────────────

#[test]
fn content_returns_independent_copies() {
    let mut store = EntityStore::new();
    store.append_one(env("EnvA"));

    let mut first = store.environment("EnvA").unwrap();
    first.name = "Changed".into();
    first.supported_communications.clear();

    let second = store.environment("EnvA").unwrap();
    assert_eq!(second.name, "EnvA");
    assert_eq!(second.supported_communications.len(), 1);
}

#[test]
fn content_missing_is_none() {
    let store = EntityStore::new();
    assert!(store.content(EntityKind::Environments, "Nope").is_none());
    assert!(store.communication("Nope").is_none());
}

#[test]
fn content_returns_first_match() {
    let mut store = EntityStore::new();
    store.append_one(Environment::new("Dup").with_communication("first").into());
    store.append_one(Environment::new("Dup").with_communication("second").into());
    let found = store.environment("Dup").unwrap();
    assert_eq!(found.supported_communications[0].item_name, "first");
}

// ── Shared references ────────────────────────────────────────────

#[test]
fn retained_names_do_not_change_after_append() {
    let mut store = EntityStore::new();
    store.append_one(env("EnvA"));
    let retained = store.names(EntityKind::Environments);

    store.append_one(env("EnvB"));

    assert_eq!(retained.len(), 1);
    assert_eq!(store.names(EntityKind::Environments).len(), 2);
}

#[test]
fn names_are_shared_until_mutation() {
    let mut store = EntityStore::new();
    store.append_one(env("EnvA"));
    let a = store.names(EntityKind::Environments);
    let b = store.names(EntityKind::Environments);
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn settings_default_empty_and_replaceable() {
    let mut store = EntityStore::new();
    assert!(store.settings(EntityKind::Environments).is_empty());

    let blob = SettingsBlob::from_json(json!({ "baseEnvironment": {} })).unwrap();
    store.set_settings(EntityKind::Environments, blob);

    assert_eq!(store.settings(EntityKind::Environments).len(), 1);
    assert!(store.settings(EntityKind::Communications).is_empty());
}

// ── Load states ──────────────────────────────────────────────────

#[test]
fn load_states_start_not_initialized() {
    let store = EntityStore::new();
    for class in LoadClass::ALL {
        assert_eq!(store.load_state(class), LoadState::NotInitialized);
    }
}

#[test]
fn load_state_is_per_class() {
    let mut store = EntityStore::new();
    store.set_load_state(LoadClass::Bulk, LoadState::Error);
    assert_eq!(store.load_state(LoadClass::Bulk), LoadState::Error);
    assert_eq!(store.load_state(LoadClass::Single), LoadState::NotInitialized);
}

// ── SharedStore ──────────────────────────────────────────────────

#[test]
fn shared_store_clones_see_same_data() {
    let store = SharedStore::new();
    let other = store.clone();
    store.write(|s| s.append_one(env("EnvA")));

    assert_eq!(other.len(EntityKind::Environments), 1);
    let reader: &dyn StoreReader = &other;
    assert_eq!(reader.environment("EnvA").unwrap().name, "EnvA");
    assert_eq!(reader.names(EntityKind::Environments).len(), 1);
}
