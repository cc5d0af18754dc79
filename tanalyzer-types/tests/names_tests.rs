use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tanalyzer_types::{DropDownListItem, NameIndex};

// ── Rebuild ───────────────────────────────────────────────────────

#[test]
fn rebuild_numbers_by_position() {
    let index = NameIndex::from_names(["Default", "EnvA"]);
    assert_eq!(
        index.items(),
        &[
            DropDownListItem::new(1, "Default"),
            DropDownListItem::new(2, "EnvA"),
        ]
    );
}

#[test]
fn rebuild_discards_previous_entries() {
    let mut index = NameIndex::from_names(["a", "b", "c"]);
    index.rebuild(["z"]);
    assert_eq!(index.len(), 1);
    assert_eq!(index.items()[0], DropDownListItem::new(1, "z"));
}

#[test]
fn empty_index() {
    let index = NameIndex::new();
    assert!(index.is_empty());
    assert!(index.selectable().is_empty());
}

// ── Push ──────────────────────────────────────────────────────────

#[test]
fn push_assigns_len_plus_one() {
    let mut index = NameIndex::from_names(["Default", "EnvA"]);
    let id = index.push("EnvB");
    assert_eq!(id, 3);
    assert_eq!(index.items()[2], DropDownListItem::new(3, "EnvB"));
}

#[test]
fn push_allows_duplicate_names() {
    let mut index = NameIndex::from_names(["EnvA"]);
    index.push("EnvA");
    assert_eq!(index.len(), 2);
    assert_eq!(index.iter().filter(|i| i.item_name == "EnvA").count(), 2);
}

// ── Selectable ────────────────────────────────────────────────────

#[test]
fn selectable_filters_default_and_keeps_ids() {
    let index = NameIndex::from_names(["Default", "EnvA", "EnvB"]);
    assert_eq!(
        index.selectable(),
        vec![
            DropDownListItem::new(2, "EnvA"),
            DropDownListItem::new(3, "EnvB"),
        ]
    );
    assert!(index.contains("Default"));
}

#[test]
fn serializes_as_item_array() {
    let index = NameIndex::from_names(["EnvA"]);
    let json = serde_json::to_value(&index).unwrap();
    assert_eq!(json, serde_json::json!([{ "id": 1, "itemName": "EnvA" }]));
}

// ── Properties ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn ids_are_positional_after_any_pushes(
        initial in proptest::collection::vec("[a-zA-Z]{1,8}", 0..16),
        appended in proptest::collection::vec("[a-zA-Z]{1,8}", 0..16),
    ) {
        let mut index = NameIndex::from_names(initial.clone());
        for name in &appended {
            let before = index.len();
            let id = index.push(name.clone());
            prop_assert_eq!(index.len(), before + 1);
            prop_assert_eq!(id as usize, index.len());
        }
        prop_assert_eq!(index.len(), initial.len() + appended.len());
        for (pos, item) in index.iter().enumerate() {
            prop_assert_eq!(item.id as usize, pos + 1);
        }
    }
}
