use flatgraph_model::{EntityId, EntityStore, EntityType, NormalizedEntity};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn entity(value: Value) -> NormalizedEntity {
    match value {
        Value::Object(map) => NormalizedEntity::from_map(map),
        other => panic!("not an object: {other}"),
    }
}

// ── NormalizedEntity ─────────────────────────────────────────────

#[test]
fn entity_id_and_reference_id() {
    let e = entity(json!({"id": 3, "creator": 10, "name": "Docs"}));
    assert_eq!(e.id(), Some(EntityId::Num(3)));
    assert_eq!(e.reference_id("creator"), Some(EntityId::Num(10)));
    assert_eq!(e.reference_id("name"), Some(EntityId::from("Docs")));
    assert_eq!(e.reference_id("missing"), None);
}

#[test]
fn serializes_without_any_marker() {
    let e = entity(json!({"id": 1, "name": "a"}));
    assert_eq!(serde_json::to_value(&e).unwrap(), json!({"id": 1, "name": "a"}));
    assert_eq!(e.to_value(), json!({"id": 1, "name": "a"}));
}

#[test]
fn merge_from_overlays_fields() {
    let mut e = entity(json!({"id": 1, "name": "old", "creator": 10}));
    e.merge_from(entity(json!({"id": 1, "name": "new"})));
    assert_eq!(e.into_value(), json!({"id": 1, "name": "new", "creator": 10}));
}

// ── EntityStore ──────────────────────────────────────────────────

#[test]
fn new_store_is_empty() {
    let s = EntityStore::new();
    assert!(s.is_empty());
    assert_eq!(s.len(), 0);
    assert!(s.slice(EntityType::Folder).is_none());
}

#[test]
fn insert_and_get() {
    let mut s = EntityStore::new();
    let id = EntityId::Num(1);
    assert!(s.insert(EntityType::Folder, &id, entity(json!({"id": 1}))).is_none());
    assert!(s.contains(EntityType::Folder, &id));
    assert!(!s.contains(EntityType::Page, &id));
    assert_eq!(s.get_key(EntityType::Folder, "1").unwrap().id(), Some(id));
}

#[test]
fn numeric_and_string_ids_share_a_slot() {
    let mut s = EntityStore::new();
    s.insert(EntityType::User, &EntityId::Num(5), entity(json!({"id": 5})));
    assert!(s.get(EntityType::User, &EntityId::from("5")).is_some());
}

#[test]
fn insert_replaces_wholesale() {
    let mut s = EntityStore::new();
    let id = EntityId::Num(1);
    s.insert(EntityType::User, &id, entity(json!({"id": 1, "email": "a@b"})));
    let old = s.insert(EntityType::User, &id, entity(json!({"id": 1})));
    assert!(old.is_some());
    assert_eq!(s.get(EntityType::User, &id).unwrap().get("email"), None);
}

#[test]
fn upsert_merges_shallowly() {
    let mut s = EntityStore::new();
    let id = EntityId::Num(1);
    s.upsert(EntityType::User, &id, entity(json!({"id": 1, "email": "a@b"})));
    s.upsert(EntityType::User, &id, entity(json!({"id": 1, "firstName": "Ann"})));
    assert_eq!(
        s.get(EntityType::User, &id).unwrap().to_value(),
        json!({"id": 1, "email": "a@b", "firstName": "Ann"})
    );
}

#[test]
fn merge_replaces_per_id_and_keeps_others() {
    let mut a = EntityStore::new();
    a.insert(EntityType::User, &EntityId::Num(1), entity(json!({"id": 1, "v": "a"})));
    a.insert(EntityType::User, &EntityId::Num(2), entity(json!({"id": 2})));
    let mut b = EntityStore::new();
    b.insert(EntityType::User, &EntityId::Num(1), entity(json!({"id": 1})));
    b.insert(EntityType::Group, &EntityId::Num(7), entity(json!({"id": 7})));

    a.merge(b);
    assert_eq!(a.len(), 3);
    assert_eq!(a.get(EntityType::User, &EntityId::Num(1)).unwrap().get("v"), None);
    assert_eq!(a.types().collect::<Vec<_>>(), vec![EntityType::Group, EntityType::User]);
}

#[test]
fn store_serde_shape() {
    let mut s = EntityStore::new();
    s.insert(EntityType::Folder, &EntityId::Num(1), entity(json!({"id": 1, "subfolders": [2]})));
    s.insert(EntityType::User, &EntityId::Num(10), entity(json!({"id": 10})));
    let value = serde_json::to_value(&s).unwrap();
    assert_eq!(
        value,
        json!({
            "folder": {"1": {"id": 1, "subfolders": [2]}},
            "user": {"10": {"id": 10}}
        })
    );
    let back: EntityStore = serde_json::from_value(value).unwrap();
    assert_eq!(back, s);
}

#[test]
fn iter_visits_every_entity() {
    let mut s = EntityStore::new();
    s.insert(EntityType::Folder, &EntityId::Num(1), entity(json!({"id": 1})));
    s.insert(EntityType::Folder, &EntityId::Num(2), entity(json!({"id": 2})));
    s.insert(EntityType::User, &EntityId::Num(3), entity(json!({"id": 3})));
    let keys: Vec<_> = s.iter().map(|(t, k, _)| format!("{t}:{k}")).collect();
    assert_eq!(keys, vec!["folder:1", "folder:2", "user:3"]);
}
