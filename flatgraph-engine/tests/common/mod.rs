//! Shared fixtures for engine tests.

#![allow(dead_code)]

use flatgraph_engine::EntityEngine;
use flatgraph_model::{EntityStore, NormalizedEntity};
use serde_json::{json, Value};

pub fn engine() -> EntityEngine {
    EntityEngine::cms()
}

/// Wraps a JSON object as an already-normalized entity.
pub fn normalized(value: Value) -> NormalizedEntity {
    match value {
        Value::Object(map) => NormalizedEntity::from_map(map),
        other => panic!("fixture is not an object: {other}"),
    }
}

/// Builds a store from its serialized `{type: {id: entity}}` form.
pub fn store(value: Value) -> EntityStore {
    serde_json::from_value(value).expect("fixture store")
}

/// Folder 1 owned by user 10, with subfolder 2 owned by the same user.
pub fn folder_scenario() -> Value {
    json!({
        "id": 1,
        "name": "Root",
        "creator": {"id": 10, "login": "ann"},
        "subfolders": [
            {
                "id": 2,
                "name": "Sub",
                "creator": {"id": 10, "login": "ann"},
                "subfolders": []
            }
        ]
    })
}

/// Page 1 (de) listing itself and page 2 (en) as language variants;
/// page 2 does not carry its own list.
pub fn language_clique() -> Value {
    json!({
        "id": 1,
        "language": "de",
        "template": {"id": 5, "name": "Article"},
        "languageVariants": {
            "de": {"id": 1, "language": "de"},
            "en": {"id": 2, "language": "en", "template": {"id": 5, "name": "Article"}}
        }
    })
}

/// True if every entity in `sub` is present, identically, in `sup`.
pub fn is_subset(sub: &EntityStore, sup: &EntityStore) -> bool {
    sub.iter()
        .all(|(t, key, entity)| sup.get_key(t, key) == Some(entity))
}
