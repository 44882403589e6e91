use flatgraph_types::EntityId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An entity whose reference fields hold identifiers instead of nested
/// objects.
///
/// Being a `NormalizedEntity` *is* the normalization marker: the engine only
/// resolves references on values of this type and treats plain JSON as raw.
/// It serializes as the bare field map, so the marker never reaches
/// persisted output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedEntity(Map<String, Value>);

impl NormalizedEntity {
    /// Wraps a field map whose references are already identifiers.
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// The entity's `id` field, if it holds an identifier.
    pub fn id(&self) -> Option<EntityId> {
        self.0.get("id").and_then(EntityId::from_value)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// The identifier stored in a single-reference field.
    pub fn reference_id(&self, field: &str) -> Option<EntityId> {
        self.0.get(field).and_then(EntityId::from_value)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// A plain JSON copy of the fields, with the marker dropped.
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Overlays `other`'s fields onto this entity; fields only present here
    /// are kept.
    pub fn merge_from(&mut self, other: NormalizedEntity) {
        for (k, v) in other.0 {
            self.0.insert(k, v);
        }
    }
}
