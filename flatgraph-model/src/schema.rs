use flatgraph_types::{EntityId, EntityType};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Describes which fields of an entity type point at other entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySchema {
    pub entity_type: EntityType,
    /// Field holding the entity's identifier.
    #[serde(default = "default_id_attribute")]
    pub id_attribute: String,
    /// Reference fields, in traversal order.
    #[serde(default)]
    pub references: Vec<RefField>,
}

fn default_id_attribute() -> String {
    "id".to_string()
}

impl EntitySchema {
    /// A schema with no reference fields.
    pub fn new(entity_type: EntityType) -> Self {
        Self {
            entity_type,
            id_attribute: default_id_attribute(),
            references: Vec::new(),
        }
    }

    /// Appends a reference field.
    #[must_use]
    pub fn with(mut self, field: RefField) -> Self {
        self.references.push(field);
        self
    }

    /// Looks up the reference declaration for `field`.
    pub fn reference(&self, field: &str) -> Option<&RefField> {
        self.references.iter().find(|r| r.field == field)
    }

    /// Reference fields whose target is this schema's own type.
    pub fn self_references(&self) -> impl Iterator<Item = &RefField> {
        self.references
            .iter()
            .filter(|r| r.target == self.entity_type)
    }

    /// Reads the identifier out of a raw entity object.
    pub fn id_of(&self, entity: &Map<String, Value>) -> Option<EntityId> {
        entity.get(&self.id_attribute).and_then(EntityId::from_value)
    }
}

/// A single reference field declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefField {
    pub field: String,
    pub kind: RefKind,
    pub target: EntityType,
    /// Members of a keyed self-reference that lack the field inherit the
    /// enclosing map during normalization.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub symmetric: bool,
}

impl RefField {
    fn new(field: &str, kind: RefKind, target: EntityType) -> Self {
        Self {
            field: field.into(),
            kind,
            target,
            symmetric: false,
        }
    }

    /// Shorthand for a field holding one entity.
    pub fn single(field: &str, target: EntityType) -> Self {
        Self::new(field, RefKind::Single, target)
    }

    /// Shorthand for a field holding an ordered list of entities.
    pub fn array(field: &str, target: EntityType) -> Self {
        Self::new(field, RefKind::Array, target)
    }

    /// Shorthand for a field holding a map of arbitrary keys to entities.
    pub fn keyed(field: &str, target: EntityType) -> Self {
        Self::new(field, RefKind::KeyedMap, target)
    }

    /// Marks the relation as symmetric (see [`RefField::symmetric`]).
    #[must_use]
    pub fn symmetric(mut self) -> Self {
        self.symmetric = true;
        self
    }

    /// True if the field points back at its owner's type.
    pub fn is_self_ref(&self, owner: EntityType) -> bool {
        self.target == owner
    }
}

/// Container shape of a reference field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefKind {
    Single,
    Array,
    KeyedMap,
}
