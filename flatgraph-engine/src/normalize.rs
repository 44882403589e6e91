//! Normalization: nested entity graph -> flat store.

use std::collections::HashSet;

use flatgraph_model::{
    EntitySchema, EntityStore, NormalizedEntity, RefField, RefKind, SchemaRegistry,
};
use flatgraph_types::{EntityId, EntityType};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::clique::Clique;
use crate::config::{DuplicatePolicy, EngineConfig};
use crate::error::{kind_of, EngineError, EngineResult};

/// Output of normalizing a single entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedOne {
    pub entities: EntityStore,
    pub result_id: EntityId,
    pub result: NormalizedEntity,
}

/// Output of normalizing an array of entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMany {
    pub entities: EntityStore,
}

/// Output of [`Normalizer::normalize`], shaped after its input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Normalized {
    One(NormalizedOne),
    Many(NormalizedMany),
}

impl Normalized {
    pub fn entities(&self) -> &EntityStore {
        match self {
            Self::One(one) => &one.entities,
            Self::Many(many) => &many.entities,
        }
    }

    pub fn into_entities(self) -> EntityStore {
        match self {
            Self::One(one) => one.entities,
            Self::Many(many) => many.entities,
        }
    }
}

/// Flattens raw entities into an [`EntityStore`] following a [`SchemaRegistry`].
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'e> {
    registry: &'e SchemaRegistry,
    config: &'e EngineConfig,
}

impl<'e> Normalizer<'e> {
    pub fn new(registry: &'e SchemaRegistry, config: &'e EngineConfig) -> Self {
        Self { registry, config }
    }

    /// Normalizes an entity object or an array of entity objects.
    pub fn normalize(&self, entity_type: EntityType, value: &Value) -> EngineResult<Normalized> {
        match value {
            Value::Array(_) => self.normalize_many(entity_type, value).map(Normalized::Many),
            _ => self.normalize_entity(entity_type, value).map(Normalized::One),
        }
    }

    /// Normalizes one entity object, returning the store fragment plus the
    /// root's id and normalized form.
    pub fn normalize_entity(
        &self,
        entity_type: EntityType,
        value: &Value,
    ) -> EngineResult<NormalizedOne> {
        schema_for(self.registry, entity_type)?;
        if !value.is_object() {
            return Err(EngineError::NotAnEntity {
                entity_type,
                found: kind_of(value),
            });
        }

        let mut walk = Walk::new(self.registry, self.config);
        let result_id = walk.visit(entity_type, value, None)?;
        let entities = walk.store;
        let result = entities
            .get(entity_type, &result_id)
            .cloned()
            .ok_or(EngineError::MissingId { entity_type })?;

        debug!(
            "Normalized {} {} ({} entities)",
            entity_type,
            result_id,
            entities.len()
        );
        Ok(NormalizedOne {
            entities,
            result_id,
            result,
        })
    }

    /// Normalizes an array of entities. Each element is walked on its own;
    /// identifiers among the elements are accepted and contribute nothing.
    pub fn normalize_many(
        &self,
        entity_type: EntityType,
        value: &Value,
    ) -> EngineResult<NormalizedMany> {
        schema_for(self.registry, entity_type)?;
        let Value::Array(items) = value else {
            return Err(EngineError::NotAnEntity {
                entity_type,
                found: kind_of(value),
            });
        };

        let mut walk = Walk::new(self.registry, self.config);
        for item in items {
            walk.visit(entity_type, item, None)?;
        }

        debug!(
            "Normalized {} {} items ({} entities)",
            items.len(),
            entity_type,
            walk.store.len()
        );
        Ok(NormalizedMany {
            entities: walk.store,
        })
    }
}

fn schema_for(registry: &SchemaRegistry, entity_type: EntityType) -> EngineResult<&EntitySchema> {
    registry
        .get(entity_type)
        .ok_or(EngineError::NoSchema(entity_type))
}

/// State of one normalize call.
struct Walk<'e> {
    registry: &'e SchemaRegistry,
    duplicates: DuplicatePolicy,
    store: EntityStore,
    /// Raw objects already entered. The input is borrowed for the whole call,
    /// so an object's address identifies it. Distinct copies of one entity
    /// are each walked and merged; an inherited clique map only re-reaches
    /// objects already in here.
    seen: HashSet<(EntityType, usize)>,
}

impl<'e> Walk<'e> {
    fn new(registry: &'e SchemaRegistry, config: &EngineConfig) -> Self {
        Self {
            registry,
            duplicates: config.duplicates,
            store: EntityStore::new(),
            seen: HashSet::new(),
        }
    }

    /// Normalizes `value` as an entity of `entity_type` and returns its id.
    /// Identifiers are taken as already normalized and returned unchanged.
    fn visit(
        &mut self,
        entity_type: EntityType,
        value: &Value,
        clique: Option<Clique<'_>>,
    ) -> EngineResult<EntityId> {
        if let Some(id) = EntityId::from_value(value) {
            return Ok(id);
        }
        let Value::Object(raw) = value else {
            return Err(EngineError::NotAnEntity {
                entity_type,
                found: kind_of(value),
            });
        };

        let registry = self.registry;
        let schema = schema_for(registry, entity_type)?;
        let id = schema
            .id_of(raw)
            .ok_or(EngineError::MissingId { entity_type })?;

        if !self.seen.insert((entity_type, std::ptr::from_ref(value) as usize)) {
            trace!("{} {} already entered, keeping id", entity_type, id);
            return Ok(id);
        }

        let mut fields: Map<String, Value> = raw.clone();
        for reference in &schema.references {
            // A member that lists nothing (absent or null) takes the clique's map.
            let inherited = clique.and_then(|c| c.inherited(reference));
            let current = match (raw.get(&reference.field), inherited) {
                (None | Some(Value::Null), Some(members)) => members,
                (Some(own), _) => own,
                (None, None) => continue,
            };
            let replaced = self.visit_reference(entity_type, reference, current)?;
            fields.insert(reference.field.clone(), replaced);
        }

        let entity = NormalizedEntity::from_map(fields);
        match self.duplicates {
            DuplicatePolicy::Merge => self.store.upsert(entity_type, &id, entity),
            DuplicatePolicy::Replace => {
                self.store.insert(entity_type, &id, entity);
            }
        }
        Ok(id)
    }

    /// Replaces the entities held by `owner.reference` with their ids.
    fn visit_reference(
        &mut self,
        owner: EntityType,
        reference: &RefField,
        value: &Value,
    ) -> EngineResult<Value> {
        if value.is_null() {
            return Ok(Value::Null);
        }

        let target = reference.target;
        match reference.kind {
            RefKind::Single => Ok(self.visit(target, value, None)?.to_value()),
            RefKind::Array => {
                let Value::Array(items) = value else {
                    return Err(invalid_reference(owner, reference, "array", value));
                };
                items
                    .iter()
                    .map(|item| self.visit(target, item, None).map(|id| id.to_value()))
                    .collect::<EngineResult<Vec<_>>>()
                    .map(Value::Array)
            }
            RefKind::KeyedMap => {
                let Value::Object(entries) = value else {
                    return Err(invalid_reference(owner, reference, "object", value));
                };
                let clique = Clique::enclosing(owner, reference, value);
                let mut ids = Map::new();
                for (key, item) in entries {
                    let id = self.visit(target, item, clique)?;
                    ids.insert(key.clone(), id.to_value());
                }
                Ok(Value::Object(ids))
            }
        }
    }
}

fn invalid_reference(
    owner: EntityType,
    reference: &RefField,
    expected: &'static str,
    found: &Value,
) -> EngineError {
    EngineError::InvalidReference {
        owner,
        field: reference.field.clone(),
        expected,
        found: kind_of(found),
    }
}
