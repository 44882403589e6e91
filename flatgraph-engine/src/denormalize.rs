//! Denormalization: flat store -> nested entity.
//!
//! Only [`NormalizedEntity`] values have their identifiers resolved, down
//! through any inline objects they hold; plain JSON is treated as already
//! nested and only post-processed. References
//! are resolved recursively against the store, except that an entity
//! reached through a self-referential field is truncated per the
//! [`PruneTable`](flatgraph_model::PruneTable).

use std::collections::HashSet;

use flatgraph_model::{EntityStore, NormalizedEntity, PruneRule, RefField, RefKind, SchemaRegistry};
use flatgraph_types::{EntityId, EntityType};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::config::{EngineConfig, MissingReferencePolicy};
use crate::error::{EngineError, EngineResult};
use crate::postprocess::PostProcessor;

/// Anything `denormalize` accepts as its entity argument.
#[derive(Debug, Clone, Copy)]
pub enum EntityInput<'a> {
    /// No entity (`None` or JSON `null`).
    Absent,
    /// A normalized entity; identifier fields are resolved.
    Normalized(&'a NormalizedEntity),
    /// Raw JSON. Objects are passed through post-processing, identifiers
    /// are looked up in the store.
    Value(&'a Value),
}

impl<'a> From<&'a NormalizedEntity> for EntityInput<'a> {
    fn from(entity: &'a NormalizedEntity) -> Self {
        Self::Normalized(entity)
    }
}

impl<'a> From<Option<&'a NormalizedEntity>> for EntityInput<'a> {
    fn from(entity: Option<&'a NormalizedEntity>) -> Self {
        entity.map_or(Self::Absent, Self::Normalized)
    }
}

impl<'a> From<&'a Value> for EntityInput<'a> {
    fn from(value: &'a Value) -> Self {
        if value.is_null() {
            Self::Absent
        } else {
            Self::Value(value)
        }
    }
}

impl<'a> From<Option<&'a Value>> for EntityInput<'a> {
    fn from(value: Option<&'a Value>) -> Self {
        value.map_or(Self::Absent, Self::from)
    }
}

/// Rebuilds nested entities from an [`EntityStore`].
#[derive(Debug, Clone, Copy)]
pub struct Denormalizer<'e> {
    registry: &'e SchemaRegistry,
    post: PostProcessor<'e>,
    config: &'e EngineConfig,
}

impl<'e> Denormalizer<'e> {
    pub fn new(registry: &'e SchemaRegistry, post: PostProcessor<'e>, config: &'e EngineConfig) -> Self {
        Self {
            registry,
            post,
            config,
        }
    }

    /// Denormalizes `entity` as a `entity_type` against `store`.
    ///
    /// Returns `Ok(None)` for an absent entity. The store is only read.
    pub fn denormalize<'a>(
        &self,
        entity_type: EntityType,
        entity: impl Into<EntityInput<'a>>,
        store: &EntityStore,
    ) -> EngineResult<Option<Value>> {
        let mut resolve = Resolve {
            denormalizer: *self,
            store,
            path: HashSet::new(),
        };
        let result = match entity.into() {
            EntityInput::Absent => None,
            EntityInput::Normalized(entity) => {
                Some(resolve.entity(entity_type, entity.fields().clone(), true, None)?)
            }
            EntityInput::Value(Value::Object(fields)) => {
                Some(resolve.entity(entity_type, fields.clone(), false, None)?)
            }
            EntityInput::Value(value) => resolve.member(entity_type, value.clone(), true, None)?,
        };
        debug!(
            "Denormalized {} ({})",
            entity_type,
            if result.is_some() { "found" } else { "absent" }
        );
        Ok(result)
    }

    /// Looks `id` up in the store and denormalizes it. A missing root is
    /// `Ok(None)` regardless of the missing-reference policy.
    pub fn denormalize_id(
        &self,
        entity_type: EntityType,
        id: &EntityId,
        store: &EntityStore,
    ) -> EngineResult<Option<Value>> {
        self.denormalize(entity_type, store.get(entity_type, id), store)
    }
}

/// State of one denormalize call.
struct Resolve<'e, 's> {
    denormalizer: Denormalizer<'e>,
    store: &'s EntityStore,
    /// Stored entities currently being resolved.
    path: HashSet<(EntityType, String)>,
}

impl<'e, 's> Resolve<'e, 's> {
    /// Builds the nested form of one entity.
    ///
    /// `rule` is the truncation rule of the field the entity was reached
    /// through; `normalized` says whether identifier fields are resolved.
    fn entity(
        &mut self,
        entity_type: EntityType,
        mut fields: Map<String, Value>,
        normalized: bool,
        rule: Option<&PruneRule>,
    ) -> EngineResult<Value> {
        let post = self.denormalizer.post;
        if let Some(rule) = rule {
            post.apply(rule, &mut fields);
        }

        let registry = self.denormalizer.registry;
        let Some(schema) = registry.get(entity_type) else {
            return Ok(Value::Object(fields));
        };

        let mut path_key = None;
        if normalized {
            if let Some(id) = schema.id_of(&fields) {
                let key = (entity_type, id.key());
                if self.path.insert(key.clone()) {
                    path_key = Some(key);
                }
            }
        }

        for reference in &schema.references {
            let Some(current) = fields.remove(&reference.field) else {
                continue;
            };
            if let Some(resolved) = self.reference(entity_type, reference, current, normalized)? {
                fields.insert(reference.field.clone(), resolved);
            }
        }

        if let Some(key) = path_key {
            self.path.remove(&key);
        }
        Ok(Value::Object(fields))
    }

    /// Resolves the value held by `owner.reference`. `None` drops the field.
    fn reference(
        &mut self,
        owner: EntityType,
        reference: &RefField,
        value: Value,
        resolve_ids: bool,
    ) -> EngineResult<Option<Value>> {
        let rule = self.denormalizer.post.rule_for(owner, &reference.field);
        let target = reference.target;

        match (reference.kind, value) {
            (RefKind::Single, value) => self.member(target, value, resolve_ids, rule),
            (RefKind::Array, Value::Array(items)) => {
                let mut resolved = Vec::with_capacity(items.len());
                for item in items {
                    if let Some(v) = self.member(target, item, resolve_ids, rule)? {
                        resolved.push(v);
                    }
                }
                Ok(Some(Value::Array(resolved)))
            }
            (RefKind::KeyedMap, Value::Object(entries)) => {
                let mut resolved = Map::new();
                for (key, item) in entries {
                    if let Some(v) = self.member(target, item, resolve_ids, rule)? {
                        resolved.insert(key, v);
                    }
                }
                Ok(Some(Value::Object(resolved)))
            }
            (_, other) => Ok(Some(other)),
        }
    }

    /// Resolves one referenced entity. Inline objects inherit `resolve_ids`
    /// from their owner, so a partially denormalized entity has the ids
    /// inside its inline objects resolved too. Anything that is neither an
    /// object nor an identifier is kept as is.
    fn member(
        &mut self,
        entity_type: EntityType,
        value: Value,
        resolve_ids: bool,
        rule: Option<&PruneRule>,
    ) -> EngineResult<Option<Value>> {
        match value {
            Value::Object(fields) => self.entity(entity_type, fields, resolve_ids, rule).map(Some),
            value if resolve_ids => match EntityId::from_value(&value) {
                Some(id) => self.lookup(entity_type, id, rule),
                None => Ok(Some(value)),
            },
            value => Ok(Some(value)),
        }
    }

    fn lookup(
        &mut self,
        entity_type: EntityType,
        id: EntityId,
        rule: Option<&PruneRule>,
    ) -> EngineResult<Option<Value>> {
        if rule.is_none() && self.path.contains(&(entity_type, id.key())) {
            trace!("{} {} already on the resolve path, keeping id", entity_type, id);
            return Ok(Some(id.to_value()));
        }

        let store = self.store;
        match store.get(entity_type, &id) {
            Some(found) => self
                .entity(entity_type, found.fields().clone(), true, rule)
                .map(Some),
            None => match self.denormalizer.config.missing_reference {
                MissingReferencePolicy::Omit => {
                    debug!("{} {} not in store, omitting", entity_type, id);
                    Ok(None)
                }
                MissingReferencePolicy::Null => Ok(Some(Value::Null)),
                MissingReferencePolicy::Fail => Err(EngineError::MissingReference { entity_type, id }),
            },
        }
    }
}
