//! The flat `type -> id -> entity` store produced by normalization.

use std::collections::BTreeMap;

use flatgraph_types::{EntityId, EntityType};
use serde::{Deserialize, Serialize};

use crate::entity::NormalizedEntity;

/// Normalized entities partitioned by type, then by id key.
///
/// Serializes as `{ "<type>": { "<id>": { ...fields } } }`, the shape a
/// client-side state container keeps. Slices for types without entities
/// are absent rather than empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityStore {
    slices: BTreeMap<EntityType, BTreeMap<String, NormalizedEntity>>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, entity_type: EntityType, id: &EntityId) -> Option<&NormalizedEntity> {
        self.get_key(entity_type, &id.key())
    }

    /// Looks up an entity by its raw slice key.
    pub fn get_key(&self, entity_type: EntityType, key: &str) -> Option<&NormalizedEntity> {
        self.slices.get(&entity_type).and_then(|s| s.get(key))
    }

    pub fn contains(&self, entity_type: EntityType, id: &EntityId) -> bool {
        self.get(entity_type, id).is_some()
    }

    /// All entities of one type.
    pub fn slice(&self, entity_type: EntityType) -> Option<&BTreeMap<String, NormalizedEntity>> {
        self.slices.get(&entity_type)
    }

    /// Inserts an entity, replacing whatever was stored under the same id.
    pub fn insert(
        &mut self,
        entity_type: EntityType,
        id: &EntityId,
        entity: NormalizedEntity,
    ) -> Option<NormalizedEntity> {
        self.slices
            .entry(entity_type)
            .or_default()
            .insert(id.key(), entity)
    }

    /// Inserts an entity, shallow-merging it over an existing entry with the
    /// same id.
    pub fn upsert(&mut self, entity_type: EntityType, id: &EntityId, entity: NormalizedEntity) {
        let slice = self.slices.entry(entity_type).or_default();
        match slice.get_mut(&id.key()) {
            Some(existing) => existing.merge_from(entity),
            None => {
                slice.insert(id.key(), entity);
            }
        }
    }

    /// Folds another store into this one. Entries in `other` replace entries
    /// with the same type and id wholesale.
    pub fn merge(&mut self, other: EntityStore) {
        for (entity_type, slice) in other.slices {
            self.slices.entry(entity_type).or_default().extend(slice);
        }
    }

    /// Types that have at least one entity.
    pub fn types(&self) -> impl Iterator<Item = EntityType> + '_ {
        self.slices.keys().copied()
    }

    /// Every `(type, key, entity)` triple, ordered by type then key.
    pub fn iter(&self) -> impl Iterator<Item = (EntityType, &str, &NormalizedEntity)> {
        self.slices.iter().flat_map(|(t, slice)| {
            slice
                .iter()
                .map(move |(key, entity)| (*t, key.as_str(), entity))
        })
    }

    /// Total number of entities across all types.
    pub fn len(&self) -> usize {
        self.slices.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
