use flatgraph_model::{EntityStore, PruneTable, SchemaRegistry};
use flatgraph_types::{EntityId, EntityType};
use serde_json::Value;

use crate::config::EngineConfig;
use crate::denormalize::{Denormalizer, EntityInput};
use crate::error::EngineResult;
use crate::normalize::{Normalized, NormalizedMany, NormalizedOne, Normalizer};
use crate::postprocess::PostProcessor;

/// Owns the immutable tables and hands out normalizers and denormalizers.
///
/// Built once and shared; every operation is a pure function of its
/// arguments and these tables.
#[derive(Debug, Clone)]
pub struct EntityEngine {
    registry: SchemaRegistry,
    prune: PruneTable,
    config: EngineConfig,
}

impl EntityEngine {
    pub fn new(registry: SchemaRegistry, prune: PruneTable, config: EngineConfig) -> Self {
        Self {
            registry,
            prune,
            config,
        }
    }

    /// The CMS catalogue with its truncation rules and default config.
    pub fn cms() -> Self {
        Self::new(SchemaRegistry::cms(), PruneTable::cms(), EngineConfig::default())
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn prune_table(&self) -> &PruneTable {
        &self.prune
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn normalizer(&self) -> Normalizer<'_> {
        Normalizer::new(&self.registry, &self.config)
    }

    pub fn denormalizer(&self) -> Denormalizer<'_> {
        Denormalizer::new(&self.registry, PostProcessor::new(&self.prune), &self.config)
    }

    /// See [`Normalizer::normalize`].
    pub fn normalize(&self, entity_type: EntityType, value: &Value) -> EngineResult<Normalized> {
        self.normalizer().normalize(entity_type, value)
    }

    /// See [`Normalizer::normalize_entity`].
    pub fn normalize_entity(
        &self,
        entity_type: EntityType,
        value: &Value,
    ) -> EngineResult<NormalizedOne> {
        self.normalizer().normalize_entity(entity_type, value)
    }

    /// See [`Normalizer::normalize_many`].
    pub fn normalize_many(
        &self,
        entity_type: EntityType,
        value: &Value,
    ) -> EngineResult<NormalizedMany> {
        self.normalizer().normalize_many(entity_type, value)
    }

    /// See [`Denormalizer::denormalize`].
    pub fn denormalize<'a>(
        &self,
        entity_type: EntityType,
        entity: impl Into<EntityInput<'a>>,
        store: &EntityStore,
    ) -> EngineResult<Option<Value>> {
        self.denormalizer().denormalize(entity_type, entity, store)
    }

    /// See [`Denormalizer::denormalize_id`].
    pub fn denormalize_id(
        &self,
        entity_type: EntityType,
        id: &EntityId,
        store: &EntityStore,
    ) -> EngineResult<Option<Value>> {
        self.denormalizer().denormalize_id(entity_type, id, store)
    }
}
