//! Entity model for flatgraph.
//!
//! Defines the declarative tables the engine walks and the containers it
//! fills:
//! - [`EntitySchema`] / [`RefField`]: which fields of a type reference other entities
//! - [`SchemaRegistry`]: the immutable catalogue of schemas, built once
//! - [`NormalizedEntity`]: an entity whose reference fields hold identifiers
//! - [`EntityStore`]: the flat `type -> id -> entity` store
//! - [`PruneTable`]: per-type truncation of nested self-references
//!
//! Nothing here traverses graphs; that is the engine's job. These types form
//! the contract between the engine and the state container that owns the
//! store.

mod entity;
mod prune;
mod registry;
mod schema;
mod store;

pub use entity::NormalizedEntity;
pub use prune::{PruneMode, PruneRule, PruneTable};
pub use registry::{SchemaRegistry, SchemaRegistryBuilder};
pub use schema::{EntitySchema, RefField, RefKind};
pub use store::EntityStore;

pub use flatgraph_types::{EntityId, EntityType};
