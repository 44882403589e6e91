//! Core type definitions for flatgraph.
//!
//! This crate defines the small, schema-agnostic vocabulary shared by the
//! model and the engine:
//! - [`EntityId`]: numeric or string entity identifiers
//! - [`EntityType`]: the closed set of CMS entity type names
//!
//! Reference layout, stores and traversal rules live in `flatgraph-model`.

mod entity_type;
mod ids;

pub use entity_type::EntityType;
pub use ids::EntityId;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown entity type: {0}")]
    UnknownEntityType(String),

    #[error("invalid entity id: {0:?}")]
    InvalidId(String),
}
