//! Error types for the normalization engine.

use flatgraph_types::{EntityId, EntityType};
use serde_json::Value;
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while normalizing or denormalizing.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No schema is registered for the requested type.
    #[error("no schema registered for entity type: {0}")]
    NoSchema(EntityType),

    /// An entity position held something other than an object or identifier.
    #[error("expected {entity_type} entity, found {found}")]
    NotAnEntity {
        entity_type: EntityType,
        found: &'static str,
    },

    /// An entity object without a usable identifier.
    #[error("{entity_type} entity has no usable id")]
    MissingId { entity_type: EntityType },

    /// A reference field held the wrong container shape.
    #[error("invalid reference {owner}.{field}: expected {expected}, found {found}")]
    InvalidReference {
        owner: EntityType,
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A referenced id is absent from the store (only with `missing-reference = "fail"`).
    #[error("{entity_type} {id} is not in the store")]
    MissingReference { entity_type: EntityType, id: EntityId },

    /// Configuration could not be parsed.
    #[error("config error: {0}")]
    Config(String),
}

/// Short name of a JSON value's kind, for error messages.
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
