//! Schema-driven entity graph normalization for flatgraph.
//!
//! Converts the nested, partly cyclic entity graphs returned by the CMS API
//! into a flat [`EntityStore`](flatgraph_model::EntityStore) and rebuilds
//! nested entities from it on demand.
//!
//! # Architecture
//!
//! - [`Normalizer`] walks a raw entity (or array) following the
//!   [`SchemaRegistry`](flatgraph_model::SchemaRegistry), replacing nested
//!   entities by their ids and collecting them per type and id
//! - Symmetric keyed self-references (language variants) propagate the
//!   enclosing map to members that lack their own
//! - [`Denormalizer`] resolves ids against a store, one level deep for
//!   self-references; [`PostProcessor`] applies the truncation table
//! - [`EntityEngine`] bundles the immutable tables and the [`EngineConfig`]
//!
//! All operations are synchronous and never mutate their inputs.

mod clique;
mod config;
mod denormalize;
mod engine;
mod error;
mod normalize;
mod postprocess;

pub use config::{DuplicatePolicy, EngineConfig, MissingReferencePolicy};
pub use denormalize::{Denormalizer, EntityInput};
pub use engine::EntityEngine;
pub use error::{EngineError, EngineResult};
pub use normalize::{Normalized, NormalizedMany, NormalizedOne, Normalizer};
pub use postprocess::PostProcessor;
