//! Clique propagation for symmetric keyed self-references.
//!
//! Being a language variant is symmetric, but the API only lists the
//! variants on the entity that was requested. A nested member that lacks
//! its own map inherits the enclosing one, so every member of the clique
//! normalizes to the same map of identifiers.

use flatgraph_model::{RefField, RefKind};
use flatgraph_types::EntityType;
use serde_json::Value;

/// The raw map of a symmetric keyed self-reference, as seen by its members.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Clique<'v> {
    field: &'v str,
    members: &'v Value,
}

impl<'v> Clique<'v> {
    /// The clique formed by `owner.reference` holding `members`, if the
    /// reference is a symmetric keyed self-reference.
    pub(crate) fn enclosing(
        owner: EntityType,
        reference: &'v RefField,
        members: &'v Value,
    ) -> Option<Self> {
        let symmetric = reference.symmetric
            && reference.kind == RefKind::KeyedMap
            && reference.is_self_ref(owner);
        symmetric.then_some(Self {
            field: &reference.field,
            members,
        })
    }

    /// The value a member lacking `reference` should use instead.
    pub(crate) fn inherited(&self, reference: &RefField) -> Option<&'v Value> {
        (reference.field == self.field).then_some(self.members)
    }
}
