//! Post-processing of denormalized entities.
//!
//! Applies the [`PruneTable`] to an entity reached through a
//! self-referential field. Stripping happens before the entity's own
//! references are resolved, so truncated branches are never looked up.

use flatgraph_model::{PruneMode, PruneRule, PruneTable};
use flatgraph_types::EntityType;
use serde_json::{Map, Value};

/// Looks up and applies truncation rules.
#[derive(Debug, Clone, Copy)]
pub struct PostProcessor<'e> {
    table: &'e PruneTable,
}

impl<'e> PostProcessor<'e> {
    pub fn new(table: &'e PruneTable) -> Self {
        Self { table }
    }

    /// The rule governing entities reached through `owner.field`.
    pub fn rule_for(&self, owner: EntityType, field: &str) -> Option<&'e PruneRule> {
        self.table.rule_for(owner, field)
    }

    /// Strips the rule's fields from `fields`.
    pub fn apply(&self, rule: &PruneRule, fields: &mut Map<String, Value>) {
        for field in &rule.strip {
            match rule.mode {
                PruneMode::Delete => {
                    fields.remove(field);
                }
                PruneMode::Leaf => {
                    if let Some(slot) = fields.get_mut(field) {
                        *slot = leaf_of(slot);
                    }
                }
            }
        }
    }
}

/// An empty container of the same shape; `null` stays `null`.
fn leaf_of(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Object(_) => Value::Object(Map::new()),
        _ => Value::Array(Vec::new()),
    }
}
