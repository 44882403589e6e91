//! Truncation rules for nested self-references.
//!
//! Self-referential fields resolve one level deep. An entity reached through
//! one of them (a subfolder, a child group, a language variant) loses the
//! fields listed in its rule before its own references are resolved.

use flatgraph_types::EntityType;
use serde::{Deserialize, Serialize};

/// What happens to a stripped field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PruneMode {
    /// The field is removed from the nested entity.
    Delete,
    /// The field is kept as an empty container, marking the entity as a leaf.
    Leaf,
}

/// One row of the truncation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruneRule {
    pub entity_type: EntityType,
    /// Self-referential fields through which the nested entity is reached.
    pub via: Vec<String>,
    /// Fields stripped from the nested entity.
    pub strip: Vec<String>,
    pub mode: PruneMode,
}

impl PruneRule {
    fn new(entity_type: EntityType, via: &[&str], strip: &[&str], mode: PruneMode) -> Self {
        Self {
            entity_type,
            via: via.iter().map(|s| s.to_string()).collect(),
            strip: strip.iter().map(|s| s.to_string()).collect(),
            mode,
        }
    }

    pub fn delete(entity_type: EntityType, via: &[&str], strip: &[&str]) -> Self {
        Self::new(entity_type, via, strip, PruneMode::Delete)
    }

    pub fn leaf(entity_type: EntityType, via: &[&str], strip: &[&str]) -> Self {
        Self::new(entity_type, via, strip, PruneMode::Leaf)
    }

    /// True if an entity reached through `owner.field` falls under this rule.
    pub fn applies_to(&self, owner: EntityType, field: &str) -> bool {
        self.entity_type == owner && self.via.iter().any(|v| v == field)
    }
}

/// The per-type list of [`PruneRule`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruneTable {
    rules: Vec<PruneRule>,
}

impl PruneTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, rule: PruneRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Truncation rules matching [`SchemaRegistry::cms`](crate::SchemaRegistry::cms).
    pub fn cms() -> Self {
        Self::new()
            .with(PruneRule::delete(EntityType::Folder, &["subfolders"], &["subfolders"]))
            .with(PruneRule::delete(EntityType::Group, &["children"], &["children"]))
            .with(PruneRule::delete(
                EntityType::Page,
                &["languageVariants", "pageVariants"],
                &["languageVariants", "pageVariants", "template"],
            ))
            .with(PruneRule::leaf(EntityType::Package, &["subPackages"], &["subPackages"]))
    }

    /// The rule for entities reached through `owner.field`, if any.
    pub fn rule_for(&self, owner: EntityType, field: &str) -> Option<&PruneRule> {
        self.rules.iter().find(|r| r.applies_to(owner, field))
    }

    pub fn rules(&self) -> &[PruneRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
