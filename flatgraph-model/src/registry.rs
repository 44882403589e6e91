//! The schema catalogue consumed by the normalizer and denormalizer.

use std::collections::BTreeMap;

use flatgraph_types::EntityType;

use crate::schema::{EntitySchema, RefField};

/// Immutable set of entity schemas, keyed by type.
///
/// Built once through [`SchemaRegistry::builder`] (or [`SchemaRegistry::cms`]
/// for the stock CMS catalogue) and never mutated afterwards, so a single
/// registry can be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<EntityType, EntitySchema>,
}

impl SchemaRegistry {
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::default()
    }

    /// The catalogue of the CMS REST API.
    pub fn cms() -> Self {
        use EntityType::*;

        let owned = |t: EntityType| {
            EntitySchema::new(t)
                .with(RefField::single("creator", User))
                .with(RefField::single("editor", User))
        };

        Self::builder()
            .register(EntitySchema::new(User).with(RefField::array("groups", Group)))
            .register(EntitySchema::new(Group).with(RefField::array("children", Group)))
            .register(owned(Folder).with(RefField::array("subfolders", Folder)))
            .register(
                owned(Page)
                    .with(RefField::single("publisher", User))
                    .with(RefField::single("lockedBy", User))
                    .with(RefField::single("folder", Folder))
                    .with(RefField::single("template", Template))
                    .with(RefField::keyed("languageVariants", Page).symmetric())
                    .with(RefField::array("pageVariants", Page)),
            )
            .register(owned(File).with(RefField::single("folder", Folder)))
            .register(owned(Image).with(RefField::single("folder", Folder)))
            .register(
                owned(Form)
                    .with(RefField::single("publisher", User))
                    .with(RefField::single("folder", Folder)),
            )
            .register(owned(Template).with(RefField::single("folder", Folder)))
            .register(EntitySchema::new(Message).with(RefField::single("sender", User)))
            .register(
                EntitySchema::new(Node)
                    .with(RefField::single("editor", User))
                    .with(RefField::single("folder", Folder)),
            )
            .register(EntitySchema::new(Package).with(RefField::array("subPackages", Package)))
            .register(EntitySchema::new(ContentRepository))
            .register(EntitySchema::new(Construct))
            .register(EntitySchema::new(DataSource))
            .register(EntitySchema::new(Language))
            .build()
    }

    /// Schema for `entity_type`, or `None` if the type is not registered.
    pub fn get(&self, entity_type: EntityType) -> Option<&EntitySchema> {
        self.schemas.get(&entity_type)
    }

    pub fn contains(&self, entity_type: EntityType) -> bool {
        self.schemas.contains_key(&entity_type)
    }

    /// Registered types in sorted order.
    pub fn types(&self) -> impl Iterator<Item = EntityType> + '_ {
        self.schemas.keys().copied()
    }

    pub fn schemas(&self) -> impl Iterator<Item = &EntitySchema> {
        self.schemas.values()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// Collects schemas before freezing them into a [`SchemaRegistry`].
#[derive(Debug, Default)]
pub struct SchemaRegistryBuilder {
    schemas: BTreeMap<EntityType, EntitySchema>,
}

impl SchemaRegistryBuilder {
    /// Adds a schema, replacing any earlier one for the same type.
    #[must_use]
    pub fn register(mut self, schema: EntitySchema) -> Self {
        self.schemas.insert(schema.entity_type, schema);
        self
    }

    pub fn build(self) -> SchemaRegistry {
        SchemaRegistry {
            schemas: self.schemas,
        }
    }
}
