//! The closed set of entity types known to the CMS API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Name of an entity type. Serialized in the camelCase form the API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityType {
    ContentRepository,
    Construct,
    DataSource,
    File,
    Folder,
    Form,
    Group,
    Image,
    Language,
    Message,
    Node,
    Package,
    Page,
    Template,
    User,
}

impl EntityType {
    /// Every entity type, in declaration order.
    pub const ALL: [EntityType; 15] = [
        Self::ContentRepository,
        Self::Construct,
        Self::DataSource,
        Self::File,
        Self::Folder,
        Self::Form,
        Self::Group,
        Self::Image,
        Self::Language,
        Self::Message,
        Self::Node,
        Self::Package,
        Self::Page,
        Self::Template,
        Self::User,
    ];

    /// The API name of this type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ContentRepository => "contentRepository",
            Self::Construct => "construct",
            Self::DataSource => "dataSource",
            Self::File => "file",
            Self::Folder => "folder",
            Self::Form => "form",
            Self::Group => "group",
            Self::Image => "image",
            Self::Language => "language",
            Self::Message => "message",
            Self::Node => "node",
            Self::Package => "package",
            Self::Page => "page",
            Self::Template => "template",
            Self::User => "user",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::UnknownEntityType(s.to_string()))
    }
}
