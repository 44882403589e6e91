//! Identifier type for CMS entities.
//!
//! The REST API keys most entities by integer, but some (packages,
//! global ids) by string. Both forms are accepted everywhere an id is
//! expected; store slices are keyed by the display form, so `1` and `"1"`
//! address the same slot just like JSON object keys do.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Identifier of an entity within its type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Num(i64),
    Str(String),
}

impl EntityId {
    /// Reads an identifier out of a JSON value.
    ///
    /// Only integers and strings qualify; objects, arrays, floats, bools and
    /// `null` return `None`.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(Self::Num),
            Value::String(s) => Some(Self::Str(s.clone())),
            _ => None,
        }
    }

    /// Returns true if the value is shaped like an identifier rather than
    /// a nested entity.
    #[must_use]
    pub fn is_id_value(value: &Value) -> bool {
        match value {
            Value::Number(n) => n.is_i64(),
            Value::String(_) => true,
            _ => false,
        }
    }

    /// Converts back into the JSON form it was read from.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Num(n) => Value::from(*n),
            Self::Str(s) => Value::String(s.clone()),
        }
    }

    /// The key this id occupies inside a store slice.
    #[must_use]
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Parses an id from text. Integral text becomes [`EntityId::Num`].
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidId(s.to_string()));
        }
        Ok(match trimmed.parse::<i64>() {
            Ok(n) => Self::Num(n),
            Err(_) => Self::Str(trimmed.to_string()),
        })
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl FromStr for EntityId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        Self::Num(n)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}
