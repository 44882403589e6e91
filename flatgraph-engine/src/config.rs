//! Engine configuration, read from `engine.toml`.
//!
//! ```toml
//! [engine]
//! missing-reference = "omit"   # omit | null | fail
//! duplicates = "merge"         # merge | replace
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};

/// What denormalization does with an identifier that is not in the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingReferencePolicy {
    /// Drop it: single fields are removed, array elements and map entries skipped.
    #[default]
    Omit,
    /// Replace it with `null`.
    Null,
    /// Abort with [`EngineError::MissingReference`].
    Fail,
}

/// How repeated occurrences of one entity within a single normalize call
/// are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Shallow merge, later fields win.
    #[default]
    Merge,
    /// The later occurrence replaces the earlier one.
    Replace,
}

/// Engine settings. Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EngineConfig {
    #[serde(default)]
    pub missing_reference: MissingReferencePolicy,
    #[serde(default)]
    pub duplicates: DuplicatePolicy,
}

/// Raw TOML structure matching the engine.toml format.
#[derive(Deserialize)]
struct ConfigFile {
    #[serde(default)]
    engine: EngineConfig,
}

impl EngineConfig {
    /// Parses a config document, failing on malformed input.
    pub fn from_toml_str(contents: &str) -> EngineResult<Self> {
        toml::from_str::<ConfigFile>(contents)
            .map(|file| file.engine)
            .map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Loads config from `path`.
    /// Falls back to defaults with a warning if the file is unreadable or invalid.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No engine config at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    info!("Loaded engine config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!("Failed to parse engine config {:?}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read engine config {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}
