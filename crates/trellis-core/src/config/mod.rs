//! Configuration for all subsystems.
//!
//! Everything has a sensible default; a TOML file can override any subset.
//! No global state — configs are plain values handed to constructors.

pub mod defaults;
pub mod index_config;
pub mod retrieval_config;
pub mod store_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{TrellisError, TrellisResult};

pub use index_config::{IndexConfig, ProviderKind, RemoteProviderConfig};
pub use retrieval_config::RetrievalConfig;
pub use store_config::StoreConfig;

/// Top-level configuration aggregate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrellisConfig {
    pub store: StoreConfig,
    pub index: IndexConfig,
    pub retrieval: RetrievalConfig,
}

impl TrellisConfig {
    /// Parse a TOML string; absent keys fall back to defaults.
    pub fn from_toml_str(raw: &str) -> TrellisResult<Self> {
        toml::from_str(raw).map_err(|e| TrellisError::Config {
            reason: e.to_string(),
        })
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> TrellisResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| TrellisError::Config {
            reason: format!("{}: {e}", path.display()),
        })?;
        Self::from_toml_str(&raw)
    }
}
