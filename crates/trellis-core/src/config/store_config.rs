use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Structured store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Database file. `None` means in-memory (tests).
    pub db_path: Option<PathBuf>,
    /// Number of read connections in the pool.
    pub read_pool_size: usize,
    /// SQLite busy timeout in milliseconds — the store's bounded per-call
    /// wait before reporting `Unavailable`.
    pub busy_timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            read_pool_size: defaults::DEFAULT_READ_POOL_SIZE,
            busy_timeout_ms: defaults::DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}
