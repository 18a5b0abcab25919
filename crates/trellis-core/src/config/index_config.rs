use serde::{Deserialize, Serialize};

use super::defaults;

/// Which embedding provider heads the build-time chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Remote HTTP embedding endpoint.
    Remote,
    /// Local ONNX model (requires the `onnx` feature in trellis-index).
    Onnx,
    /// Deterministic hashed term vectors — always available.
    Hashed,
}

/// Remote embedding endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteProviderConfig {
    /// Base URL; empty disables the provider.
    pub endpoint: String,
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for RemoteProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            model: defaults::DEFAULT_REMOTE_MODEL.to_string(),
            api_key_env: defaults::DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: defaults::DEFAULT_REMOTE_TIMEOUT_SECS,
        }
    }
}

/// Semantic index configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub provider: ProviderKind,
    pub remote: RemoteProviderConfig,
    /// Path to a local ONNX model, when `provider = "onnx"`.
    pub onnx_model_path: Option<String>,
    pub dimensions: usize,
    /// Neighbor oversampling factor (`limit * oversample`, capped).
    pub oversample: usize,
    /// Hard cap on neighbors per index query.
    pub neighbor_cap: usize,
    /// Appended to short queries lacking a domain term.
    pub domain_hint: String,
    /// Terms that mark a query as already in-domain.
    pub domain_terms: Vec<String>,
    /// Build-time document embedding cache entries.
    pub embed_cache_size: u64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Hashed,
            remote: RemoteProviderConfig::default(),
            onnx_model_path: None,
            dimensions: defaults::DEFAULT_DIMENSIONS,
            oversample: defaults::DEFAULT_OVERSAMPLE,
            neighbor_cap: defaults::DEFAULT_NEIGHBOR_CAP,
            domain_hint: defaults::DEFAULT_DOMAIN_HINT.to_string(),
            domain_terms: defaults::DEFAULT_DOMAIN_TERMS
                .iter()
                .map(|t| t.to_string())
                .collect(),
            embed_cache_size: defaults::DEFAULT_EMBED_CACHE_SIZE,
        }
    }
}

impl IndexConfig {
    /// Widened neighbor count for a requested result limit:
    /// `min(limit * oversample, neighbor_cap)`.
    pub fn widened_limit(&self, limit: usize) -> usize {
        (limit.saturating_mul(self.oversample)).min(self.neighbor_cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widened_limit_is_capped() {
        let config = IndexConfig::default();
        assert_eq!(config.widened_limit(10), 30);
        assert_eq!(config.widened_limit(50), 60);
        assert_eq!(config.widened_limit(1), 3);
    }
}
