use serde::{Deserialize, Serialize};

use super::defaults;

/// Orchestrator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Page size when the caller gives none.
    pub default_limit: usize,
    /// Upper bound on a single page; larger requests are clamped.
    pub max_limit: usize,
    /// Generic domain terms fed to the fallback lexicon.
    pub domain_terms: Vec<String>,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_limit: defaults::DEFAULT_LIMIT,
            max_limit: defaults::MAX_LIMIT,
            domain_terms: defaults::DEFAULT_DOMAIN_TERMS
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }
}

impl RetrievalConfig {
    /// Resolve the effective page size for a request.
    pub fn clamp_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_limit)
            .clamp(1, self.max_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_clamping() {
        let config = RetrievalConfig::default();
        assert_eq!(config.clamp_limit(None), 10);
        assert_eq!(config.clamp_limit(Some(0)), 1);
        assert_eq!(config.clamp_limit(Some(500)), 100);
        assert_eq!(config.clamp_limit(Some(25)), 25);
    }
}
