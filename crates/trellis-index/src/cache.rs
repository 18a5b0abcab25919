//! Build-time embedding cache.
//!
//! Keys are `provider:content_hash`, so vectors from different providers
//! never alias. Only index (re)builds touch this cache — query results are
//! never cached, keeping the engine free of cross-request state.

use std::time::Duration;

use moka::sync::Cache;

/// In-memory embedding cache for document (re)embedding.
pub struct EmbeddingCache {
    cache: Cache<String, Vec<f32>>,
}

impl EmbeddingCache {
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(3600))
            .build();
        Self { cache }
    }

    fn key(provider: &str, content_hash: &str) -> String {
        format!("{provider}:{content_hash}")
    }

    pub fn get(&self, provider: &str, content_hash: &str) -> Option<Vec<f32>> {
        self.cache.get(&Self::key(provider, content_hash))
    }

    pub fn insert(&self, provider: &str, content_hash: &str, embedding: Vec<f32>) {
        self.cache.insert(Self::key(provider, content_hash), embedding);
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_are_scoped_by_provider() {
        let cache = EmbeddingCache::new(16);
        cache.insert("remote-http", "abc", vec![1.0]);
        assert_eq!(cache.get("remote-http", "abc"), Some(vec![1.0]));
        assert_eq!(cache.get("hashed-terms", "abc"), None);
    }

    #[test]
    fn miss_returns_none() {
        let cache = EmbeddingCache::new(16);
        assert!(cache.get("remote-http", "missing").is_none());
    }
}
