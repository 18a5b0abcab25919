//! Provider degradation chain.
//!
//! Providers are tried in priority order when the index is (re)built; every
//! fallback is recorded as a `DegradationEvent`. Query-time lookups pin the
//! provider that built the index — mixing vector spaces is never allowed.

use trellis_core::models::DegradationEvent;
use trellis_core::traits::IEmbeddingProvider;

/// An ordered chain of embedding providers.
pub struct DegradationChain {
    providers: Vec<Box<dyn IEmbeddingProvider>>,
    /// Accumulated degradation events since the last drain.
    events: Vec<DegradationEvent>,
}

impl Default for DegradationChain {
    fn default() -> Self {
        Self::new()
    }
}

impl DegradationChain {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Add a provider to the end of the chain (lowest priority so far).
    pub fn push(&mut self, provider: Box<dyn IEmbeddingProvider>) {
        self.providers.push(provider);
    }

    /// Iterate providers in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn IEmbeddingProvider> {
        self.providers.iter().map(|p| p.as_ref())
    }

    /// Look up a provider by name.
    pub fn get(&self, name: &str) -> Option<&dyn IEmbeddingProvider> {
        self.providers
            .iter()
            .map(|p| p.as_ref())
            .find(|p| p.name() == name)
    }

    /// Name of the first currently-available provider.
    pub fn active_provider_name(&self) -> &str {
        self.providers
            .iter()
            .find(|p| p.is_available())
            .map(|p| p.name())
            .unwrap_or("none")
    }

    /// Record that `fallback` answered because `failed` could not.
    pub fn record_fallback(&mut self, failed: &str, reason: &str, fallback: &str) {
        self.events.push(DegradationEvent::new(
            format!("embeddings/{failed}"),
            reason.to_string(),
            fallback.to_string(),
        ));
    }

    /// Drain accumulated degradation events.
    pub fn drain_events(&mut self) -> Vec<DegradationEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::errors::IndexError;

    /// A mock provider that always fails.
    struct FailingProvider;
    impl IEmbeddingProvider for FailingProvider {
        fn embed(&self, _text: &str) -> Result<Vec<f32>, IndexError> {
            Err(IndexError::Embedding {
                provider: "failing-mock".to_string(),
                reason: "mock failure".to_string(),
            })
        }
        fn dimensions(&self) -> usize {
            64
        }
        fn name(&self) -> &str {
            "failing-mock"
        }
        fn is_available(&self) -> bool {
            true
        }
    }

    /// A mock provider that always succeeds.
    struct SuccessProvider {
        name: String,
    }
    impl IEmbeddingProvider for SuccessProvider {
        fn embed(&self, _text: &str) -> Result<Vec<f32>, IndexError> {
            Ok(vec![1.0; 64])
        }
        fn dimensions(&self) -> usize {
            64
        }
        fn name(&self) -> &str {
            &self.name
        }
        fn is_available(&self) -> bool {
            true
        }
    }

    fn success(name: &str) -> Box<dyn IEmbeddingProvider> {
        Box::new(SuccessProvider {
            name: name.to_string(),
        })
    }

    #[test]
    fn active_provider_is_first_available() {
        let mut chain = DegradationChain::new();
        chain.push(success("primary"));
        chain.push(success("fallback"));
        assert_eq!(chain.active_provider_name(), "primary");
    }

    #[test]
    fn lookup_by_name() {
        let mut chain = DegradationChain::new();
        chain.push(Box::new(FailingProvider));
        chain.push(success("fallback"));
        assert!(chain.get("fallback").is_some());
        assert!(chain.get("missing").is_none());
    }

    #[test]
    fn fallback_events_accumulate_and_drain() {
        let mut chain = DegradationChain::new();
        chain.record_fallback("remote", "connect timeout", "hashed-terms");
        let events = chain.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].component, "embeddings/remote");
        assert_eq!(events[0].fallback_used, "hashed-terms");
        assert!(chain.drain_events().is_empty());
    }

    #[test]
    fn empty_chain_has_no_active_provider() {
        let chain = DegradationChain::new();
        assert_eq!(chain.active_provider_name(), "none");
        assert!(chain.is_empty());
    }
}
