//! IndexEngine — builds the vector index from a catalog dump and answers
//! semantic queries. Implements `ISemanticIndex`.

use tracing::{info, warn};

use trellis_core::config::IndexConfig;
use trellis_core::constants::SHORT_QUERY_TOKENS;
use trellis_core::errors::IndexError;
use trellis_core::models::{DegradationEvent, FilterHint, RelevanceScore, SearchCandidate};
use trellis_core::traits::{CatalogDump, IEmbeddingProvider, ISemanticIndex};

use crate::cache::EmbeddingCache;
use crate::degradation::DegradationChain;
use crate::document::{self, ProductDocument};
use crate::providers;
use crate::vector::VectorIndex;

/// The semantic index engine.
///
/// Owns the provider chain, the document embedding cache, and the vector
/// index. The provider that built the index also embeds queries; if it goes
/// away the engine reports `Unavailable` instead of mixing vector spaces.
pub struct IndexEngine {
    index: VectorIndex,
    chain: DegradationChain,
    active_provider: String,
    cache: EmbeddingCache,
    config: IndexConfig,
}

impl IndexEngine {
    /// Build the index from a catalog dump at process start.
    pub fn build(dump: &CatalogDump, config: IndexConfig) -> Result<Self, IndexError> {
        let chain = providers::create_chain(&config);
        let cache = EmbeddingCache::new(config.embed_cache_size);
        let mut engine = Self {
            index: VectorIndex::new(config.dimensions),
            chain,
            active_provider: String::new(),
            cache,
            config,
        };
        engine.rebuild(dump)?;
        Ok(engine)
    }

    /// Re-embed and re-index the catalog. Unchanged documents hit the
    /// embedding cache. Driven by the external reload job, never by queries.
    pub fn rebuild(&mut self, dump: &CatalogDump) -> Result<(), IndexError> {
        let docs = document::build_documents(dump);
        let provider_names: Vec<String> =
            self.chain.iter().map(|p| p.name().to_string()).collect();

        let mut built: Option<(String, Vec<Vec<f32>>)> = None;
        let mut failures: Vec<(String, String)> = Vec::new();
        for name in &provider_names {
            let Some(provider) = self.chain.get(name) else {
                continue;
            };
            if !provider.is_available() {
                continue;
            }
            match embed_documents(provider, &docs, &self.cache) {
                Ok(vectors) => {
                    built = Some((name.clone(), vectors));
                    break;
                }
                Err(e) => {
                    warn!(provider = %name, error = %e, "provider failed, trying next in chain");
                    failures.push((name.clone(), e.to_string()));
                }
            }
        }

        let Some((winner, vectors)) = built else {
            return Err(IndexError::unavailable(format!(
                "all {} providers exhausted",
                provider_names.len()
            )));
        };
        for (failed, reason) in &failures {
            self.chain.record_fallback(failed, reason, &winner);
        }

        let mut index = VectorIndex::new(self.config.dimensions);
        for (doc, vector) in docs.iter().zip(vectors) {
            index.insert(
                doc.product_id.clone(),
                vector,
                doc.brand_name.clone(),
                doc.category_name.clone(),
            )?;
        }
        info!(documents = index.len(), provider = %winner, "semantic index built");
        self.index = index;
        self.active_provider = winner;
        Ok(())
    }

    /// The provider that built the current index.
    pub fn active_provider(&self) -> &str {
        &self.active_provider
    }

    /// Drain accumulated degradation events.
    pub fn drain_degradation_events(&mut self) -> Vec<DegradationEvent> {
        self.chain.drain_events()
    }

    /// Append the domain hint to short queries that lack a domain term.
    /// Recall heuristic only — never required for correctness.
    fn augment_query(&self, query_text: &str) -> String {
        let tokens: Vec<&str> = query_text.split_whitespace().collect();
        if tokens.is_empty() || tokens.len() > SHORT_QUERY_TOKENS {
            return query_text.to_string();
        }
        let in_domain = tokens.iter().any(|token| {
            self.config
                .domain_terms
                .iter()
                .any(|term| term.eq_ignore_ascii_case(token))
        });
        if in_domain {
            query_text.to_string()
        } else {
            format!("{query_text} {}", self.config.domain_hint)
        }
    }
}

fn embed_documents(
    provider: &dyn IEmbeddingProvider,
    docs: &[ProductDocument],
    cache: &EmbeddingCache,
) -> Result<Vec<Vec<f32>>, IndexError> {
    let mut vectors = Vec::with_capacity(docs.len());
    for doc in docs {
        if let Some(cached) = cache.get(provider.name(), &doc.content_hash) {
            vectors.push(cached);
            continue;
        }
        let vector = provider.embed(&doc.text)?;
        cache.insert(provider.name(), &doc.content_hash, vector.clone());
        vectors.push(vector);
    }
    Ok(vectors)
}

impl ISemanticIndex for IndexEngine {
    fn semantic_search(
        &self,
        query_text: &str,
        hint: &FilterHint,
        limit: usize,
    ) -> Result<Vec<SearchCandidate>, IndexError> {
        if self.index.is_empty() {
            return Ok(Vec::new());
        }

        let provider = self
            .chain
            .get(&self.active_provider)
            .filter(|p| p.is_available())
            .ok_or_else(|| {
                IndexError::unavailable(format!(
                    "index provider {} is gone",
                    self.active_provider
                ))
            })?;

        let text = self.augment_query(query_text);
        let embedding = provider.embed(&text)?;
        let k = self.config.widened_limit(limit);
        let neighbors = self.index.search(&embedding, k, hint)?;

        Ok(neighbors
            .into_iter()
            .map(|(product_id, distance)| {
                SearchCandidate::new(product_id, RelevanceScore::from_distance(distance))
                    .with_hint(hint.clone())
            })
            .collect())
    }

    fn len(&self) -> usize {
        self.index.len()
    }
}
