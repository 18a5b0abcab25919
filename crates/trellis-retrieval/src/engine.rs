//! SearchEngine — the hybrid search orchestrator.
//!
//! Drives the degradation ladder:
//!
//! ```text
//! START → (SEMANTIC | STRUCTURED_ONLY) → (STRUCTURED_FILTER | FALLBACK_FILTER) → MERGE → DONE
//! ```
//!
//! Each tier runs at most once per query; a tier failure is a ladder
//! transition, never a caller-visible error. An expired deadline at any
//! tier boundary jumps straight to the in-memory fallback. DONE is always
//! reached for a well-formed query.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use trellis_core::catalog::ProductId;
use trellis_core::config::RetrievalConfig;
use trellis_core::deadline::Deadline;
use trellis_core::errors::{TrellisError, TrellisResult};
use trellis_core::models::{
    Availability, FilterHint, ProductFilters, SearchCandidate, SearchRequest, SearchResponse,
    SortOrder,
};
use trellis_core::traits::{IProductStore, ISemanticIndex};

use crate::browse::ProductDetails;
use crate::lexicon::LexiconMatcher;
use crate::rank::{self, MergedPage};
use crate::snapshot::CatalogSnapshot;

/// Ladder tiers, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Semantic,
    Structured,
    Fallback,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tier::Semantic => "semantic",
            Tier::Structured => "structured",
            Tier::Fallback => "fallback",
        })
    }
}

/// A validated, resolved query — everything the ladder needs.
struct QueryPlan {
    query_text: Option<String>,
    filters: ProductFilters,
    hint: FilterHint,
    sort: Option<SortOrder>,
    limit: usize,
    offset: usize,
    use_semantic: bool,
    deadline: Option<Deadline>,
}

impl QueryPlan {
    fn deadline_expired(&self) -> bool {
        self.deadline.is_some_and(|d| d.expired())
    }
}

/// The hybrid search orchestrator.
///
/// All dependencies are constructor-injected and owned for the process
/// lifetime — no lazy singletons, no per-request setup.
pub struct SearchEngine {
    store: Arc<dyn IProductStore>,
    index: Arc<dyn ISemanticIndex>,
    snapshot: Arc<CatalogSnapshot>,
    lexicon: LexiconMatcher,
    config: RetrievalConfig,
}

impl SearchEngine {
    /// Assemble the engine. The lexicon vocabulary derives from the
    /// snapshot's brands and categories plus the configured domain terms.
    pub fn new(
        store: Arc<dyn IProductStore>,
        index: Arc<dyn ISemanticIndex>,
        snapshot: Arc<CatalogSnapshot>,
        config: RetrievalConfig,
    ) -> Self {
        let lexicon = LexiconMatcher::new(
            snapshot.brand_vocabulary(),
            snapshot.category_vocabulary(),
            &config.domain_terms,
        );
        Self {
            store,
            index,
            snapshot,
            lexicon,
            config,
        }
    }

    // --- Exposed surface ---

    /// Run one query through the ladder. Fails only on invalid filters.
    pub fn search(&self, request: &SearchRequest) -> TrellisResult<SearchResponse> {
        let plan = self.validate(request)?;
        let page = self.run_ladder(&plan);
        Ok(SearchResponse {
            results: page.results,
            total_count: page.total_count,
        })
    }

    /// Tri-state variant availability. A store outage reports `Unknown`,
    /// never a known quantity of zero.
    pub fn availability(&self, product_id: &ProductId, size: &str, color: &str) -> Availability {
        match self.store.variant_stock(product_id, size, color) {
            Ok(Some(record)) => Availability::Known {
                exists: true,
                quantity: record.quantity,
            },
            Ok(None) => Availability::not_carried(),
            Err(e) => {
                warn!(product = %product_id, cause = %e, "availability check degraded to unknown");
                Availability::Unknown
            }
        }
    }

    /// Product details with per-variant stock. Store outages degrade to the
    /// snapshot: details without stock knowledge.
    pub fn product_details(&self, product_id: &ProductId) -> TrellisResult<Option<ProductDetails>> {
        match self.store.get_product(product_id) {
            Ok(Some(hit)) => {
                let (variants, stock_known) = match self.store.product_inventory(product_id) {
                    Ok(records) => (records, true),
                    Err(e) => {
                        warn!(product = %product_id, cause = %e, "inventory unavailable for details");
                        (Vec::new(), false)
                    }
                };
                Ok(Some(ProductDetails::from_hit(hit, variants, stock_known)))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                warn!(
                    tier = %Tier::Structured,
                    cause = %e,
                    "details degraded to snapshot"
                );
                Ok(self
                    .snapshot
                    .get(product_id)
                    .map(|hit| ProductDetails::from_hit(hit, Vec::new(), false)))
            }
        }
    }

    /// Category browse: all products of a named category (including its
    /// direct children), cheapest-forward. Unknown names yield an empty
    /// response, mirroring a search that matched nothing.
    pub fn category_products(&self, name: &str, limit: usize) -> TrellisResult<SearchResponse> {
        let Some(category_id) = self.snapshot.category_id_by_name(name) else {
            debug!(category = name, "unknown category name, returning empty browse");
            return Ok(SearchResponse::empty());
        };
        let plan = QueryPlan {
            query_text: None,
            filters: ProductFilters {
                category_id: Some(category_id),
                ..Default::default()
            },
            hint: FilterHint::default(),
            sort: None,
            limit: self.config.clamp_limit(Some(limit)),
            offset: 0,
            use_semantic: false,
            deadline: None,
        };
        let page = self.run_ladder(&plan);
        Ok(SearchResponse {
            results: page.results,
            total_count: page.total_count,
        })
    }

    // --- Validation ---

    /// Resolve names against the catalog vocabulary and clamp pagination.
    /// A value outside the vocabulary is the caller's error and is never
    /// silently dropped.
    fn validate(&self, request: &SearchRequest) -> TrellisResult<QueryPlan> {
        let mut filters = ProductFilters::default();

        if let Some(brand) = &request.brand {
            filters.brand_id = Some(
                self.snapshot
                    .brand_id_by_name(brand)
                    .ok_or_else(|| TrellisError::invalid_filter("brand", brand, "unknown brand"))?,
            );
        }
        if let Some(category) = &request.category {
            filters.category_id =
                Some(self.snapshot.category_id_by_name(category).ok_or_else(|| {
                    TrellisError::invalid_filter("category", category, "unknown category")
                })?);
        }
        if let Some(size) = &request.size {
            if !self.snapshot.knows_size(size) {
                return Err(TrellisError::invalid_filter(
                    "size",
                    size,
                    "not in catalog vocabulary",
                ));
            }
            filters.size = Some(size.clone());
        }
        if let Some(color) = &request.color {
            if !self.snapshot.knows_color(color) {
                return Err(TrellisError::invalid_filter(
                    "color",
                    color,
                    "not in catalog vocabulary",
                ));
            }
            filters.color = Some(color.clone());
        }
        for (field, bound) in [("price_min", request.price_min), ("price_max", request.price_max)] {
            if let Some(value) = bound {
                if !value.is_finite() || value < 0.0 {
                    return Err(TrellisError::invalid_filter(
                        field,
                        value.to_string(),
                        "price bounds must be non-negative",
                    ));
                }
            }
        }
        if let (Some(min), Some(max)) = (request.price_min, request.price_max) {
            if min > max {
                return Err(TrellisError::invalid_filter(
                    "price_min",
                    min.to_string(),
                    "greater than price_max",
                ));
            }
        }
        filters.price_min = request.price_min;
        filters.price_max = request.price_max;
        filters.on_sale = request.on_sale;

        Ok(QueryPlan {
            query_text: request
                .query_text
                .as_deref()
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map(str::to_string),
            filters,
            hint: FilterHint {
                brand: request.brand.clone(),
                category: request.category.clone(),
            },
            sort: request.sort_by,
            limit: self.config.clamp_limit(request.limit),
            offset: request.offset,
            use_semantic: request.semantic_enabled(),
            deadline: request.deadline,
        })
    }

    // --- The ladder ---

    fn run_ladder(&self, plan: &QueryPlan) -> MergedPage {
        if plan.deadline_expired() {
            warn!(tier = %Tier::Fallback, cause = "deadline exceeded at start", "ladder shortcut");
            return self.fallback_page(plan, None);
        }

        // SEMANTIC: only with query text, and only when the caller wants it.
        let candidates = match &plan.query_text {
            Some(query) if plan.use_semantic => self.semantic_candidates(query, plan),
            _ => None,
        };

        if plan.deadline_expired() {
            warn!(
                tier = %Tier::Fallback,
                cause = "deadline exceeded after semantic tier",
                "ladder shortcut"
            );
            return self.fallback_page(plan, candidates.as_deref());
        }

        match candidates {
            Some(candidates) => self.structured_filter_page(plan, &candidates),
            None => self.structured_only_page(plan),
        }
    }

    /// SEMANTIC state: candidate generation. Empty results and index errors
    /// both route to the structured-only path.
    fn semantic_candidates(&self, query: &str, plan: &QueryPlan) -> Option<Vec<SearchCandidate>> {
        match self.index.semantic_search(query, &plan.hint, plan.limit) {
            Ok(candidates) if candidates.is_empty() => {
                debug!(tier = %Tier::Semantic, "no candidates, taking structured-only path");
                None
            }
            Ok(candidates) => {
                debug!(tier = %Tier::Semantic, count = candidates.len(), "candidates generated");
                Some(candidates)
            }
            Err(e) => {
                warn!(tier = %Tier::Semantic, cause = %e, "tier failed, taking structured-only path");
                None
            }
        }
    }

    /// STRUCTURED_FILTER state: exact filters over the candidate set. On
    /// store failure the fallback stays *restricted to the candidate ids*,
    /// preserving the semantic narrowing already achieved.
    fn structured_filter_page(
        &self,
        plan: &QueryPlan,
        candidates: &[SearchCandidate],
    ) -> MergedPage {
        let ids: Vec<ProductId> = candidates.iter().map(|c| c.product_id.clone()).collect();
        match self.store.search_within(&ids, &plan.filters) {
            Ok(rows) => rank::merge(
                Some(candidates),
                rows,
                true,
                plan.sort,
                plan.limit,
                plan.offset,
            ),
            Err(e) => {
                warn!(tier = %Tier::Structured, cause = %e, "tier failed, falling back restricted to candidates");
                self.fallback_page(plan, Some(candidates))
            }
        }
    }

    /// STRUCTURED_ONLY state: full filters (query text becomes a substring
    /// filter) with SQL-side ordering; the store also supplies the
    /// pre-pagination total.
    fn structured_only_page(&self, plan: &QueryPlan) -> MergedPage {
        let mut filters = plan.filters.clone();
        filters.text = plan.query_text.clone();
        let fetch = plan.offset.saturating_add(plan.limit);

        let fetched = self
            .store
            .filter_search(&filters, plan.sort, fetch, 0)
            .and_then(|rows| {
                let total = self.store.count(&filters)?;
                Ok((rows, total))
            });

        match fetched {
            Ok((rows, total)) => {
                let mut page = rank::merge(None, rows, false, plan.sort, plan.limit, plan.offset);
                page.total_count = total as usize;
                page
            }
            Err(e) => {
                warn!(tier = %Tier::Structured, cause = %e, "tier failed, falling back unrestricted");
                self.fallback_page(plan, None)
            }
        }
    }

    /// FALLBACK_FILTER state: the terminal rung — never fails.
    fn fallback_page(
        &self,
        plan: &QueryPlan,
        candidates: Option<&[SearchCandidate]>,
    ) -> MergedPage {
        match candidates {
            Some(candidates) => {
                let ids: Vec<ProductId> =
                    candidates.iter().map(|c| c.product_id.clone()).collect();
                let rows = self.snapshot.fallback_search_within(&ids, &plan.filters);
                rank::merge(
                    Some(candidates),
                    rows,
                    true,
                    plan.sort,
                    plan.limit,
                    plan.offset,
                )
            }
            None => {
                let rows = self.snapshot.fallback_search(
                    plan.query_text.as_deref(),
                    &plan.filters,
                    &self.lexicon,
                );
                rank::merge(None, rows, false, plan.sort, plan.limit, plan.offset)
            }
        }
    }
}
