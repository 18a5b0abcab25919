//! Property tests for the retrieval laws: the structured tier never returns
//! anything the fallback would not, paging partitions cleanly, and identical
//! queries rank identically.

use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;

use trellis_core::catalog::{BrandId, CategoryId};
use trellis_core::config::RetrievalConfig;
use trellis_core::errors::IndexError;
use trellis_core::models::{FilterHint, ProductFilters, SearchCandidate, SearchRequest};
use trellis_core::traits::{IProductStore, ISemanticIndex};
use trellis_retrieval::{CatalogSnapshot, LexiconMatcher, SearchEngine};
use trellis_store::StoreEngine;

use test_fixtures::{sample_brands, sample_categories, sample_inventory, sample_products};

fn seeded_store() -> StoreEngine {
    let store = StoreEngine::open_in_memory().expect("store");
    store.load_brands(&sample_brands()).unwrap();
    store.load_categories(&sample_categories()).unwrap();
    store.load_products(&sample_products()).unwrap();
    store.load_inventory(&sample_inventory()).unwrap();
    store
}

/// A semantic tier that never produces candidates — these laws concern the
/// structured and fallback tiers.
struct NullIndex;

impl ISemanticIndex for NullIndex {
    fn semantic_search(
        &self,
        _query_text: &str,
        _hint: &FilterHint,
        _limit: usize,
    ) -> Result<Vec<SearchCandidate>, IndexError> {
        Ok(Vec::new())
    }

    fn len(&self) -> usize {
        0
    }
}

fn filter_strategy() -> impl Strategy<Value = ProductFilters> {
    (
        proptest::option::of(prop_oneof![
            Just(CategoryId(1)),
            Just(CategoryId(2)),
            Just(CategoryId(6)),
            Just(CategoryId(7)),
            Just(CategoryId(11)),
        ]),
        proptest::option::of(prop_oneof![
            Just(BrandId(1)),
            Just(BrandId(2)),
            Just(BrandId(3)),
            Just(BrandId(4)),
        ]),
        proptest::option::of(60.0f64..220.0),
        proptest::option::of(60.0f64..220.0),
        proptest::option::of(prop_oneof![
            Just("8".to_string()),
            Just("9".to_string()),
            Just("12".to_string()),
        ]),
        proptest::option::of(prop_oneof![
            Just("Black".to_string()),
            Just("white".to_string()),
            Just("Grey".to_string()),
        ]),
        proptest::option::of(proptest::bool::ANY),
        proptest::option::of(prop_oneof![
            Just("cushioning".to_string()),
            Just("classic".to_string()),
            Just("trainer".to_string()),
        ]),
    )
        .prop_map(
            |(category_id, brand_id, min, max, size, color, on_sale, text)| {
                // Keep bounds well-formed; validation rejects crossed ranges.
                let (price_min, price_max) = match (min, max) {
                    (Some(a), Some(b)) if a > b => (Some(b), Some(a)),
                    other => other,
                };
                ProductFilters {
                    category_id,
                    brand_id,
                    price_min,
                    price_max,
                    size,
                    color,
                    on_sale,
                    text,
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// For every filter set, the structured tier's answer is contained in
    /// the fallback tier's answer over the identical snapshot.
    #[test]
    fn filter_search_results_are_a_subset_of_fallback_results(filters in filter_strategy()) {
        let store = seeded_store();
        let snapshot = CatalogSnapshot::load(&store as &dyn IProductStore).unwrap();
        let lexicon = LexiconMatcher::new(
            snapshot.brand_vocabulary(),
            snapshot.category_vocabulary(),
            &[],
        );

        let store_ids: HashSet<String> = store
            .filter_search(&filters, None, 100, 0)
            .unwrap()
            .into_iter()
            .map(|h| h.product.id.to_string())
            .collect();
        let fallback_ids: HashSet<String> = snapshot
            .fallback_search(None, &filters, &lexicon)
            .into_iter()
            .map(|h| h.product.id.to_string())
            .collect();

        prop_assert!(store_ids.is_subset(&fallback_ids));
    }

    /// Consecutive pages never duplicate or skip items, for any page size.
    #[test]
    fn consecutive_pages_partition_the_result_set(page_size in 1usize..5) {
        let store = Arc::new(seeded_store());
        let snapshot = Arc::new(
            CatalogSnapshot::load(store.as_ref() as &dyn IProductStore).unwrap(),
        );
        let engine = SearchEngine::new(
            store,
            Arc::new(NullIndex),
            snapshot,
            RetrievalConfig::default(),
        );

        let full = engine
            .search(&SearchRequest { limit: Some(50), ..Default::default() })
            .unwrap();

        let mut paged = Vec::new();
        let mut offset = 0;
        loop {
            let page = engine
                .search(&SearchRequest {
                    limit: Some(page_size),
                    offset,
                    ..Default::default()
                })
                .unwrap();
            prop_assert!(page.results.len() <= page_size);
            if page.results.is_empty() {
                break;
            }
            paged.extend(page.results);
            offset += page_size;
        }

        prop_assert_eq!(full.results, paged);
    }

    /// Identical queries against an unchanged catalog rank identically.
    #[test]
    fn repeated_queries_are_deterministic(filters in filter_strategy()) {
        let store = Arc::new(seeded_store());
        let snapshot = Arc::new(
            CatalogSnapshot::load(store.as_ref() as &dyn IProductStore).unwrap(),
        );
        let engine = SearchEngine::new(
            store.clone(),
            Arc::new(NullIndex),
            snapshot.clone(),
            RetrievalConfig::default(),
        );

        // Drive the ladder twice at the store level with the raw filters.
        let first = store.filter_search(&filters, None, 50, 0).unwrap();
        let second = store.filter_search(&filters, None, 50, 0).unwrap();
        prop_assert_eq!(&first, &second);

        // And twice through the fallback tier.
        let lexicon = LexiconMatcher::new(
            snapshot.brand_vocabulary(),
            snapshot.category_vocabulary(),
            &[],
        );
        let third = snapshot.fallback_search(None, &filters, &lexicon);
        let fourth = snapshot.fallback_search(None, &filters, &lexicon);
        prop_assert_eq!(&third, &fourth);

        // Engine-level repeatability on an unfiltered browse.
        let a = engine.search(&SearchRequest::default()).unwrap();
        let b = engine.search(&SearchRequest::default()).unwrap();
        prop_assert_eq!(a, b);
    }
}
