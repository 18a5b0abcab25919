//! Integration tests for the structured store adapter: filter semantics,
//! ordering, pagination, restriction, and inventory lookups.

use trellis_core::catalog::ProductId;
use trellis_core::models::ProductFilters;
use trellis_core::traits::IProductStore;
use trellis_store::StoreEngine;

use test_fixtures::{
    sample_brands, sample_categories, sample_inventory, sample_products, ProductBuilder,
};

fn seeded_store() -> StoreEngine {
    let store = StoreEngine::open_in_memory().expect("in-memory store");
    store.load_brands(&sample_brands()).expect("brands");
    store
        .load_categories(&sample_categories())
        .expect("categories");
    store.load_products(&sample_products()).expect("products");
    store
        .load_inventory(&sample_inventory())
        .expect("inventory");
    store
}

fn ids(hits: &[trellis_core::models::ProductHit]) -> Vec<&str> {
    hits.iter().map(|h| h.product.id.as_str()).collect()
}

#[test]
fn default_order_is_featured_then_effective_price_then_id() {
    let store = seeded_store();
    let hits = store
        .filter_search(&ProductFilters::default(), None, 20, 0)
        .unwrap();
    assert_eq!(
        ids(&hits),
        vec!["p-001", "p-004", "p-005", "p-008", "p-006", "p-003", "p-002", "p-007"]
    );
}

#[test]
fn inactive_products_are_invisible() {
    let store = seeded_store();
    let hits = store
        .filter_search(&ProductFilters::default(), None, 50, 0)
        .unwrap();
    assert!(!ids(&hits).contains(&"p-009"));
    assert_eq!(store.count(&ProductFilters::default()).unwrap(), 8);
}

#[test]
fn price_bounds_compare_against_effective_price() {
    let store = StoreEngine::open_in_memory().unwrap();
    store.load_brands(&sample_brands()).unwrap();
    store.load_categories(&sample_categories()).unwrap();
    store
        .load_products(&[
            ProductBuilder::new("p-sale", "Discounted Trainer")
                .price(150.0)
                .on_sale(130.0)
                .build(),
            ProductBuilder::new("p-full", "Full Price Trainer")
                .price(150.0)
                .build(),
        ])
        .unwrap();

    let filters = ProductFilters {
        price_max: Some(140.0),
        ..Default::default()
    };
    let hits = store.filter_search(&filters, None, 10, 0).unwrap();
    // 150 on sale at 130 is included; 150 at full price is not.
    assert_eq!(ids(&hits), vec!["p-sale"]);

    let filters = ProductFilters {
        price_min: Some(140.0),
        ..Default::default()
    };
    let hits = store.filter_search(&filters, None, 10, 0).unwrap();
    assert_eq!(ids(&hits), vec!["p-full"]);
}

#[test]
fn size_and_color_match_attributes_not_stock() {
    let store = seeded_store();
    // p-001 in White size 9 has zero stock but carries the attribute.
    let filters = ProductFilters {
        size: Some("9".to_string()),
        color: Some("white".to_string()),
        ..Default::default()
    };
    let hits = store.filter_search(&filters, None, 20, 0).unwrap();
    assert!(ids(&hits).contains(&"p-001"));
}

#[test]
fn category_filter_includes_direct_children() {
    let store = seeded_store();
    let athletic = ProductFilters {
        category_id: Some(trellis_core::catalog::CategoryId(1)),
        ..Default::default()
    };
    let hits = store.filter_search(&athletic, None, 20, 0).unwrap();
    // Athletic covers Running (6) and Basketball (7) but not Sneakers (11).
    assert!(ids(&hits).contains(&"p-003"));
    assert!(ids(&hits).contains(&"p-001"));
    assert!(!ids(&hits).contains(&"p-005"));
}

#[test]
fn text_filter_is_case_insensitive_substring() {
    let store = seeded_store();
    let filters = ProductFilters {
        text: Some("CUSHIONING".to_string()),
        ..Default::default()
    };
    let hits = store.filter_search(&filters, None, 20, 0).unwrap();
    let found = ids(&hits);
    assert!(found.contains(&"p-001"));
    assert!(found.contains(&"p-004"));
    assert!(!found.contains(&"p-005"));
}

#[test]
fn pagination_splits_without_duplicates_or_gaps() {
    let store = seeded_store();
    let all = store
        .filter_search(&ProductFilters::default(), None, 20, 0)
        .unwrap();
    let mut paged = Vec::new();
    for page in 0..3 {
        paged.extend(
            store
                .filter_search(&ProductFilters::default(), None, 3, page * 3)
                .unwrap(),
        );
    }
    assert_eq!(ids(&all), ids(&paged));
    assert_eq!(store.count(&ProductFilters::default()).unwrap(), all.len() as u64);
}

#[test]
fn explicit_price_sort_overrides_the_featured_default() {
    let store = seeded_store();
    let desc = store
        .filter_search(
            &ProductFilters::default(),
            Some(trellis_core::models::SortOrder::PriceDesc),
            3,
            0,
        )
        .unwrap();
    // Pure effective-price order: featured products get no head start.
    assert_eq!(ids(&desc), vec!["p-007", "p-004", "p-002"]);

    let asc = store
        .filter_search(
            &ProductFilters::default(),
            Some(trellis_core::models::SortOrder::PriceAsc),
            2,
            0,
        )
        .unwrap();
    assert_eq!(ids(&asc), vec!["p-005", "p-008"]);
}

#[test]
fn search_within_restricts_and_refilters() {
    let store = seeded_store();
    let candidates = vec![
        ProductId::from("p-001"),
        ProductId::from("p-004"),
        ProductId::from("p-005"),
    ];
    let filters = ProductFilters {
        brand_id: Some(trellis_core::catalog::BrandId(2)),
        ..Default::default()
    };
    let hits = store.search_within(&candidates, &filters).unwrap();
    // Only the Adidas candidates survive the brand filter.
    assert_eq!(ids(&hits), vec!["p-004", "p-005"]);

    let none = store.search_within(&[], &filters).unwrap();
    assert!(none.is_empty());
}

#[test]
fn filtered_results_are_a_subset_of_unfiltered() {
    let store = seeded_store();
    let unfiltered: Vec<String> = store
        .filter_search(&ProductFilters::default(), None, 50, 0)
        .unwrap()
        .iter()
        .map(|h| h.product.id.to_string())
        .collect();
    let filters = ProductFilters {
        size: Some("9".to_string()),
        price_max: Some(160.0),
        ..Default::default()
    };
    for hit in store.filter_search(&filters, None, 50, 0).unwrap() {
        assert!(unfiltered.contains(&hit.product.id.to_string()));
    }
}

#[test]
fn variant_stock_distinguishes_empty_from_missing() {
    let store = seeded_store();
    let id = ProductId::from("p-001");

    // Known-empty variant: record exists with quantity 0.
    let empty = store.variant_stock(&id, "9", "White").unwrap();
    assert_eq!(empty.unwrap().quantity, 0);

    // Variant never stocked: no record at all.
    let missing = store.variant_stock(&id, "13", "Purple").unwrap();
    assert!(missing.is_none());

    // Color lookup ignores case.
    let stocked = store.variant_stock(&id, "9", "black").unwrap().unwrap();
    assert!(stocked.quantity > 0);
    assert_eq!(stocked.location.as_ref().unwrap().warehouse, "main");
}

#[test]
fn product_inventory_is_ordered_by_size_then_color() {
    let store = seeded_store();
    let records = store
        .product_inventory(&ProductId::from("p-001"))
        .unwrap();
    let variants: Vec<(String, String)> = records
        .iter()
        .map(|r| (r.size.clone(), r.color.clone()))
        .collect();
    assert_eq!(
        variants,
        vec![
            ("10".to_string(), "Black".to_string()),
            ("9".to_string(), "Black".to_string()),
            ("9".to_string(), "White".to_string()),
        ]
    );
}

#[test]
fn get_product_resolves_names_and_hides_inactive() {
    let store = seeded_store();
    let hit = store
        .get_product(&ProductId::from("p-004"))
        .unwrap()
        .unwrap();
    assert_eq!(hit.brand_name, "Adidas");
    assert_eq!(hit.category_name, "Running");

    assert!(store
        .get_product(&ProductId::from("p-009"))
        .unwrap()
        .is_none());
}

#[test]
fn category_name_resolution_ignores_case() {
    let store = seeded_store();
    let id = store.category_id_by_name("running").unwrap().unwrap();
    assert_eq!(id.0, 6);
    assert!(store.category_id_by_name("skiing").unwrap().is_none());
}

#[test]
fn file_backed_store_reads_through_the_pool() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.db");
    let store =
        StoreEngine::open(&path, &trellis_core::config::StoreConfig::default()).unwrap();
    store.load_brands(&sample_brands()).unwrap();
    store.load_categories(&sample_categories()).unwrap();
    store.load_products(&sample_products()).unwrap();

    // Reads go through the read-only pool and still see committed writes.
    let hits = store
        .filter_search(&ProductFilters::default(), None, 20, 0)
        .unwrap();
    assert_eq!(hits.len(), 8);
}

#[test]
fn dump_catalog_covers_active_reference_data() {
    let store = seeded_store();
    let dump = store.dump_catalog().unwrap();
    assert_eq!(dump.brands.len(), 4);
    assert_eq!(dump.categories.len(), 5);
    assert_eq!(dump.products.len(), 8);
    assert!(dump.products.iter().all(|p| p.is_active));
}
