//! Result merging and ranking.
//!
//! Structured filtering acts as a *filter*, not a reranker: whenever
//! semantic candidates exist, their original rank dictates ordering. An
//! explicit sort override replaces every default key. Pagination is the
//! very last step, applied only after full ordering and deduplication.

use std::collections::{HashMap, HashSet};

use trellis_core::catalog::ProductId;
use trellis_core::models::{
    ProductHit, RankedResult, RelevanceScore, SearchCandidate, SortOrder,
};

/// One fully merged, ordered, paginated result set.
#[derive(Debug, Clone)]
pub struct MergedPage {
    pub results: Vec<RankedResult>,
    /// Size of the merged set before pagination.
    pub total_count: usize,
}

/// Merge candidate and row sets into a final page.
///
/// With candidates: rows are (optionally) restricted to candidate ids, carry
/// the candidate's relevance score, and follow the candidates' rank. Without
/// candidates: featured DESC, effective price ASC, id ASC. An explicit
/// `sort` overrides either ordering with a pure price key. Duplicates keep
/// their first (best-ranked) occurrence.
pub fn merge(
    candidates: Option<&[SearchCandidate]>,
    rows: Vec<ProductHit>,
    restrict_to_candidates: bool,
    sort: Option<SortOrder>,
    limit: usize,
    offset: usize,
) -> MergedPage {
    // Rank and score by candidate id; first occurrence wins.
    let mut candidate_rank: HashMap<&ProductId, (usize, RelevanceScore)> = HashMap::new();
    if let Some(candidates) = candidates {
        for (rank, candidate) in candidates.iter().enumerate() {
            candidate_rank
                .entry(&candidate.product_id)
                .or_insert((rank, candidate.relevance));
        }
    }

    let mut merged: Vec<(usize, RankedResult)> = Vec::with_capacity(rows.len());
    for hit in rows {
        match candidate_rank.get(&hit.product.id) {
            Some((rank, score)) => {
                merged.push((*rank, RankedResult::from_hit(hit, Some(*score))));
            }
            None if candidates.is_some() && restrict_to_candidates => continue,
            None => merged.push((usize::MAX, RankedResult::from_hit(hit, None))),
        }
    }

    match sort {
        Some(order) => sort_by_price(&mut merged, order),
        None if candidates.is_some() => {
            merged.sort_by(|a, b| {
                a.0.cmp(&b.0)
                    .then_with(|| a.1.product.id.cmp(&b.1.product.id))
            });
        }
        None => sort_default(&mut merged),
    }

    // Deduplicate by product id, keeping the first occurrence.
    let mut seen: HashSet<ProductId> = HashSet::new();
    let mut results: Vec<RankedResult> = merged
        .into_iter()
        .map(|(_, result)| result)
        .filter(|result| seen.insert(result.product.id.clone()))
        .collect();

    // Pagination last, after full ordering.
    let total_count = results.len();
    let page: Vec<RankedResult> = if offset >= results.len() {
        Vec::new()
    } else {
        results.drain(..).skip(offset).take(limit).collect()
    };

    MergedPage {
        results: page,
        total_count,
    }
}

fn sort_by_price(merged: &mut [(usize, RankedResult)], order: SortOrder) {
    merged.sort_by(|a, b| {
        let cmp = a.1.effective_price().total_cmp(&b.1.effective_price());
        let cmp = match order {
            SortOrder::PriceAsc => cmp,
            SortOrder::PriceDesc => cmp.reverse(),
        };
        cmp.then_with(|| a.1.product.id.cmp(&b.1.product.id))
    });
}

fn sort_default(merged: &mut [(usize, RankedResult)]) {
    merged.sort_by(|a, b| {
        b.1.product
            .is_featured
            .cmp(&a.1.product.is_featured)
            .then_with(|| a.1.effective_price().total_cmp(&b.1.effective_price()))
            .then_with(|| a.1.product.id.cmp(&b.1.product.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::catalog::{BrandId, CategoryId, Product, ProductAttributes};

    fn hit(id: &str, price: f64, featured: bool) -> ProductHit {
        ProductHit {
            product: Product {
                id: ProductId::from(id),
                sku: format!("SKU-{id}"),
                name: id.to_string(),
                description: String::new(),
                brand_id: BrandId(1),
                category_id: CategoryId(1),
                price,
                sale_price: None,
                is_on_sale: false,
                is_active: true,
                is_featured: featured,
                attributes: ProductAttributes::default(),
                images: Vec::new(),
                keywords: Vec::new(),
            },
            brand_name: "Brand".to_string(),
            category_name: "Category".to_string(),
        }
    }

    fn candidate(id: &str, score: f64) -> SearchCandidate {
        SearchCandidate::new(ProductId::from(id), RelevanceScore::new(score))
    }

    fn result_ids(page: &MergedPage) -> Vec<&str> {
        page.results
            .iter()
            .map(|r| r.product.id.as_str())
            .collect()
    }

    #[test]
    fn candidate_rank_dominates_ordering() {
        // Candidates [(P1,0.9),(P2,0.7),(P3,0.5)]; the structured filter
        // excluded P2, so the merged order is [P1, P3].
        let candidates = vec![
            candidate("P1", 0.9),
            candidate("P2", 0.7),
            candidate("P3", 0.5),
        ];
        // Rows come back cheapest-first; candidate rank must still win.
        let rows = vec![hit("P3", 50.0, true), hit("P1", 200.0, false)];
        let page = merge(Some(&candidates), rows, true, None, 10, 0);
        assert_eq!(result_ids(&page), vec!["P1", "P3"]);
        assert_eq!(page.total_count, 2);
        assert_eq!(page.results[0].relevance_score, Some(RelevanceScore::new(0.9)));
        assert_eq!(page.results[1].relevance_score, Some(RelevanceScore::new(0.5)));
    }

    #[test]
    fn restriction_drops_rows_outside_the_candidate_set() {
        let candidates = vec![candidate("P1", 0.8)];
        let rows = vec![hit("P1", 100.0, false), hit("P9", 10.0, true)];
        let page = merge(Some(&candidates), rows, true, None, 10, 0);
        assert_eq!(result_ids(&page), vec!["P1"]);
    }

    #[test]
    fn without_candidates_featured_then_price_then_id() {
        let rows = vec![
            hit("P3", 80.0, false),
            hit("P2", 95.0, true),
            hit("P4", 80.0, false),
            hit("P1", 120.0, false),
        ];
        let page = merge(None, rows, false, None, 10, 0);
        assert_eq!(result_ids(&page), vec!["P2", "P3", "P4", "P1"]);
        assert!(page.results.iter().all(|r| r.relevance_score.is_none()));
    }

    #[test]
    fn explicit_price_sort_overrides_candidate_rank() {
        let candidates = vec![candidate("P1", 0.9), candidate("P2", 0.5)];
        let rows = vec![hit("P1", 80.0, false), hit("P2", 120.0, false)];
        let page = merge(Some(&candidates), rows, true, Some(SortOrder::PriceDesc), 1, 0);
        // "most expensive" wins over semantic rank.
        assert_eq!(result_ids(&page), vec!["P2"]);
        assert_eq!(page.total_count, 2);
    }

    #[test]
    fn price_desc_with_limit_one_returns_the_most_expensive() {
        let rows = vec![
            hit("P1", 80.0, true),
            hit("P2", 120.0, false),
            hit("P3", 95.0, false),
        ];
        let page = merge(None, rows, false, Some(SortOrder::PriceDesc), 1, 0);
        assert_eq!(result_ids(&page), vec!["P2"]);
        assert_eq!(page.results[0].effective_price(), 120.0);
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let rows = vec![hit("P1", 80.0, false), hit("P1", 80.0, false), hit("P2", 90.0, false)];
        let page = merge(None, rows, false, None, 10, 0);
        assert_eq!(result_ids(&page), vec!["P1", "P2"]);
        assert_eq!(page.total_count, 2);
    }

    #[test]
    fn pagination_is_applied_after_ordering() {
        let rows = vec![
            hit("P1", 10.0, false),
            hit("P2", 20.0, false),
            hit("P3", 30.0, false),
            hit("P4", 40.0, false),
            hit("P5", 50.0, false),
        ];
        let first = merge(None, rows.clone(), false, None, 2, 0);
        let second = merge(None, rows.clone(), false, None, 2, 2);
        let third = merge(None, rows, false, None, 2, 4);
        assert_eq!(result_ids(&first), vec!["P1", "P2"]);
        assert_eq!(result_ids(&second), vec!["P3", "P4"]);
        assert_eq!(result_ids(&third), vec!["P5"]);
        assert_eq!(first.total_count, 5);
        assert_eq!(third.total_count, 5);
    }

    #[test]
    fn offset_past_the_end_yields_an_empty_page() {
        let rows = vec![hit("P1", 10.0, false)];
        let page = merge(None, rows, false, None, 10, 5);
        assert!(page.results.is_empty());
        assert_eq!(page.total_count, 1);
    }
}
