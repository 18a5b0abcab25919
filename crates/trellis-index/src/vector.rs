//! In-process vector index.
//!
//! A brute-force cosine scan over unit-normalized document vectors with
//! coarse brand/category pre-filtering. Rebuilt at process start; small
//! catalogs do not justify an external ANN service, and the scan keeps
//! results fully deterministic.

use trellis_core::catalog::ProductId;
use trellis_core::errors::IndexError;
use trellis_core::models::FilterHint;

/// One indexed document.
pub struct IndexEntry {
    pub product_id: ProductId,
    /// Unit-normalized embedding.
    embedding: Vec<f32>,
    pub brand_name: String,
    pub category_name: String,
}

/// Brute-force cosine index.
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
    dimensions: usize,
}

impl VectorIndex {
    pub fn new(dimensions: usize) -> Self {
        Self {
            entries: Vec::new(),
            dimensions,
        }
    }

    /// Insert a document vector; normalized on the way in.
    pub fn insert(
        &mut self,
        product_id: ProductId,
        embedding: Vec<f32>,
        brand_name: String,
        category_name: String,
    ) -> Result<(), IndexError> {
        if embedding.len() != self.dimensions {
            return Err(IndexError::DimensionMismatch {
                index_dims: self.dimensions,
                query_dims: embedding.len(),
            });
        }
        self.entries.push(IndexEntry {
            product_id,
            embedding: normalize(embedding),
            brand_name,
            category_name,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Nearest neighbors by cosine distance, best first. Ties break by
    /// product id so identical catalogs always rank identically. Entries
    /// with no positive similarity are dropped.
    pub fn search(
        &self,
        query: &[f32],
        k: usize,
        hint: &FilterHint,
    ) -> Result<Vec<(ProductId, f64)>, IndexError> {
        if query.len() != self.dimensions {
            return Err(IndexError::DimensionMismatch {
                index_dims: self.dimensions,
                query_dims: query.len(),
            });
        }
        let query = normalize(query.to_vec());
        if query.iter().all(|&x| x == 0.0) {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(ProductId, f64)> = self
            .entries
            .iter()
            .filter(|entry| matches_hint(entry, hint))
            .filter_map(|entry| {
                let similarity: f64 = entry
                    .embedding
                    .iter()
                    .zip(&query)
                    .map(|(a, b)| (*a as f64) * (*b as f64))
                    .sum();
                (similarity > 0.0).then(|| (entry.product_id.clone(), 1.0 - similarity))
            })
            .collect();

        scored.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scored.truncate(k);
        Ok(scored)
    }
}

fn matches_hint(entry: &IndexEntry, hint: &FilterHint) -> bool {
    if let Some(brand) = &hint.brand {
        if !entry.brand_name.eq_ignore_ascii_case(brand) {
            return false;
        }
    }
    if let Some(category) = &hint.category {
        if !entry.category_name.eq_ignore_ascii_case(category) {
            return false;
        }
    }
    true
}

fn normalize(mut v: Vec<f32>) -> Vec<f32> {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        for x in &mut v {
            *x /= norm;
        }
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_with(entries: &[(&str, Vec<f32>, &str, &str)]) -> VectorIndex {
        let mut index = VectorIndex::new(3);
        for (id, vec, brand, category) in entries {
            index
                .insert(
                    ProductId::from(*id),
                    vec.clone(),
                    brand.to_string(),
                    category.to_string(),
                )
                .unwrap();
        }
        index
    }

    #[test]
    fn nearest_neighbor_comes_first() {
        let index = index_with(&[
            ("p-a", vec![1.0, 0.0, 0.0], "Nike", "Running"),
            ("p-b", vec![0.0, 1.0, 0.0], "Adidas", "Running"),
            ("p-c", vec![0.7, 0.7, 0.0], "Puma", "Casual"),
        ]);
        let hits = index
            .search(&[1.0, 0.1, 0.0], 3, &FilterHint::default())
            .unwrap();
        assert_eq!(hits[0].0.as_str(), "p-a");
        assert!(hits[0].1 < hits[1].1);
    }

    #[test]
    fn hint_restricts_candidates() {
        let index = index_with(&[
            ("p-a", vec![1.0, 0.0, 0.0], "Nike", "Running"),
            ("p-b", vec![1.0, 0.0, 0.0], "Adidas", "Running"),
        ]);
        let hint = FilterHint {
            brand: Some("adidas".to_string()),
            category: None,
        };
        let hits = index.search(&[1.0, 0.0, 0.0], 5, &hint).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0.as_str(), "p-b");
    }

    #[test]
    fn equal_distances_tie_break_by_id() {
        let index = index_with(&[
            ("p-z", vec![1.0, 0.0, 0.0], "Nike", "Running"),
            ("p-a", vec![1.0, 0.0, 0.0], "Nike", "Running"),
        ]);
        let hits = index
            .search(&[1.0, 0.0, 0.0], 5, &FilterHint::default())
            .unwrap();
        assert_eq!(hits[0].0.as_str(), "p-a");
        assert_eq!(hits[1].0.as_str(), "p-z");
    }

    #[test]
    fn dimension_mismatch_is_an_error() {
        let index = index_with(&[("p-a", vec![1.0, 0.0, 0.0], "Nike", "Running")]);
        let err = index
            .search(&[1.0, 0.0], 5, &FilterHint::default())
            .unwrap_err();
        assert!(matches!(err, IndexError::DimensionMismatch { .. }));
    }

    #[test]
    fn zero_query_returns_nothing() {
        let index = index_with(&[("p-a", vec![1.0, 0.0, 0.0], "Nike", "Running")]);
        let hits = index
            .search(&[0.0, 0.0, 0.0], 5, &FilterHint::default())
            .unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn orthogonal_entries_are_dropped() {
        let index = index_with(&[
            ("p-a", vec![1.0, 0.0, 0.0], "Nike", "Running"),
            ("p-b", vec![0.0, 1.0, 0.0], "Nike", "Running"),
        ]);
        let hits = index
            .search(&[1.0, 0.0, 0.0], 5, &FilterHint::default())
            .unwrap();
        assert_eq!(hits.len(), 1);
    }
}
