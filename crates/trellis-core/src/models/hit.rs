//! Enriched result rows.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;

use super::relevance::RelevanceScore;

/// A product with its brand and category names resolved — the row shape
/// both the structured store and the fallback produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductHit {
    pub product: Product,
    pub brand_name: String,
    pub category_name: String,
}

impl ProductHit {
    pub fn effective_price(&self) -> f64 {
        self.product.effective_price()
    }
}

/// A final, ordered result. Identical to [`ProductHit`] plus the relevance
/// score when the result came through the semantic tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub product: Product,
    pub brand_name: String,
    pub category_name: String,
    pub relevance_score: Option<RelevanceScore>,
}

impl RankedResult {
    pub fn from_hit(hit: ProductHit, relevance_score: Option<RelevanceScore>) -> Self {
        Self {
            product: hit.product,
            brand_name: hit.brand_name,
            category_name: hit.category_name,
            relevance_score,
        }
    }

    pub fn effective_price(&self) -> f64 {
        self.product.effective_price()
    }
}
