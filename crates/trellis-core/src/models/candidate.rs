//! Semantic search candidates.

use serde::{Deserialize, Serialize};

use crate::catalog::ProductId;

use super::relevance::RelevanceScore;

/// Coarse filters safe to push into the approximate index. Exact
/// numeric/size/color filters must be reapplied downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterHint {
    pub brand: Option<String>,
    pub category: Option<String>,
}

impl FilterHint {
    pub fn is_empty(&self) -> bool {
        self.brand.is_none() && self.category.is_none()
    }
}

/// A product id + relevance score from semantic search, not yet validated
/// against exact filters. Transient — discarded once the query completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCandidate {
    pub product_id: ProductId,
    pub relevance: RelevanceScore,
    /// The hint that was active when this candidate was produced.
    pub hint: FilterHint,
}

impl SearchCandidate {
    pub fn new(product_id: ProductId, relevance: RelevanceScore) -> Self {
        Self {
            product_id,
            relevance,
            hint: FilterHint::default(),
        }
    }

    pub fn with_hint(mut self, hint: FilterHint) -> Self {
        self.hint = hint;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hint_detection() {
        assert!(FilterHint::default().is_empty());
        assert!(!FilterHint {
            brand: Some("Nike".to_string()),
            category: None,
        }
        .is_empty());
    }
}
