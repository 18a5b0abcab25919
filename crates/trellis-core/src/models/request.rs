//! The exposed search request/response surface.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::deadline::Deadline;

use super::hit::RankedResult;

/// Explicit sort override (e.g. "most expensive" → `PriceDesc`). When set,
/// it replaces both the candidate-rank ordering and the structured default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    PriceAsc,
    PriceDesc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// A pre-extracted product query, as produced by the upstream NLU layer.
/// Names (brand/category/size/color) are validated here against the catalog
/// vocabulary before the ladder runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    /// Free-text part of the query; absence means structured-only search.
    pub query_text: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub on_sale: Option<bool>,
    pub sort_by: Option<SortOrder>,
    pub limit: Option<usize>,
    pub offset: usize,
    /// Allows the caller to force the structured-only path.
    pub use_semantic: Option<bool>,
    /// Budget for the whole query; once exceeded the ladder jumps straight
    /// to the in-memory fallback at the next tier boundary.
    #[serde(skip)]
    pub deadline: Option<Deadline>,
}

impl SearchRequest {
    /// Plain-text query with default pagination.
    pub fn from_text(query: impl Into<String>) -> Self {
        Self {
            query_text: Some(query.into()),
            ..Default::default()
        }
    }

    pub fn semantic_enabled(&self) -> bool {
        self.use_semantic.unwrap_or(true)
    }
}

/// The paginated answer. `total_count` is the size of the fully merged and
/// ordered result set before pagination was applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<RankedResult>,
    pub total_count: usize,
}

impl SearchResponse {
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
            total_count: 0,
        }
    }
}
