//! Relevance score newtype.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic relevance clamped to [0.0, 1.0], rounded to two decimals.
/// Only candidates of semantic origin carry one.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct RelevanceScore(f64);

impl RelevanceScore {
    /// Create a new score, rounding to two decimals and clamping to [0, 1].
    pub fn new(value: f64) -> Self {
        let rounded = (value * 100.0).round() / 100.0;
        Self(rounded.clamp(0.0, 1.0))
    }

    /// Convert an index distance into a score: `round(1 - distance, 2)`.
    pub fn from_distance(distance: f64) -> Self {
        Self::new(1.0 - distance)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for RelevanceScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<f64> for RelevanceScore {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}
