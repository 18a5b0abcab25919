//! Typed product attributes.
//!
//! Attributes arrive as a validated structure rather than a free-form JSON
//! map, so the retrieval core can assume well-formed inputs. Validation is
//! enforced when the catalog is loaded, not per query.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Target demographic for sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Men,
    Women,
    Kids,
    Unisex,
}

/// Validated product attributes.
///
/// `sizes` is an ordered set (catalog order, no duplicates); `colors` and
/// `materials` are sets with original casing preserved. Size matching is
/// exact; color matching is case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductAttributes {
    pub gender: Option<Gender>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub materials: Vec<String>,
    /// Free-form spec key/value pairs (sorted for stable serialization).
    pub specs: BTreeMap<String, String>,
}

impl ProductAttributes {
    /// Whether the product is offered in the given size (exact match).
    pub fn has_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    /// Whether the product is offered in the given color (case-insensitive).
    pub fn has_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c.eq_ignore_ascii_case(color))
    }

    /// Check structural invariants: no empty entries, no duplicate sizes,
    /// no duplicate colors (case-insensitive).
    pub fn validate(&self) -> Result<(), String> {
        if self.sizes.iter().any(|s| s.trim().is_empty()) {
            return Err("empty size entry".to_string());
        }
        if self.colors.iter().any(|c| c.trim().is_empty()) {
            return Err("empty color entry".to_string());
        }
        for (i, size) in self.sizes.iter().enumerate() {
            if self.sizes[..i].contains(size) {
                return Err(format!("duplicate size entry: {size}"));
            }
        }
        for (i, color) in self.colors.iter().enumerate() {
            if self.colors[..i]
                .iter()
                .any(|c| c.eq_ignore_ascii_case(color))
            {
                return Err(format!("duplicate color entry: {color}"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(sizes: &[&str], colors: &[&str]) -> ProductAttributes {
        ProductAttributes {
            sizes: sizes.iter().map(|s| s.to_string()).collect(),
            colors: colors.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn size_match_is_exact() {
        let a = attrs(&["9", "9.5", "10"], &[]);
        assert!(a.has_size("9.5"));
        assert!(!a.has_size("9.50"));
    }

    #[test]
    fn color_match_ignores_case() {
        let a = attrs(&[], &["Black", "Navy"]);
        assert!(a.has_color("black"));
        assert!(a.has_color("NAVY"));
        assert!(!a.has_color("red"));
    }

    #[test]
    fn validate_rejects_duplicates() {
        assert!(attrs(&["9", "9"], &[]).validate().is_err());
        assert!(attrs(&[], &["Black", "black"]).validate().is_err());
        assert!(attrs(&["9", "10"], &["Black", "White"]).validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_entries() {
        assert!(attrs(&[""], &[]).validate().is_err());
        assert!(attrs(&[], &["  "]).validate().is_err());
    }
}
