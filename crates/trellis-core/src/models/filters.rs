//! Exact structured filters, AND-combined.

use serde::{Deserialize, Serialize};

use crate::catalog::{BrandId, CategoryId, Product};

/// Resolved exact filters applied by the structured store and the in-memory
/// fallback. All present fields must match (AND semantics). Price bounds
/// compare against the *effective* price. Size/color match the attribute
/// sets, not stock.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductFilters {
    /// Matches the category itself or any of its direct children.
    pub category_id: Option<CategoryId>,
    pub brand_id: Option<BrandId>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub on_sale: Option<bool>,
    /// Case-insensitive substring over name + description.
    pub text: Option<String>,
}

impl ProductFilters {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Evaluate every filter except the category tree (which needs category
    /// metadata the product alone does not carry). Used by the in-memory
    /// fallback; the structured store compiles the same predicate into SQL.
    pub fn matches_product(&self, product: &Product) -> bool {
        if !product.is_active {
            return false;
        }
        if let Some(brand_id) = self.brand_id {
            if product.brand_id != brand_id {
                return false;
            }
        }
        let effective = product.effective_price();
        if let Some(min) = self.price_min {
            if effective < min {
                return false;
            }
        }
        if let Some(max) = self.price_max {
            if effective > max {
                return false;
            }
        }
        if let Some(size) = &self.size {
            if !product.attributes.has_size(size) {
                return false;
            }
        }
        if let Some(color) = &self.color {
            if !product.attributes.has_color(color) {
                return false;
            }
        }
        if let Some(on_sale) = self.on_sale {
            if product.is_on_sale != on_sale {
                return false;
            }
        }
        if let Some(text) = &self.text {
            let needle = text.to_lowercase();
            let haystack =
                format!("{} {}", product.name, product.description).to_lowercase();
            if !haystack.contains(&needle) {
                return false;
            }
        }
        true
    }
}
