//! Per-variant inventory records.

use serde::{Deserialize, Serialize};

use super::ids::ProductId;

/// Physical location metadata for a stocked variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockLocation {
    pub warehouse: String,
    pub aisle: String,
    pub shelf: u32,
}

/// Stock for one (product, size, color) variant. The composite key is
/// unique; quantity never goes negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
    pub quantity: u32,
    pub location: Option<StockLocation>,
}

impl InventoryRecord {
    /// Known-present and known-positive. Distinct from "unknown" — a store
    /// outage must never be reported as out of stock.
    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }

    /// Whether this record covers the given variant (color compares
    /// case-insensitively, matching the catalog convention).
    pub fn matches_variant(&self, size: &str, color: &str) -> bool {
        self.size == size && self.color.eq_ignore_ascii_case(color)
    }
}
