//! Product detail assembly.

use serde::{Deserialize, Serialize};

use trellis_core::catalog::{InventoryRecord, Product};
use trellis_core::models::ProductHit;

/// A single product with resolved names and (when the store answered)
/// per-variant stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetails {
    pub product: Product,
    pub brand_name: String,
    pub category_name: String,
    /// Variant records, empty when `stock_known` is false.
    pub variants: Vec<InventoryRecord>,
    /// False when the durable store was unreachable and details degraded to
    /// the snapshot — variant stock is then indeterminate, not zero.
    pub stock_known: bool,
}

impl ProductDetails {
    pub fn from_hit(hit: ProductHit, variants: Vec<InventoryRecord>, stock_known: bool) -> Self {
        Self {
            product: hit.product,
            brand_name: hit.brand_name,
            category_name: hit.category_name,
            variants,
            stock_known,
        }
    }

    /// Sizes with at least one stocked variant, in catalog size order.
    pub fn in_stock_sizes(&self) -> Vec<&str> {
        self.product
            .attributes
            .sizes
            .iter()
            .map(String::as_str)
            .filter(|size| {
                self.variants
                    .iter()
                    .any(|v| v.size == *size && v.in_stock())
            })
            .collect()
    }

    /// Colors with at least one stocked variant, in catalog order.
    pub fn in_stock_colors(&self) -> Vec<&str> {
        self.product
            .attributes
            .colors
            .iter()
            .map(String::as_str)
            .filter(|color| {
                self.variants
                    .iter()
                    .any(|v| v.color.eq_ignore_ascii_case(color) && v.in_stock())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::catalog::{BrandId, CategoryId, ProductAttributes, ProductId};

    fn details() -> ProductDetails {
        let product = Product {
            id: ProductId::from("p-1"),
            sku: "SKU-1".to_string(),
            name: "Pegasus".to_string(),
            description: String::new(),
            brand_id: BrandId(1),
            category_id: CategoryId(6),
            price: 120.0,
            sale_price: None,
            is_on_sale: false,
            is_active: true,
            is_featured: false,
            attributes: ProductAttributes {
                sizes: vec!["8".to_string(), "9".to_string(), "10".to_string()],
                colors: vec!["Black".to_string(), "White".to_string()],
                ..Default::default()
            },
            images: Vec::new(),
            keywords: Vec::new(),
        };
        let variant = |size: &str, color: &str, quantity: u32| InventoryRecord {
            product_id: ProductId::from("p-1"),
            size: size.to_string(),
            color: color.to_string(),
            quantity,
            location: None,
        };
        ProductDetails::from_hit(
            ProductHit {
                product,
                brand_name: "Nike".to_string(),
                category_name: "Running".to_string(),
            },
            vec![
                variant("9", "Black", 3),
                variant("9", "White", 0),
                variant("10", "white", 2),
            ],
            true,
        )
    }

    #[test]
    fn in_stock_summaries_respect_quantities_and_order() {
        let d = details();
        assert_eq!(d.in_stock_sizes(), vec!["9", "10"]);
        // "white" stocked in size 10; matching ignores case.
        assert_eq!(d.in_stock_colors(), vec!["Black", "White"]);
    }

    #[test]
    fn degraded_details_report_no_stock_knowledge() {
        let mut d = details();
        d.variants.clear();
        d.stock_known = false;
        assert!(d.in_stock_sizes().is_empty());
        assert!(!d.stock_known);
    }
}
