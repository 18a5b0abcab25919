//! Product, brand, and category reference types.

use serde::{Deserialize, Serialize};

use super::attributes::ProductAttributes;
use super::ids::{BrandId, CategoryId, ProductId};

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    /// Stock keeping unit, unique across the catalog.
    pub sku: String,
    pub name: String,
    pub description: String,
    pub brand_id: BrandId,
    pub category_id: CategoryId,
    /// List price.
    pub price: f64,
    /// Discounted price; only meaningful while `is_on_sale` is set.
    pub sale_price: Option<f64>,
    pub is_on_sale: bool,
    /// Inactive products are invisible to every retrieval path.
    pub is_active: bool,
    pub is_featured: bool,
    pub attributes: ProductAttributes,
    pub images: Vec<String>,
    /// Extra terms folded into the search document at index time.
    pub keywords: Vec<String>,
}

impl Product {
    /// The price filters and price ordering compare against: `sale_price`
    /// while on sale, the list price otherwise.
    pub fn effective_price(&self) -> f64 {
        if self.is_on_sale {
            self.sale_price.unwrap_or(self.price)
        } else {
            self.price
        }
    }

    /// Check catalog invariants: positive list price, `is_on_sale` implies
    /// `sale_price < price`, and well-formed attributes.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err(format!("product {} has an empty name", self.id));
        }
        if !(self.price > 0.0) {
            return Err(format!("product {} has non-positive price", self.id));
        }
        if self.is_on_sale {
            match self.sale_price {
                Some(sp) if sp < self.price => {}
                Some(_) => {
                    return Err(format!(
                        "product {} is on sale but sale_price is not below price",
                        self.id
                    ));
                }
                None => {
                    return Err(format!(
                        "product {} is on sale without a sale_price",
                        self.id
                    ));
                }
            }
        }
        self.attributes
            .validate()
            .map_err(|reason| format!("product {}: {reason}", self.id))
    }
}

/// A shoe brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
}

/// A product category. Categories form a shallow tree: a category either is
/// a root or points at a root via `parent_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub parent_id: Option<CategoryId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: f64, sale_price: Option<f64>, on_sale: bool) -> Product {
        Product {
            id: ProductId::from("p-1"),
            sku: "SKU-01-0001".to_string(),
            name: "Test Runner".to_string(),
            description: String::new(),
            brand_id: BrandId(1),
            category_id: CategoryId(1),
            price,
            sale_price,
            is_on_sale: on_sale,
            is_active: true,
            is_featured: false,
            attributes: ProductAttributes::default(),
            images: Vec::new(),
            keywords: Vec::new(),
        }
    }

    #[test]
    fn effective_price_uses_sale_price_only_when_on_sale() {
        assert_eq!(product(150.0, Some(130.0), true).effective_price(), 130.0);
        assert_eq!(product(150.0, Some(130.0), false).effective_price(), 150.0);
        assert_eq!(product(150.0, None, false).effective_price(), 150.0);
    }

    #[test]
    fn validate_enforces_sale_invariant() {
        assert!(product(150.0, Some(130.0), true).validate().is_ok());
        assert!(product(150.0, Some(150.0), true).validate().is_err());
        assert!(product(150.0, None, true).validate().is_err());
        assert!(product(150.0, None, false).validate().is_ok());
    }

    #[test]
    fn validate_rejects_nonsense_prices() {
        assert!(product(0.0, None, false).validate().is_err());
        assert!(product(-5.0, None, false).validate().is_err());
    }
}
