//! Shared catalog fixtures for tests and benchmarks.
//!
//! A small deterministic shoe catalog plus a product builder. Ids, prices,
//! and attributes are fixed so ordering assertions stay stable across runs.

use trellis_core::catalog::{
    Brand, BrandId, Category, CategoryId, Gender, InventoryRecord, Product, ProductAttributes,
    ProductId, StockLocation,
};

/// Builder for one-off products in tests.
pub struct ProductBuilder {
    product: Product,
}

impl ProductBuilder {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            product: Product {
                id: ProductId::from(id),
                sku: format!("SKU-{id}"),
                name: name.to_string(),
                description: String::new(),
                brand_id: BrandId(1),
                category_id: CategoryId(6),
                price: 100.0,
                sale_price: None,
                is_on_sale: false,
                is_active: true,
                is_featured: false,
                attributes: ProductAttributes::default(),
                images: Vec::new(),
                keywords: Vec::new(),
            },
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.product.description = description.to_string();
        self
    }

    pub fn brand(mut self, id: i64) -> Self {
        self.product.brand_id = BrandId(id);
        self
    }

    pub fn category(mut self, id: i64) -> Self {
        self.product.category_id = CategoryId(id);
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.product.price = price;
        self
    }

    pub fn on_sale(mut self, sale_price: f64) -> Self {
        self.product.sale_price = Some(sale_price);
        self.product.is_on_sale = true;
        self
    }

    pub fn featured(mut self) -> Self {
        self.product.is_featured = true;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.product.is_active = false;
        self
    }

    pub fn sizes(mut self, sizes: &[&str]) -> Self {
        self.product.attributes.sizes = sizes.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn colors(mut self, colors: &[&str]) -> Self {
        self.product.attributes.colors = colors.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.product.attributes.gender = Some(gender);
        self
    }

    pub fn keywords(mut self, keywords: &[&str]) -> Self {
        self.product.keywords = keywords.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn build(self) -> Product {
        self.product
    }
}

/// Four well-known brands.
pub fn sample_brands() -> Vec<Brand> {
    [(1, "Nike"), (2, "Adidas"), (3, "Puma"), (4, "New Balance")]
        .into_iter()
        .map(|(id, name)| Brand {
            id: BrandId(id),
            name: name.to_string(),
        })
        .collect()
}

/// Two root categories with three leaves (shallow tree).
pub fn sample_categories() -> Vec<Category> {
    let category = |id: i64, name: &str, parent: Option<i64>| Category {
        id: CategoryId(id),
        name: name.to_string(),
        parent_id: parent.map(CategoryId),
    };
    vec![
        category(1, "Athletic", None),
        category(2, "Casual", None),
        category(6, "Running", Some(1)),
        category(7, "Basketball", Some(1)),
        category(11, "Sneakers", Some(2)),
    ]
}

/// Eight active products plus one inactive, with fixed effective prices:
///
/// | id    | name                  | brand | cat | effective | featured |
/// |-------|-----------------------|-------|-----|-----------|----------|
/// | p-001 | Air Zoom Pegasus      | Nike  | 6   | 129.99    | yes      |
/// | p-002 | ZoomX Invincible Run  | Nike  | 6   | 149.99*   | no       |
/// | p-003 | LeBron Witness        | Nike  | 7   | 139.99    | no       |
/// | p-004 | Ultraboost            | Adidas| 6   | 189.99    | yes      |
/// | p-005 | Stan Smith            | Adidas| 11  |  79.99*   | no       |
/// | p-006 | Velocity Nitro        | Puma  | 6   | 119.99    | no       |
/// | p-007 | 990v6                 | NB    | 6   | 199.99    | no       |
/// | p-008 | Superstar             | Adidas| 11  |  89.99    | no       |
/// | p-009 | Retired Runner        | Nike  | 6   | (inactive)           |
pub fn sample_products() -> Vec<Product> {
    vec![
        ProductBuilder::new("p-001", "Air Zoom Pegasus")
            .description("Responsive cushioning for your daily runs.")
            .brand(1)
            .category(6)
            .price(129.99)
            .featured()
            .sizes(&["8", "9", "9.5", "10", "11"])
            .colors(&["Black", "White", "Blue"])
            .gender(Gender::Men)
            .keywords(&["running", "road"])
            .build(),
        ProductBuilder::new("p-002", "ZoomX Invincible Run")
            .description("Maximum cushioning for long-distance comfort.")
            .brand(1)
            .category(6)
            .price(179.99)
            .on_sale(149.99)
            .sizes(&["7", "8", "9"])
            .colors(&["White", "Pink"])
            .gender(Gender::Women)
            .build(),
        ProductBuilder::new("p-003", "LeBron Witness")
            .description("Responsive cushioning and support for the court.")
            .brand(1)
            .category(7)
            .price(139.99)
            .sizes(&["9", "10", "11", "12"])
            .colors(&["Black", "Red"])
            .gender(Gender::Men)
            .keywords(&["basketball", "court"])
            .build(),
        ProductBuilder::new("p-004", "Ultraboost")
            .description("Responsive Boost cushioning for energy return.")
            .brand(2)
            .category(6)
            .price(189.99)
            .featured()
            .sizes(&["8", "9", "10", "11"])
            .colors(&["Black", "Grey"])
            .gender(Gender::Men)
            .build(),
        ProductBuilder::new("p-005", "Stan Smith")
            .description("Classic tennis style with a clean, minimalist design.")
            .brand(2)
            .category(11)
            .price(99.99)
            .on_sale(79.99)
            .sizes(&["6", "7", "8", "9"])
            .colors(&["White", "Green"])
            .gender(Gender::Women)
            .build(),
        ProductBuilder::new("p-006", "Velocity Nitro")
            .description("Lightweight nitrogen-infused foam for tempo days.")
            .brand(3)
            .category(6)
            .price(119.99)
            .sizes(&["8", "9", "10"])
            .colors(&["Blue", "Yellow"])
            .gender(Gender::Men)
            .build(),
        ProductBuilder::new("p-007", "990v6")
            .description("Premium stability trainer made in the USA.")
            .brand(4)
            .category(6)
            .price(199.99)
            .sizes(&["8", "9", "10", "11", "12"])
            .colors(&["Grey", "Navy"])
            .gender(Gender::Men)
            .build(),
        ProductBuilder::new("p-008", "Superstar")
            .description("Iconic shell toe design for everyday wear.")
            .brand(2)
            .category(11)
            .price(89.99)
            .sizes(&["7", "8", "9", "10"])
            .colors(&["White", "Black"])
            .gender(Gender::Unisex)
            .build(),
        ProductBuilder::new("p-009", "Retired Runner")
            .description("No longer sold.")
            .brand(1)
            .category(6)
            .price(59.99)
            .inactive()
            .sizes(&["9"])
            .colors(&["Black"])
            .build(),
    ]
}

/// Inventory for a handful of variants, including a known-empty one.
pub fn sample_inventory() -> Vec<InventoryRecord> {
    let record = |product: &str, size: &str, color: &str, quantity: u32| InventoryRecord {
        product_id: ProductId::from(product),
        size: size.to_string(),
        color: color.to_string(),
        quantity,
        location: Some(StockLocation {
            warehouse: "main".to_string(),
            aisle: "A3".to_string(),
            shelf: 2,
        }),
    };
    vec![
        record("p-001", "9", "Black", 12),
        record("p-001", "9", "White", 0),
        record("p-001", "10", "Black", 4),
        record("p-003", "11", "Red", 2),
        record("p-004", "9", "Black", 7),
        record("p-005", "7", "White", 0),
        record("p-005", "8", "Green", 9),
        record("p-007", "10", "Grey", 1),
    ]
}
