//! Catalog reference data: products, brands, categories, inventory.
//!
//! Owned by an external catalog process — the retrieval core only reads it.

pub mod attributes;
pub mod ids;
pub mod inventory;
pub mod product;

pub use attributes::{Gender, ProductAttributes};
pub use ids::{BrandId, CategoryId, ProductId};
pub use inventory::{InventoryRecord, StockLocation};
pub use product::{Brand, Category, Product};
