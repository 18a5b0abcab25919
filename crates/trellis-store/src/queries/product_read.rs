//! Single-product lookups, name resolution, and catalog dumps.

use rusqlite::{params, Connection, OptionalExtension, Row};

use trellis_core::catalog::{
    Brand, BrandId, Category, CategoryId, Product, ProductAttributes, ProductId,
};
use trellis_core::errors::StoreError;
use trellis_core::models::ProductHit;

use crate::from_sqlite;

/// Column list every product-hit query selects, in [`parse_raw_hit`] order.
pub(crate) const HIT_COLUMNS: &str = "p.id, p.sku, p.name, p.description, \
     p.brand_id, b.name, p.category_id, c.name, \
     p.price, p.sale_price, p.is_on_sale, p.is_active, p.is_featured, \
     p.attributes, p.images, p.keywords";

/// Raw row as stored; JSON columns still serialized.
pub(crate) struct RawHit {
    id: String,
    sku: String,
    name: String,
    description: String,
    brand_id: i64,
    brand_name: String,
    category_id: i64,
    category_name: String,
    price: f64,
    sale_price: Option<f64>,
    is_on_sale: bool,
    is_active: bool,
    is_featured: bool,
    attributes: String,
    images: String,
    keywords: String,
}

/// Extract a raw hit from a row selected with [`HIT_COLUMNS`].
pub(crate) fn parse_raw_hit(row: &Row<'_>) -> rusqlite::Result<RawHit> {
    Ok(RawHit {
        id: row.get(0)?,
        sku: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        brand_id: row.get(4)?,
        brand_name: row.get(5)?,
        category_id: row.get(6)?,
        category_name: row.get(7)?,
        price: row.get(8)?,
        sale_price: row.get(9)?,
        is_on_sale: row.get(10)?,
        is_active: row.get(11)?,
        is_featured: row.get(12)?,
        attributes: row.get(13)?,
        images: row.get(14)?,
        keywords: row.get(15)?,
    })
}

/// Deserialize the JSON columns and assemble the hit.
pub(crate) fn finish_hit(raw: RawHit) -> Result<ProductHit, StoreError> {
    let corrupt = |reason: String| StoreError::CorruptRow {
        id: raw.id.clone(),
        reason,
    };
    let attributes: ProductAttributes =
        serde_json::from_str(&raw.attributes).map_err(|e| corrupt(format!("attributes: {e}")))?;
    let images: Vec<String> =
        serde_json::from_str(&raw.images).map_err(|e| corrupt(format!("images: {e}")))?;
    let keywords: Vec<String> =
        serde_json::from_str(&raw.keywords).map_err(|e| corrupt(format!("keywords: {e}")))?;

    Ok(ProductHit {
        product: Product {
            id: ProductId(raw.id),
            sku: raw.sku,
            name: raw.name,
            description: raw.description,
            brand_id: BrandId(raw.brand_id),
            category_id: CategoryId(raw.category_id),
            price: raw.price,
            sale_price: raw.sale_price,
            is_on_sale: raw.is_on_sale,
            is_active: raw.is_active,
            is_featured: raw.is_featured,
            attributes,
            images,
            keywords,
        },
        brand_name: raw.brand_name,
        category_name: raw.category_name,
    })
}

/// Fetch one active product with brand/category names resolved.
pub fn get_product(conn: &Connection, id: &ProductId) -> Result<Option<ProductHit>, StoreError> {
    let raw = conn
        .query_row(
            &format!(
                "SELECT {HIT_COLUMNS}
                 FROM products p
                 JOIN brands b ON b.id = p.brand_id
                 JOIN categories c ON c.id = p.category_id
                 WHERE p.id = ?1 AND p.is_active = 1"
            ),
            params![id.0],
            parse_raw_hit,
        )
        .optional()
        .map_err(from_sqlite)?;
    raw.map(finish_hit).transpose()
}

/// Resolve a category id by name, case-insensitively.
pub fn category_id_by_name(
    conn: &Connection,
    name: &str,
) -> Result<Option<CategoryId>, StoreError> {
    conn.query_row(
        "SELECT id FROM categories WHERE name = ?1 COLLATE NOCASE",
        params![name],
        |row| row.get::<_, i64>(0).map(CategoryId),
    )
    .optional()
    .map_err(from_sqlite)
}

/// All brands (snapshot loading).
pub fn all_brands(conn: &Connection) -> Result<Vec<Brand>, StoreError> {
    let mut stmt = conn
        .prepare("SELECT id, name FROM brands ORDER BY id")
        .map_err(from_sqlite)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(Brand {
                id: BrandId(row.get(0)?),
                name: row.get(1)?,
            })
        })
        .map_err(from_sqlite)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(from_sqlite)
}

/// All categories (snapshot loading).
pub fn all_categories(conn: &Connection) -> Result<Vec<Category>, StoreError> {
    let mut stmt = conn
        .prepare("SELECT id, name, parent_id FROM categories ORDER BY id")
        .map_err(from_sqlite)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(Category {
                id: CategoryId(row.get(0)?),
                name: row.get(1)?,
                parent_id: row.get::<_, Option<i64>>(2)?.map(CategoryId),
            })
        })
        .map_err(from_sqlite)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(from_sqlite)
}

/// All active products (snapshot loading).
pub fn all_active_products(conn: &Connection) -> Result<Vec<Product>, StoreError> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {HIT_COLUMNS}
             FROM products p
             JOIN brands b ON b.id = p.brand_id
             JOIN categories c ON c.id = p.category_id
             WHERE p.is_active = 1
             ORDER BY p.id"
        ))
        .map_err(from_sqlite)?;
    let rows = stmt.query_map([], parse_raw_hit).map_err(from_sqlite)?;

    let mut products = Vec::new();
    for row in rows {
        let raw = row.map_err(from_sqlite)?;
        products.push(finish_hit(raw)?.product);
    }
    Ok(products)
}
