//! Catalog bulk loading.
//!
//! Used by fixtures and the external refresh job — never during request
//! handling. Each load runs in one transaction; products are validated
//! before any row is written, and the normalized size/color tables are
//! derived from the typed attributes.

use rusqlite::{params, Connection};

use trellis_core::catalog::{Brand, Category, InventoryRecord, Product};
use trellis_core::constants::MAX_BULK_BATCH_SIZE;
use trellis_core::errors::StoreError;

use crate::{from_sqlite, to_store_err};

fn in_transaction<F>(conn: &Connection, f: F) -> Result<(), StoreError>
where
    F: FnOnce(&Connection) -> Result<(), StoreError>,
{
    let tx = conn.unchecked_transaction().map_err(from_sqlite)?;
    match f(&tx) {
        Ok(()) => tx.commit().map_err(from_sqlite),
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}

/// Upsert brands.
pub fn load_brands(conn: &Connection, brands: &[Brand]) -> Result<usize, StoreError> {
    in_transaction(conn, |tx| {
        let mut stmt = tx
            .prepare(
                "INSERT INTO brands (id, name) VALUES (?1, ?2)
                 ON CONFLICT(id) DO UPDATE SET name = excluded.name",
            )
            .map_err(from_sqlite)?;
        for brand in brands {
            stmt.execute(params![brand.id.0, brand.name])
                .map_err(from_sqlite)?;
        }
        Ok(())
    })?;
    Ok(brands.len())
}

/// Upsert categories.
pub fn load_categories(conn: &Connection, categories: &[Category]) -> Result<usize, StoreError> {
    in_transaction(conn, |tx| {
        let mut stmt = tx
            .prepare(
                "INSERT INTO categories (id, name, parent_id) VALUES (?1, ?2, ?3)
                 ON CONFLICT(id) DO UPDATE SET
                    name = excluded.name,
                    parent_id = excluded.parent_id",
            )
            .map_err(from_sqlite)?;
        for category in categories {
            stmt.execute(params![
                category.id.0,
                category.name,
                category.parent_id.map(|p| p.0)
            ])
            .map_err(from_sqlite)?;
        }
        Ok(())
    })?;
    Ok(categories.len())
}

/// Upsert products plus their derived size/color filter rows.
///
/// Every product is validated first; a single invalid product rejects the
/// whole batch so the catalog never holds rows that violate the sale-price
/// or attribute invariants.
pub fn load_products(conn: &Connection, products: &[Product]) -> Result<usize, StoreError> {
    if products.len() > MAX_BULK_BATCH_SIZE {
        return Err(to_store_err(format!(
            "bulk batch too large: {} products (max {MAX_BULK_BATCH_SIZE})",
            products.len()
        )));
    }
    for product in products {
        product
            .validate()
            .map_err(|reason| StoreError::CorruptRow {
                id: product.id.to_string(),
                reason,
            })?;
    }

    in_transaction(conn, |tx| {
        let mut product_stmt = tx
            .prepare(
                "INSERT INTO products (
                    id, sku, name, description, brand_id, category_id,
                    price, sale_price, is_on_sale, is_active, is_featured,
                    attributes, images, keywords
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
                 ON CONFLICT(id) DO UPDATE SET
                    sku = excluded.sku,
                    name = excluded.name,
                    description = excluded.description,
                    brand_id = excluded.brand_id,
                    category_id = excluded.category_id,
                    price = excluded.price,
                    sale_price = excluded.sale_price,
                    is_on_sale = excluded.is_on_sale,
                    is_active = excluded.is_active,
                    is_featured = excluded.is_featured,
                    attributes = excluded.attributes,
                    images = excluded.images,
                    keywords = excluded.keywords",
            )
            .map_err(from_sqlite)?;
        let mut size_stmt = tx
            .prepare(
                "INSERT OR REPLACE INTO product_sizes (product_id, size, position)
                 VALUES (?1, ?2, ?3)",
            )
            .map_err(from_sqlite)?;
        let mut color_stmt = tx
            .prepare(
                "INSERT OR REPLACE INTO product_colors (product_id, color)
                 VALUES (?1, ?2)",
            )
            .map_err(from_sqlite)?;

        for product in products {
            let attributes = serde_json::to_string(&product.attributes)
                .map_err(|e| to_store_err(e.to_string()))?;
            let images =
                serde_json::to_string(&product.images).map_err(|e| to_store_err(e.to_string()))?;
            let keywords = serde_json::to_string(&product.keywords)
                .map_err(|e| to_store_err(e.to_string()))?;

            product_stmt
                .execute(params![
                    product.id.0,
                    product.sku,
                    product.name,
                    product.description,
                    product.brand_id.0,
                    product.category_id.0,
                    product.price,
                    product.sale_price,
                    product.is_on_sale,
                    product.is_active,
                    product.is_featured,
                    attributes,
                    images,
                    keywords,
                ])
                .map_err(from_sqlite)?;

            // Re-derive the filter tables from the typed attributes.
            tx.execute(
                "DELETE FROM product_sizes WHERE product_id = ?1",
                params![product.id.0],
            )
            .map_err(from_sqlite)?;
            tx.execute(
                "DELETE FROM product_colors WHERE product_id = ?1",
                params![product.id.0],
            )
            .map_err(from_sqlite)?;
            for (position, size) in product.attributes.sizes.iter().enumerate() {
                size_stmt
                    .execute(params![product.id.0, size, position as i64])
                    .map_err(from_sqlite)?;
            }
            for color in &product.attributes.colors {
                color_stmt
                    .execute(params![product.id.0, color])
                    .map_err(from_sqlite)?;
            }
        }
        Ok(())
    })?;
    Ok(products.len())
}

/// Upsert inventory records keyed on (product, size, color).
pub fn load_inventory(
    conn: &Connection,
    records: &[InventoryRecord],
) -> Result<usize, StoreError> {
    in_transaction(conn, |tx| {
        let mut stmt = tx
            .prepare(
                "INSERT INTO inventory (product_id, size, color, quantity, location)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(product_id, size, color) DO UPDATE SET
                    quantity = excluded.quantity,
                    location = excluded.location",
            )
            .map_err(from_sqlite)?;
        for record in records {
            let location = record
                .location
                .as_ref()
                .map(serde_json::to_string)
                .transpose()
                .map_err(|e| to_store_err(e.to_string()))?;
            stmt.execute(params![
                record.product_id.0,
                record.size,
                record.color,
                record.quantity,
                location,
            ])
            .map_err(from_sqlite)?;
        }
        Ok(())
    })?;
    Ok(records.len())
}
