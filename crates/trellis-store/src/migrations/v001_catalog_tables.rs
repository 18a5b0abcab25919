//! v001: brands, categories, products + attribute filter tables.

use rusqlite::Connection;

use trellis_core::errors::StoreError;

use crate::from_sqlite;

pub fn migrate(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS brands (
            id    INTEGER PRIMARY KEY,
            name  TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS categories (
            id         INTEGER PRIMARY KEY,
            name       TEXT NOT NULL,
            parent_id  INTEGER REFERENCES categories(id)
        );

        CREATE INDEX IF NOT EXISTS idx_categories_parent ON categories(parent_id);
        CREATE INDEX IF NOT EXISTS idx_categories_name ON categories(name COLLATE NOCASE);

        CREATE TABLE IF NOT EXISTS products (
            id           TEXT PRIMARY KEY,
            sku          TEXT NOT NULL UNIQUE,
            name         TEXT NOT NULL,
            description  TEXT NOT NULL DEFAULT '',
            brand_id     INTEGER NOT NULL REFERENCES brands(id),
            category_id  INTEGER NOT NULL REFERENCES categories(id),
            price        REAL NOT NULL CHECK (price > 0),
            sale_price   REAL,
            is_on_sale   INTEGER NOT NULL DEFAULT 0,
            is_active    INTEGER NOT NULL DEFAULT 1,
            is_featured  INTEGER NOT NULL DEFAULT 0,
            attributes   TEXT NOT NULL DEFAULT '{}',
            images       TEXT NOT NULL DEFAULT '[]',
            keywords     TEXT NOT NULL DEFAULT '[]'
        );

        CREATE INDEX IF NOT EXISTS idx_products_brand ON products(brand_id);
        CREATE INDEX IF NOT EXISTS idx_products_category ON products(category_id);
        CREATE INDEX IF NOT EXISTS idx_products_active ON products(is_active);

        -- Normalized attribute sets, derived from the attributes column at
        -- load time so size/color filters stay exact SQL predicates.
        CREATE TABLE IF NOT EXISTS product_sizes (
            product_id  TEXT NOT NULL REFERENCES products(id) ON DELETE CASCADE,
            size        TEXT NOT NULL,
            position    INTEGER NOT NULL,
            PRIMARY KEY (product_id, size)
        );

        CREATE TABLE IF NOT EXISTS product_colors (
            product_id  TEXT NOT NULL REFERENCES products(id) ON DELETE CASCADE,
            color       TEXT NOT NULL COLLATE NOCASE,
            PRIMARY KEY (product_id, color)
        );

        CREATE INDEX IF NOT EXISTS idx_product_sizes_size ON product_sizes(size);
        CREATE INDEX IF NOT EXISTS idx_product_colors_color ON product_colors(color);
        ",
    )
    .map_err(from_sqlite)?;
    Ok(())
}
