//! v002: per-variant inventory.

use rusqlite::Connection;

use trellis_core::errors::StoreError;

use crate::from_sqlite;

pub fn migrate(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS inventory (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id  TEXT NOT NULL REFERENCES products(id) ON DELETE CASCADE,
            size        TEXT NOT NULL,
            color       TEXT NOT NULL COLLATE NOCASE,
            quantity    INTEGER NOT NULL DEFAULT 0 CHECK (quantity >= 0),
            location    TEXT,
            UNIQUE (product_id, size, color)
        );

        CREATE INDEX IF NOT EXISTS idx_inventory_product ON inventory(product_id);
        ",
    )
    .map_err(from_sqlite)?;
    Ok(())
}
