//! Per-variant inventory lookups.

use rusqlite::{params, Connection, OptionalExtension, Row};

use trellis_core::catalog::{InventoryRecord, ProductId, StockLocation};
use trellis_core::errors::StoreError;

use crate::from_sqlite;

fn parse_record(row: &Row<'_>) -> rusqlite::Result<(InventoryRecord, Option<String>)> {
    let record = InventoryRecord {
        product_id: ProductId(row.get(0)?),
        size: row.get(1)?,
        color: row.get(2)?,
        quantity: row.get::<_, i64>(3)?.max(0) as u32,
        location: None,
    };
    let location_json: Option<String> = row.get(4)?;
    Ok((record, location_json))
}

fn finish_record(
    (mut record, location_json): (InventoryRecord, Option<String>),
) -> Result<InventoryRecord, StoreError> {
    if let Some(raw) = location_json {
        let location: StockLocation =
            serde_json::from_str(&raw).map_err(|e| StoreError::CorruptRow {
                id: format!("{}/{}/{}", record.product_id, record.size, record.color),
                reason: format!("location: {e}"),
            })?;
        record.location = Some(location);
    }
    Ok(record)
}

/// All variant records for a product, ordered by (size, color).
pub fn product_inventory(
    conn: &Connection,
    id: &ProductId,
) -> Result<Vec<InventoryRecord>, StoreError> {
    let mut stmt = conn
        .prepare(
            "SELECT product_id, size, color, quantity, location
             FROM inventory
             WHERE product_id = ?1
             ORDER BY size, color",
        )
        .map_err(from_sqlite)?;
    let rows = stmt.query_map(params![id.0], parse_record).map_err(from_sqlite)?;

    let mut records = Vec::new();
    for row in rows {
        records.push(finish_record(row.map_err(from_sqlite)?)?);
    }
    Ok(records)
}

/// Stock for one (product, size, color) variant; color compares
/// case-insensitively. `None` means the variant is not carried.
pub fn variant_stock(
    conn: &Connection,
    id: &ProductId,
    size: &str,
    color: &str,
) -> Result<Option<InventoryRecord>, StoreError> {
    let raw = conn
        .query_row(
            "SELECT product_id, size, color, quantity, location
             FROM inventory
             WHERE product_id = ?1 AND size = ?2 AND color = ?3 COLLATE NOCASE",
            params![id.0, size, color],
            parse_record,
        )
        .optional()
        .map_err(from_sqlite)?;
    raw.map(finish_record).transpose()
}
