//! Exact-filter product search.
//!
//! All filters are AND-combined parameterized predicates. Price bounds
//! compare against the effective price; size/color test the attribute set
//! tables, not stock.

use rusqlite::types::ToSql;
use rusqlite::Connection;

use trellis_core::catalog::ProductId;
use trellis_core::constants::MAX_RESTRICTED_IDS;
use trellis_core::errors::StoreError;
use trellis_core::models::{ProductFilters, ProductHit, SortOrder};

use super::product_read::{finish_hit, parse_raw_hit, HIT_COLUMNS};
use crate::{from_sqlite, to_store_err};

/// SQL expression for the price that filters and ordering compare against.
const EFFECTIVE_PRICE: &str =
    "CASE WHEN p.is_on_sale = 1 AND p.sale_price IS NOT NULL THEN p.sale_price ELSE p.price END";

/// Append WHERE clauses for every present filter, pushing parameters in
/// lockstep with the `?` placeholders.
fn push_filter_clauses(
    filters: &ProductFilters,
    sql: &mut String,
    params: &mut Vec<Box<dyn ToSql>>,
) {
    if let Some(category_id) = filters.category_id {
        // The category itself or any direct child (shallow tree).
        sql.push_str(
            " AND p.category_id IN (SELECT id FROM categories WHERE id = ? OR parent_id = ?)",
        );
        params.push(Box::new(category_id.0));
        params.push(Box::new(category_id.0));
    }
    if let Some(brand_id) = filters.brand_id {
        sql.push_str(" AND p.brand_id = ?");
        params.push(Box::new(brand_id.0));
    }
    if let Some(min) = filters.price_min {
        sql.push_str(&format!(" AND {EFFECTIVE_PRICE} >= ?"));
        params.push(Box::new(min));
    }
    if let Some(max) = filters.price_max {
        sql.push_str(&format!(" AND {EFFECTIVE_PRICE} <= ?"));
        params.push(Box::new(max));
    }
    if let Some(size) = &filters.size {
        sql.push_str(
            " AND EXISTS (SELECT 1 FROM product_sizes ps \
             WHERE ps.product_id = p.id AND ps.size = ?)",
        );
        params.push(Box::new(size.clone()));
    }
    if let Some(color) = &filters.color {
        sql.push_str(
            " AND EXISTS (SELECT 1 FROM product_colors pc \
             WHERE pc.product_id = p.id AND pc.color = ? COLLATE NOCASE)",
        );
        params.push(Box::new(color.clone()));
    }
    if let Some(on_sale) = filters.on_sale {
        sql.push_str(" AND p.is_on_sale = ?");
        params.push(Box::new(on_sale));
    }
    if let Some(text) = &filters.text {
        sql.push_str(" AND (instr(lower(p.name), ?) > 0 OR instr(lower(p.description), ?) > 0)");
        let needle = text.to_lowercase();
        params.push(Box::new(needle.clone()));
        params.push(Box::new(needle));
    }
}

fn run_hit_query(
    conn: &Connection,
    sql: &str,
    params: &[Box<dyn ToSql>],
) -> Result<Vec<ProductHit>, StoreError> {
    let mut stmt = conn.prepare(sql).map_err(from_sqlite)?;
    let rows = stmt
        .query_map(
            rusqlite::params_from_iter(params.iter().map(|p| p.as_ref())),
            parse_raw_hit,
        )
        .map_err(from_sqlite)?;

    let mut hits = Vec::new();
    for row in rows {
        hits.push(finish_hit(row.map_err(from_sqlite)?)?);
    }
    Ok(hits)
}

/// ORDER BY clause for the requested sort: the featured/price default, or a
/// pure effective-price order when the caller overrides. Ties always break
/// by id so paging stays deterministic.
fn order_clause(sort: Option<SortOrder>) -> String {
    match sort {
        None => format!(" ORDER BY p.is_featured DESC, {EFFECTIVE_PRICE} ASC, p.id ASC"),
        Some(SortOrder::PriceAsc) => format!(" ORDER BY {EFFECTIVE_PRICE} ASC, p.id ASC"),
        Some(SortOrder::PriceDesc) => format!(" ORDER BY {EFFECTIVE_PRICE} DESC, p.id ASC"),
    }
}

/// Filtered search over active products with SQL-side ordering and
/// pagination.
pub fn filter_search(
    conn: &Connection,
    filters: &ProductFilters,
    sort: Option<SortOrder>,
    limit: usize,
    offset: usize,
) -> Result<Vec<ProductHit>, StoreError> {
    let mut sql = format!(
        "SELECT {HIT_COLUMNS}
         FROM products p
         JOIN brands b ON b.id = p.brand_id
         JOIN categories c ON c.id = p.category_id
         WHERE p.is_active = 1"
    );
    let mut params: Vec<Box<dyn ToSql>> = Vec::new();
    push_filter_clauses(filters, &mut sql, &mut params);

    sql.push_str(&order_clause(sort));
    sql.push_str(" LIMIT ? OFFSET ?");
    params.push(Box::new(limit as i64));
    params.push(Box::new(offset as i64));

    run_hit_query(conn, &sql, &params)
}

/// Filtered search restricted to the given candidate ids. Returns every
/// match ordered by id; final ordering belongs to the merger.
pub fn search_within(
    conn: &Connection,
    ids: &[ProductId],
    filters: &ProductFilters,
) -> Result<Vec<ProductHit>, StoreError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    if ids.len() > MAX_RESTRICTED_IDS {
        return Err(to_store_err(format!(
            "candidate restriction too large: {} ids (max {MAX_RESTRICTED_IDS})",
            ids.len()
        )));
    }

    let placeholders = vec!["?"; ids.len()].join(", ");
    let mut sql = format!(
        "SELECT {HIT_COLUMNS}
         FROM products p
         JOIN brands b ON b.id = p.brand_id
         JOIN categories c ON c.id = p.category_id
         WHERE p.is_active = 1 AND p.id IN ({placeholders})"
    );
    let mut params: Vec<Box<dyn ToSql>> = ids
        .iter()
        .map(|id| Box::new(id.0.clone()) as Box<dyn ToSql>)
        .collect();
    push_filter_clauses(filters, &mut sql, &mut params);
    sql.push_str(" ORDER BY p.id ASC");

    run_hit_query(conn, &sql, &params)
}

/// Count of products matching the filters, ignoring pagination.
pub fn count_filtered(conn: &Connection, filters: &ProductFilters) -> Result<u64, StoreError> {
    let mut sql = "SELECT COUNT(*) FROM products p WHERE p.is_active = 1".to_string();
    let mut params: Vec<Box<dyn ToSql>> = Vec::new();
    push_filter_clauses(filters, &mut sql, &mut params);

    conn.query_row(
        &sql,
        rusqlite::params_from_iter(params.iter().map(|p| p.as_ref())),
        |row| row.get::<_, i64>(0),
    )
    .map(|n| n.max(0) as u64)
    .map_err(from_sqlite)
}
