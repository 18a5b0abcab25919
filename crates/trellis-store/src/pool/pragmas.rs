//! PRAGMA configuration applied to every SQLite connection.
//!
//! WAL mode, NORMAL sync, 64MB cache, configurable busy_timeout,
//! foreign_keys ON.

use rusqlite::Connection;

use trellis_core::errors::StoreError;

use crate::from_sqlite;

/// Apply performance and safety pragmas to a write connection.
pub fn apply_pragmas(conn: &Connection, busy_timeout_ms: u64) -> Result<(), StoreError> {
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA cache_size = -64000;
        PRAGMA busy_timeout = {busy_timeout_ms};
        PRAGMA foreign_keys = ON;
        ",
    ))
    .map_err(from_sqlite)?;
    Ok(())
}

/// Apply pragmas to a read connection. Journal mode is a database property
/// set by the writer, so readers only configure cache, timeout, and
/// query_only.
pub fn apply_read_pragmas(conn: &Connection, busy_timeout_ms: u64) -> Result<(), StoreError> {
    conn.execute_batch(&format!(
        "
        PRAGMA cache_size = -64000;
        PRAGMA busy_timeout = {busy_timeout_ms};
        PRAGMA foreign_keys = ON;
        PRAGMA query_only = ON;
        ",
    ))
    .map_err(from_sqlite)?;
    Ok(())
}

/// Verify that WAL mode is active on a connection.
pub fn verify_wal_mode(conn: &Connection) -> Result<bool, StoreError> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(from_sqlite)?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
