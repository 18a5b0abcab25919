//! Versioned schema migrations.
//!
//! Applied in order inside a transaction each; the current version lives in
//! the `schema_version` table.

pub mod v001_catalog_tables;
pub mod v002_inventory_tables;

use rusqlite::Connection;
use tracing::debug;

use trellis_core::errors::StoreError;

use crate::from_sqlite;

/// All migrations, in order. Index + 1 is the schema version.
const MIGRATIONS: &[fn(&Connection) -> Result<(), StoreError>] =
    &[v001_catalog_tables::migrate, v002_inventory_tables::migrate];

/// Current schema version of this build.
pub const SCHEMA_VERSION: u32 = MIGRATIONS.len() as u32;

/// Run all pending migrations.
pub fn run_migrations(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version     INTEGER PRIMARY KEY,
            applied_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )",
    )
    .map_err(from_sqlite)?;

    let current = current_version(conn)?;
    for (i, migrate) in MIGRATIONS.iter().enumerate() {
        let version = i as u32 + 1;
        if version <= current {
            continue;
        }
        apply_one(conn, version, *migrate)?;
        debug!(version, "applied migration");
    }
    Ok(())
}

/// Highest applied schema version, zero for a fresh database.
pub fn current_version(conn: &Connection) -> Result<u32, StoreError> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get::<_, u32>(0),
    )
    .map_err(from_sqlite)
}

fn apply_one(
    conn: &Connection,
    version: u32,
    migrate: fn(&Connection) -> Result<(), StoreError>,
) -> Result<(), StoreError> {
    let tx = conn.unchecked_transaction().map_err(from_sqlite)?;
    let result = migrate(&tx).and_then(|()| {
        tx.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [version],
        )
        .map_err(from_sqlite)
        .map(|_| ())
    });
    match result {
        Ok(()) => tx.commit().map_err(from_sqlite),
        Err(e) => {
            let _ = tx.rollback();
            Err(StoreError::MigrationFailed {
                version,
                reason: e.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();
        assert_eq!(current_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn fresh_database_reports_version_zero() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL DEFAULT ''
            )",
        )
        .unwrap();
        assert_eq!(current_version(&conn).unwrap(), 0);
    }
}
