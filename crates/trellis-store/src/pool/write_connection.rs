//! The single serialized write connection.
//!
//! SQLite allows one writer at a time; a mutex keeps all catalog writes
//! (migrations, bulk loads) on one connection. Reads during request handling
//! go through the read pool instead.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use trellis_core::errors::StoreError;

use super::pragmas::apply_pragmas;
use crate::from_sqlite;

/// Mutex-guarded write connection.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open the write connection for the given database file.
    pub fn open(path: &Path, busy_timeout_ms: u64) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(from_sqlite)?;
        apply_pragmas(&conn, busy_timeout_ms)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory write connection (for testing).
    pub fn open_in_memory(busy_timeout_ms: u64) -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(from_sqlite)?;
        apply_pragmas(&conn, busy_timeout_ms)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Execute a closure with exclusive access to the write connection.
    pub fn with_conn_sync<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|e| StoreError::unavailable(format!("write connection poisoned: {e}")))?;
        f(&guard)
    }
}
