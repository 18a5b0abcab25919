//! Connection pool managing read/write connections.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::{Path, PathBuf};

use trellis_core::errors::StoreError;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

/// Manages the single write connection and the read connection pool.
pub struct ConnectionPool {
    pub writer: WriteConnection,
    pub readers: ReadPool,
    pub db_path: Option<PathBuf>,
}

impl ConnectionPool {
    /// Open a connection pool for the given database file.
    pub fn open(
        path: &Path,
        read_pool_size: usize,
        busy_timeout_ms: u64,
    ) -> Result<Self, StoreError> {
        let writer = WriteConnection::open(path, busy_timeout_ms)?;
        let readers = ReadPool::open(path, read_pool_size, busy_timeout_ms)?;
        Ok(Self {
            writer,
            readers,
            db_path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory connection pool (for testing).
    /// Note: in-memory readers are isolated databases and cannot see the
    /// writer's changes, so the engine routes reads through the writer.
    pub fn open_in_memory(busy_timeout_ms: u64) -> Result<Self, StoreError> {
        let writer = WriteConnection::open_in_memory(busy_timeout_ms)?;
        let readers = ReadPool::open_in_memory(1, busy_timeout_ms)?;
        Ok(Self {
            writer,
            readers,
            db_path: None,
        })
    }
}
