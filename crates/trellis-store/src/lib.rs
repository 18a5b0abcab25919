//! # trellis-store
//!
//! The structured store adapter: SQLite persistence for the product catalog
//! with exact-filter search, inventory lookups, and versioned migrations.
//! Connectivity and lock-timeout failures surface as
//! [`StoreError::Unavailable`] so the orchestrator can degrade; they are
//! never masked as empty results.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

use rusqlite::ErrorCode;
use trellis_core::errors::StoreError;

pub use engine::StoreEngine;

/// Wrap a plain message as a query failure.
pub(crate) fn to_store_err(message: impl Into<String>) -> StoreError {
    StoreError::QueryFailed {
        message: message.into(),
    }
}

/// Classify a rusqlite error: busy/locked/open/io failures mean the store is
/// unreachable (the ladder's fallback trigger); everything else is a query
/// failure.
pub(crate) fn from_sqlite(e: rusqlite::Error) -> StoreError {
    if let rusqlite::Error::SqliteFailure(err, ref message) = e {
        match err.code {
            ErrorCode::DatabaseBusy
            | ErrorCode::DatabaseLocked
            | ErrorCode::CannotOpen
            | ErrorCode::SystemIoFailure
            | ErrorCode::OperationInterrupted => {
                return StoreError::Unavailable {
                    reason: message
                        .clone()
                        .unwrap_or_else(|| format!("sqlite error code {:?}", err.code)),
                };
            }
            _ => {}
        }
    }
    StoreError::QueryFailed {
        message: e.to_string(),
    }
}
