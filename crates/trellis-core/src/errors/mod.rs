//! Error types for the Trellis retrieval engine.
//!
//! Tier-level errors (`StoreError`, `IndexError`) are caught at the
//! orchestrator boundary and converted into ladder transitions; only
//! `InvalidFilter` is surfaced to callers for a well-formed query.

pub mod index_error;
pub mod store_error;

pub use index_error::IndexError;
pub use store_error::StoreError;

/// Umbrella error for the whole workspace.
#[derive(Debug, thiserror::Error)]
pub enum TrellisError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Index(#[from] IndexError),

    /// A filter value outside the controlled vocabulary. Surfaced to the
    /// caller for correction, never silently dropped.
    #[error("invalid filter {field}={value}: {reason}")]
    InvalidFilter {
        field: String,
        value: String,
        reason: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config error: {reason}")]
    Config { reason: String },
}

impl TrellisError {
    pub fn invalid_filter(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidFilter {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Workspace-wide result alias.
pub type TrellisResult<T> = Result<T, TrellisError>;
