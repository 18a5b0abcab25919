/// Trellis engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum candidate ids passed into a single restricted store query.
pub const MAX_RESTRICTED_IDS: usize = 512;

/// Maximum rows accepted in one catalog bulk-load batch.
pub const MAX_BULK_BATCH_SIZE: usize = 1_000;

/// Queries at or below this token count may receive the domain hint.
pub const SHORT_QUERY_TOKENS: usize = 2;
