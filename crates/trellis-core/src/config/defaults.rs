//! Central default values for all config structs.

/// SQLite read pool size.
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

/// SQLite busy timeout, milliseconds.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Embedding vector dimensionality for the built-in providers.
pub const DEFAULT_DIMENSIONS: usize = 384;

/// Neighbor oversampling factor: the index fetches `limit * oversample`
/// neighbors to absorb downstream filtering loss.
pub const DEFAULT_OVERSAMPLE: usize = 3;

/// Hard cap on neighbors requested from the index per query.
pub const DEFAULT_NEIGHBOR_CAP: usize = 60;

/// Remote embedding endpoint request timeout, seconds.
pub const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 10;

/// Remote embedding model name.
pub const DEFAULT_REMOTE_MODEL: &str = "text-embedding-3-small";

/// Environment variable consulted for the remote provider's API key.
pub const DEFAULT_API_KEY_ENV: &str = "TRELLIS_EMBEDDING_API_KEY";

/// Build-time document embedding cache entries.
pub const DEFAULT_EMBED_CACHE_SIZE: u64 = 10_000;

/// Default page size when the caller gives none.
pub const DEFAULT_LIMIT: usize = 10;

/// Upper bound on a single page.
pub const MAX_LIMIT: usize = 100;

/// Appended to short queries that lack a domain term (recall heuristic).
pub const DEFAULT_DOMAIN_HINT: &str = "shoes";

/// Generic domain terms. Used two ways: a short query already containing one
/// is not augmented, and the fallback lexicon treats "<brand/category> +
/// domain term" as a browse of that brand/category.
pub const DEFAULT_DOMAIN_TERMS: &[&str] = &[
    "shoe", "shoes", "sneaker", "sneakers", "boot", "boots", "sandal", "sandals", "trainer",
    "trainers", "cleat", "cleats", "loafer", "loafers", "footwear", "kicks",
];
