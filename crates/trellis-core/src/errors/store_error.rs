/// Structured-store errors. `Unavailable` covers connectivity and timeout
/// failures and is the ladder's fallback trigger — the store never masks it
/// as an empty result set.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("query failed: {message}")]
    QueryFailed { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("corrupt catalog row {id}: {reason}")]
    CorruptRow { id: String, reason: String },
}

impl StoreError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}
