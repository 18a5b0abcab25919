/// Semantic-index errors. None of these are user-facing: the orchestrator
/// converts every one into a structured-only ladder transition.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("semantic index unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("embedding failed ({provider}): {reason}")]
    Embedding { provider: String, reason: String },

    #[error("dimension mismatch: index has {index_dims}, query produced {query_dims}")]
    DimensionMismatch {
        index_dims: usize,
        query_dims: usize,
    },

    #[error("model load failed ({path}): {reason}")]
    ModelLoadFailed { path: String, reason: String },
}

impl IndexError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}
