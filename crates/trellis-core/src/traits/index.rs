use crate::errors::IndexError;
use crate::models::{FilterHint, SearchCandidate};

/// The approximate semantic tier: embeds a query and returns scored
/// candidate product ids.
pub trait ISemanticIndex: Send + Sync {
    /// Return up to `limit` candidates for the query text, best first.
    /// `hint` carries only coarse brand/category names; exact filters are
    /// reapplied downstream by the caller.
    fn semantic_search(
        &self,
        query_text: &str,
        hint: &FilterHint,
        limit: usize,
    ) -> Result<Vec<SearchCandidate>, IndexError>;

    /// Number of indexed documents.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
