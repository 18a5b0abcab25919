//! Transient retrieval models — created per query, never persisted.

pub mod availability;
pub mod candidate;
pub mod degradation_event;
pub mod filters;
pub mod hit;
pub mod relevance;
pub mod request;

pub use availability::Availability;
pub use candidate::{FilterHint, SearchCandidate};
pub use degradation_event::DegradationEvent;
pub use filters::ProductFilters;
pub use hit::{ProductHit, RankedResult};
pub use relevance::RelevanceScore;
pub use request::{SearchRequest, SearchResponse, SortOrder};
