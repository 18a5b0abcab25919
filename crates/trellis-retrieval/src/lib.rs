//! # trellis-retrieval
//!
//! The hybrid search orchestrator and its in-process tiers: the immutable
//! catalog snapshot (terminal fallback), the lexical brand/category matcher,
//! the result merger/ranker, and the degradation ladder that guarantees a
//! deterministic best-effort answer for every well-formed query.

pub mod browse;
pub mod engine;
pub mod lexicon;
pub mod rank;
pub mod snapshot;

pub use browse::ProductDetails;
pub use engine::SearchEngine;
pub use lexicon::{LexicalMatch, LexiconMatcher};
pub use snapshot::CatalogSnapshot;
