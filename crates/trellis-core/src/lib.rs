//! # trellis-core
//!
//! Foundation crate for the Trellis product retrieval engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod deadline;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use catalog::{
    Brand, BrandId, Category, CategoryId, InventoryRecord, Product, ProductAttributes, ProductId,
};
pub use config::TrellisConfig;
pub use deadline::Deadline;
pub use errors::{TrellisError, TrellisResult};
pub use models::{
    Availability, DegradationEvent, FilterHint, ProductFilters, ProductHit, RankedResult,
    RelevanceScore, SearchCandidate, SearchRequest, SearchResponse, SortOrder,
};
