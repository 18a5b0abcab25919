//! # trellis-index
//!
//! The semantic index adapter: embeds product documents and queries, and
//! answers approximate-nearest-neighbor lookups over an in-process vector
//! index. Providers form a degradation chain (remote HTTP → optional local
//! ONNX → deterministic hashed fallback); the index remembers which provider
//! built it so query vectors always live in the same space.

pub mod cache;
pub mod degradation;
pub mod document;
pub mod engine;
pub mod providers;
pub mod vector;

pub use degradation::DegradationChain;
pub use engine::IndexEngine;
pub use vector::VectorIndex;
