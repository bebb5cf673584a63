//! Filtering and ranking of recommendation candidates.
//!
//! This crate provides:
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//! - TitleSet / KindBuckets for per-kind, id-unique accumulation
//! - rank_and_truncate for the final ordering
//!
//! ## Architecture
//! Candidates move through three stages:
//! 1. Per seed: quality threshold, then per-seed cap
//! 2. Per kind: merge into an id-unique, arrival-ordered set
//! 3. Per kind: drop watched ids and duplicates, sort by rating, cap
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{rank_and_truncate, FilterPipeline, KindBuckets};
//!
//! let per_seed = FilterPipeline::per_seed(6.0, 8);
//! let mut buckets = KindBuckets::new();
//! buckets.merge(per_seed.apply(candidates, &context)?);
//!
//! let movies = FilterPipeline::final_pass()
//!     .apply(buckets.movies.into_candidates(), &context)?;
//! let ranked = rank_and_truncate(movies, 20);
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod accumulator;
pub mod ranking;

// Re-export main types
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
pub use accumulator::{KindBuckets, TitleSet};
pub use ranking::{rank_and_truncate, DEFAULT_RANKED_LIMIT};
