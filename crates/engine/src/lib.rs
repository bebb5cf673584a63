//! Engine crate for content-advisor.
//!
//! Ties the history, catalog and filter crates together:
//! - `RecommendationAggregator` turns a user's history into ranked
//!   movie and series lists
//! - `TrendingMixer` / `load_trending` build the trending lists
//! - `EngineConfig` carries every threshold and cap

pub mod config;
pub mod orchestrator;
pub mod report;
pub mod trending;

pub use config::EngineConfig;
pub use orchestrator::RecommendationAggregator;
pub use report::{AggregationUnavailable, RankedResult, RecommendationReport};
pub use sources::SeedLookupError;
pub use trending::{load_trending, TrendingBoard, TrendingLists, TrendingMixer};
