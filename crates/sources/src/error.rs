//! Error types for catalog lookups.

use thiserror::Error;
use watch_history::RecommendationSeed;

/// Failures reported by a catalog backend for a single request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited by catalog")]
    RateLimited,

    #[error("Catalog server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Why one seed contributed nothing to the recommendations.
///
/// Always absorbed by the aggregator; the remaining seeds carry on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeedLookupError {
    #[error("Lookup for {seed} failed: {source}")]
    Catalog {
        seed: RecommendationSeed,
        #[source]
        source: CatalogError,
    },

    #[error("Lookup for {seed} timed out after {timeout_ms}ms")]
    Timeout {
        seed: RecommendationSeed,
        timeout_ms: u64,
    },

    #[error("Lookup task for {seed} did not complete: {reason}")]
    TaskFailed {
        seed: RecommendationSeed,
        reason: String,
    },
}

impl SeedLookupError {
    /// The seed whose lookup failed
    pub fn seed(&self) -> RecommendationSeed {
        match self {
            SeedLookupError::Catalog { seed, .. }
            | SeedLookupError::Timeout { seed, .. }
            | SeedLookupError::TaskFailed { seed, .. } => *seed,
        }
    }
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
