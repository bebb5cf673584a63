//! Output types of the aggregator.

use serde::Serialize;
use sources::{LastWatched, SeedLookupError};
use thiserror::Error;
use watch_history::{ContentKind, RecommendationSeed, Title};

/// Final ranked lists, one per kind.
///
/// Each list is unique by id, sorted by rating (highest first), capped,
/// and free of any id in the user's history.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RankedResult {
    pub movies: Vec<Title>,
    pub series: Vec<Title>,
}

impl RankedResult {
    pub fn get(&self, kind: ContentKind) -> &[Title] {
        match kind {
            ContentKind::Movie => &self.movies,
            ContentKind::Series => &self.series,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty() && self.series.is_empty()
    }
}

/// Every seed lookup failed, so nothing could be recommended.
///
/// Reported next to an empty result, never raised.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Recommendations unavailable: all {attempted} catalog lookups failed")]
pub struct AggregationUnavailable {
    pub attempted: usize,
    pub last_error: Option<SeedLookupError>,
}

/// Everything one personalized-recommendation call produced.
#[derive(Debug, Clone, Default)]
pub struct RecommendationReport {
    pub user_key: String,
    pub seeds: Vec<RecommendationSeed>,
    pub last_watched: LastWatched,
    pub ranked: RankedResult,
    /// Seeds that contributed nothing, in seed order
    pub failures: Vec<SeedLookupError>,
    pub unavailable: Option<AggregationUnavailable>,
}

impl RecommendationReport {
    /// Most recent failure, for a one-line warning
    pub fn last_error(&self) -> Option<&SeedLookupError> {
        self.failures.last()
    }

    /// Whether every seed contributed
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
