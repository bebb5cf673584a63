//! Engine configuration.
//!
//! Every threshold and cap the aggregator and trending mixer use lives
//! here with its default. Values can be overridden from the environment
//! (`ADVISOR_QUALITY_THRESHOLD=7.0`, ...) or with the `with_*` builders.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "ADVISOR_";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Most recent watched titles per kind used as seeds
    pub seeds_per_kind: usize,

    /// Exclusive lower bound on a recommended title's rating
    pub quality_threshold: f64,

    /// Titles kept from each seed after the quality filter
    pub per_seed_limit: usize,

    /// Cap on each ranked list
    pub ranked_limit: usize,

    /// Titles kept from each popular listing when it is loaded
    pub popular_limit: usize,

    /// Titles taken from each popular list into trending
    pub trending_take: usize,

    /// Cap on each trending list
    pub trending_limit: usize,

    /// Time to wait for one catalog call, in milliseconds
    pub lookup_timeout_ms: u64,

    /// Catalog calls in flight at once
    pub max_concurrent_lookups: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seeds_per_kind: 3,
            quality_threshold: 6.0,
            per_seed_limit: 8,
            ranked_limit: 20,
            popular_limit: 20,
            trending_take: 10,
            trending_limit: 15,
            lookup_timeout_ms: 5_000,
            max_concurrent_lookups: 4,
        }
    }
}

impl EngineConfig {
    /// Load configuration from `ADVISOR_*` environment variables.
    ///
    /// A `.env` file in the working directory is read first, if present.
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        envy::prefixed(ENV_PREFIX)
            .from_env::<EngineConfig>()
            .context("Failed to load engine config from environment")
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }

    pub fn with_seeds_per_kind(mut self, seeds: usize) -> Self {
        self.seeds_per_kind = seeds;
        self
    }

    pub fn with_quality_threshold(mut self, threshold: f64) -> Self {
        self.quality_threshold = threshold;
        self
    }

    pub fn with_per_seed_limit(mut self, limit: usize) -> Self {
        self.per_seed_limit = limit;
        self
    }

    pub fn with_ranked_limit(mut self, limit: usize) -> Self {
        self.ranked_limit = limit;
        self
    }

    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Values below 1 are raised to 1
    pub fn with_max_concurrent_lookups(mut self, max: usize) -> Self {
        self.max_concurrent_lookups = max.max(1);
        self
    }
}
