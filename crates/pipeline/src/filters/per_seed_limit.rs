//! Caps how many titles a single seed may contribute.

use crate::traits::Filter;
use anyhow::Result;
use sources::{Candidate, UserContext};
use std::collections::HashMap;
use watch_history::RecommendationSeed;

/// Default number of titles kept per seed
pub const DEFAULT_PER_SEED_LIMIT: usize = 8;

/// Keeps the first `limit` candidates of every seed, in page order.
pub struct PerSeedLimitFilter {
    limit: usize,
}

impl PerSeedLimitFilter {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl Default for PerSeedLimitFilter {
    fn default() -> Self {
        Self::new(DEFAULT_PER_SEED_LIMIT)
    }
}

impl Filter for PerSeedLimitFilter {
    fn name(&self) -> &str {
        "PerSeedLimitFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        _context: &UserContext,
    ) -> Result<Vec<Candidate>> {
        let mut taken: HashMap<RecommendationSeed, usize> = HashMap::new();
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| {
                let count = taken.entry(candidate.seed).or_insert(0);
                *count += 1;
                *count <= self.limit
            })
            .collect();
        Ok(filtered)
    }
}
