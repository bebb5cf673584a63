//! The FilterPipeline chains filters together.
//!
//! The aggregator runs two of these: one on each seed's page as it
//! arrives (quality threshold, per-seed cap) and one on each kind's
//! accumulated set (already watched, duplicate ids).

use crate::filters::{AlreadyWatchedFilter, DedupByIdFilter, MinimumRatingFilter, PerSeedLimitFilter};
use crate::traits::Filter;
use anyhow::Result;
use sources::{Candidate, UserContext};

/// Ordered chain of filters built with the builder pattern.
///
/// ```ignore
/// let per_seed = FilterPipeline::new()
///     .add_filter(MinimumRatingFilter::new(6.0))
///     .add_filter(PerSeedLimitFilter::new(8));
///
/// let kept = per_seed.apply(candidates, &context)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Pipeline applied to one seed's catalog page.
    ///
    /// Keeps titles rated strictly above `min_rating`, then at most
    /// `per_seed_limit` of them.
    pub fn per_seed(min_rating: f64, per_seed_limit: usize) -> Self {
        Self::new()
            .add_filter(MinimumRatingFilter::new(min_rating))
            .add_filter(PerSeedLimitFilter::new(per_seed_limit))
    }

    /// Pipeline applied to a kind's accumulated candidates before ranking.
    pub fn final_pass() -> Self {
        Self::new()
            .add_filter(AlreadyWatchedFilter)
            .add_filter(DedupByIdFilter)
    }

    /// Add a filter to the end of the pipeline.
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Names of the filters, in application order
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Run every filter in sequence, logging counts before and after each.
    pub fn apply(
        &self,
        candidates: Vec<Candidate>,
        context: &UserContext,
    ) -> Result<Vec<Candidate>> {
        let mut current = candidates;
        for filter in &self.filters {
            let before = current.len();
            current = filter.apply(current, context)?;
            tracing::debug!(
                "Filter {} kept {} of {} candidates",
                filter.name(),
                current.len(),
                before
            );
        }
        Ok(current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
