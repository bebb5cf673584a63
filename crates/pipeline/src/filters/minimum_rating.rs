//! Filter to enforce the quality threshold.
//!
//! Only titles rated strictly above the threshold survive; a title
//! rated exactly at the threshold is dropped.

use crate::traits::Filter;
use anyhow::Result;
use sources::{Candidate, UserContext};

/// Default threshold on the catalog's 0-10 rating scale
pub const DEFAULT_MIN_RATING: f64 = 6.0;

/// Removes candidates rated at or below `min_rating`.
pub struct MinimumRatingFilter {
    min_rating: f64,
}

impl MinimumRatingFilter {
    /// Create a new MinimumRatingFilter.
    ///
    /// # Arguments
    /// * `min_rating` - Exclusive lower bound (typically 6.0)
    pub fn new(min_rating: f64) -> Self {
        Self { min_rating }
    }
}

impl Default for MinimumRatingFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_RATING)
    }
}

impl Filter for MinimumRatingFilter {
    fn name(&self) -> &str {
        "MinimumRatingFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        _context: &UserContext,
    ) -> Result<Vec<Candidate>> {
        // NaN compares false and is dropped with the rest
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| candidate.rating() > self.min_rating)
            .collect();

        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use watch_history::{ContentKind, RecommendationSeed, Title};

    fn candidate(id: u32, rating: f64) -> Candidate {
        let title = Title {
            id,
            kind: ContentKind::Series,
            name: format!("Series {}", id),
            poster: None,
            overview: String::new(),
            rating,
            popularity: 0.0,
            release_date: String::new(),
        };
        Candidate::new(title, RecommendationSeed::new(9, ContentKind::Series), 0, 0)
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let candidates = vec![
            candidate(1, 6.0),
            candidate(2, 6.01),
            candidate(3, 5.9),
            candidate(4, 9.0),
            candidate(5, f64::NAN),
        ];

        let filter = MinimumRatingFilter::default();
        let filtered = filter.apply(candidates, &UserContext::new("ada")).unwrap();

        let ids: Vec<u32> = filtered.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![2, 4]);
    }

    #[test]
    fn test_custom_threshold() {
        let filter = MinimumRatingFilter::new(8.0);
        let filtered = filter
            .apply(vec![candidate(1, 7.5), candidate(2, 8.5)], &UserContext::new("ada"))
            .unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id(), 2);
    }
}
