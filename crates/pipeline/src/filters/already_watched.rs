//! Filter to remove titles the user has already watched.
//!
//! Matching is by id alone, across kinds, the same rule the history
//! store uses when deciding whether a title is already recorded.

use crate::traits::Filter;
use anyhow::Result;
use sources::{Candidate, UserContext};

/// Removes candidates whose id appears in the user's history.
///
/// ## Algorithm
/// Uses the HashSet in UserContext.watched_ids for O(1) lookups.
pub struct AlreadyWatchedFilter;

impl Filter for AlreadyWatchedFilter {
    fn name(&self) -> &str {
        "AlreadyWatchedFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        context: &UserContext,
    ) -> Result<Vec<Candidate>> {
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| !context.watched_ids.contains(&candidate.id()))
            .collect();
        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use watch_history::{ContentKind, RecommendationSeed, Title};

    fn candidate(id: u32) -> Candidate {
        let title = Title {
            id,
            kind: ContentKind::Movie,
            name: format!("Movie {}", id),
            poster: None,
            overview: String::new(),
            rating: 7.0,
            popularity: 0.0,
            release_date: String::new(),
        };
        Candidate::new(title, RecommendationSeed::new(1, ContentKind::Movie), 0, 0)
    }

    #[test]
    fn test_already_watched_filter() {
        let mut context = UserContext::new("ada");
        context.watched_ids.insert(100);
        context.watched_ids.insert(200);

        let candidates = vec![candidate(100), candidate(101), candidate(200), candidate(300)];

        let filtered = AlreadyWatchedFilter.apply(candidates, &context).unwrap();

        let ids: Vec<u32> = filtered.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![101, 300]);
    }
}
