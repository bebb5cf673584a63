//! Drops repeated ids, keeping the first occurrence.

use crate::traits::Filter;
use anyhow::Result;
use sources::{Candidate, UserContext};
use std::collections::HashSet;
use watch_history::TitleId;

/// Keeps only the first candidate for each id.
///
/// The accumulator already rejects repeats; this holds the invariant
/// for any candidate list handed to the ranker.
pub struct DedupByIdFilter;

impl Filter for DedupByIdFilter {
    fn name(&self) -> &str {
        "DedupByIdFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        _context: &UserContext,
    ) -> Result<Vec<Candidate>> {
        let mut seen: HashSet<TitleId> = HashSet::new();
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| seen.insert(candidate.id()))
            .collect();
        Ok(filtered)
    }
}
