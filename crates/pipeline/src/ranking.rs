//! Final ordering of a kind's candidates.
//!
//! Sort descending by rating with a stable sort, then cap. Equal ratings
//! keep their incoming order: seed selection order first, then catalog
//! page order within a seed.

use sources::Candidate;
use watch_history::Title;

/// Default cap on each ranked list
pub const DEFAULT_RANKED_LIMIT: usize = 20;

/// Sort by rating (highest first), keep at most `limit`, unwrap to titles.
pub fn rank_and_truncate(mut candidates: Vec<Candidate>, limit: usize) -> Vec<Title> {
    // `sort_by` is stable; total_cmp gives NaN a fixed place instead of
    // scrambling neighbours.
    candidates.sort_by(|a, b| b.rating().total_cmp(&a.rating()));
    candidates.truncate(limit);
    candidates.into_iter().map(|candidate| candidate.title).collect()
}
