//! History Selector
//!
//! Picks the watched titles that seed catalog lookups.
//!
//! ## Algorithm
//! 1. Partition the history by kind
//! 2. Keep the last `max_per_kind` records of each kind (most recently appended)
//! 3. Emit the survivors in their original append order
//!
//! Emitting in append order (rather than movies-then-series) keeps the
//! seed list a plain subsequence of the history, which is what later
//! tie-breaking relies on.

use std::collections::HashMap;
use tracing::debug;
use watch_history::{ContentKind, RecommendationSeed, UserHistory};

/// Default number of seeds taken per content kind
pub const DEFAULT_SEEDS_PER_KIND: usize = 3;

/// Select up to `max_per_kind` most recent seeds per kind.
///
/// An empty history yields an empty seed list.
pub fn select_seeds(history: &UserHistory, max_per_kind: usize) -> Vec<RecommendationSeed> {
    let mut remaining: HashMap<ContentKind, usize> = HashMap::new();
    for record in history.iter() {
        *remaining.entry(record.kind).or_insert(0) += 1;
    }

    // A record is selected when at most `max_per_kind` records of its
    // kind follow it (itself included).
    let mut seeds = Vec::new();
    for record in history.iter() {
        let left = remaining.entry(record.kind).or_insert(0);
        if *left <= max_per_kind {
            seeds.push(record.seed());
        }
        *left -= 1;
    }

    debug!(
        "Selected {} seeds from {} history records (max {} per kind)",
        seeds.len(),
        history.len(),
        max_per_kind
    );
    seeds
}

/// The last watched title of each kind, if any.
///
/// Used for display only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LastWatched {
    pub movie: Option<RecommendationSeed>,
    pub series: Option<RecommendationSeed>,
}

impl LastWatched {
    pub fn get(&self, kind: ContentKind) -> Option<RecommendationSeed> {
        match kind {
            ContentKind::Movie => self.movie,
            ContentKind::Series => self.series,
        }
    }
}

/// Select the most recent record of each kind.
pub fn select_last_watched_per_kind(history: &UserHistory) -> LastWatched {
    let last_of = |kind: ContentKind| {
        history
            .iter()
            .rev()
            .find(|record| record.kind == kind)
            .map(|record| record.seed())
    };

    LastWatched {
        movie: last_of(ContentKind::Movie),
        series: last_of(ContentKind::Series),
    }
}
