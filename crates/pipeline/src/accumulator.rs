//! Per-kind candidate accumulation.
//!
//! Each kind gets its own ordered set keyed by title id. Re-adding an id
//! is a no-op, and iteration follows arrival order, so the result only
//! depends on the order candidates are offered in, never on hashing.

use sources::Candidate;
use std::collections::HashSet;
use watch_history::{ContentKind, TitleId};

/// Insertion-ordered set of candidates, unique by id
#[derive(Debug, Clone, Default)]
pub struct TitleSet {
    items: Vec<Candidate>,
    ids: HashSet<TitleId>,
}

impl TitleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the candidate unless its id is already present.
    ///
    /// Returns `true` if it was added.
    pub fn insert(&mut self, candidate: Candidate) -> bool {
        if !self.ids.insert(candidate.id()) {
            return false;
        }
        self.items.push(candidate);
        true
    }

    /// Add every candidate; returns how many were new
    pub fn extend(&mut self, candidates: impl IntoIterator<Item = Candidate>) -> usize {
        candidates
            .into_iter()
            .map(|candidate| self.insert(candidate))
            .filter(|added| *added)
            .count()
    }

    pub fn contains(&self, id: TitleId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.items.iter()
    }

    /// Candidates in arrival order
    pub fn into_candidates(self) -> Vec<Candidate> {
        self.items
    }
}

/// One `TitleSet` per content kind
#[derive(Debug, Clone, Default)]
pub struct KindBuckets {
    pub movies: TitleSet,
    pub series: TitleSet,
}

impl KindBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bucket_mut(&mut self, kind: ContentKind) -> &mut TitleSet {
        match kind {
            ContentKind::Movie => &mut self.movies,
            ContentKind::Series => &mut self.series,
        }
    }

    pub fn bucket(&self, kind: ContentKind) -> &TitleSet {
        match kind {
            ContentKind::Movie => &self.movies,
            ContentKind::Series => &self.series,
        }
    }

    /// Route every candidate to its title's kind; returns how many were new
    pub fn merge(&mut self, candidates: impl IntoIterator<Item = Candidate>) -> usize {
        candidates
            .into_iter()
            .map(|candidate| {
                let kind = candidate.title.kind;
                self.bucket_mut(kind).insert(candidate)
            })
            .filter(|added| *added)
            .count()
    }
}
