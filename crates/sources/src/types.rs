//! Shared types for candidate generation.

use crate::seeds::LastWatched;
use std::collections::HashSet;
use watch_history::{RecommendationSeed, Title, TitleId};

/// A title returned by the catalog for one seed.
///
/// `seed_index` is the seed's position in the seed list; `rank` is the
/// title's position within that seed's catalog page. Together they fix
/// the accumulation order independently of lookup completion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub title: Title,
    pub seed: RecommendationSeed,
    pub seed_index: usize,
    pub rank: usize,
}

impl Candidate {
    pub fn new(title: Title, seed: RecommendationSeed, seed_index: usize, rank: usize) -> Self {
        Self {
            title,
            seed,
            seed_index,
            rank,
        }
    }

    pub fn id(&self) -> TitleId {
        self.title.id
    }

    pub fn rating(&self) -> f64 {
        self.title.rating
    }
}

/// Everything the pipeline needs to know about one user.
///
/// Built once per request from an explicitly supplied history.
#[derive(Debug, Clone, Default)]
pub struct UserContext {
    pub user_key: String,
    /// Ids of every watched title, regardless of kind
    pub watched_ids: HashSet<TitleId>,
    /// Seeds in selection order
    pub seeds: Vec<RecommendationSeed>,
    pub last_watched: LastWatched,
}

impl UserContext {
    pub fn new(user_key: impl Into<String>) -> Self {
        Self {
            user_key: user_key.into(),
            ..Self::default()
        }
    }
}
