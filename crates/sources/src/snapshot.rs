//! Offline catalog backed by a JSON snapshot.
//!
//! ```json
//! {
//!   "popular_movies": [ { "id": 1, "kind": "movie", "name": "...", ... } ],
//!   "popular_series": [ ... ],
//!   "recommendations": { "movie:27205": [ ... ], "tv:1399": [ ... ] },
//!   "unavailable": ["movie:13"]
//! }
//! ```
//!
//! Keys listed in `unavailable` answer with `ServerError`, which lets a
//! snapshot reproduce partial upstream outages.

use crate::catalog::CatalogLookup;
use crate::error::{CatalogError, CatalogResult};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info};
use watch_history::{ContentKind, RecommendationSeed, Title, TitleId};

/// Snapshot pages are a single page; any other page is empty
const SNAPSHOT_PAGE: u32 = 1;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub popular_movies: Vec<Title>,
    #[serde(default)]
    pub popular_series: Vec<Title>,
    /// Keyed by `"{kind}:{id}"`, e.g. `"movie:27205"`
    #[serde(default)]
    pub recommendations: HashMap<String, Vec<Title>>,
    #[serde(default)]
    pub unavailable: HashSet<String>,
}

/// `CatalogLookup` that answers from an in-memory snapshot
#[derive(Debug, Clone, Default)]
pub struct SnapshotCatalog {
    snapshot: CatalogSnapshot,
}

impl SnapshotCatalog {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self { snapshot }
    }

    /// Load a snapshot file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog snapshot {:?}", path))?;
        let snapshot: CatalogSnapshot = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog snapshot {:?}", path))?;
        info!(
            "Loaded catalog snapshot: {} popular movies, {} popular series, {} recommendation lists",
            snapshot.popular_movies.len(),
            snapshot.popular_series.len(),
            snapshot.recommendations.len()
        );
        Ok(Self { snapshot })
    }

    /// Add or replace the recommendation list for a seed
    pub fn insert_recommendations(&mut self, seed: RecommendationSeed, titles: Vec<Title>) {
        self.snapshot.recommendations.insert(seed_key(seed.id, seed.kind), titles);
    }

    /// Make lookups for a seed fail with a server error
    pub fn mark_unavailable(&mut self, seed: RecommendationSeed) {
        self.snapshot.unavailable.insert(seed_key(seed.id, seed.kind));
    }

    pub fn snapshot(&self) -> &CatalogSnapshot {
        &self.snapshot
    }
}

#[async_trait::async_trait]
impl CatalogLookup for SnapshotCatalog {
    async fn get_recommended(
        &self,
        id: TitleId,
        kind: ContentKind,
        page: u32,
    ) -> CatalogResult<Vec<Title>> {
        let key = seed_key(id, kind);
        if self.snapshot.unavailable.contains(&key) {
            return Err(CatalogError::ServerError(format!("{} unavailable", key)));
        }

        let titles = self
            .snapshot
            .recommendations
            .get(&key)
            .ok_or_else(|| CatalogError::NotFound(key.clone()))?;

        if page != SNAPSHOT_PAGE {
            return Ok(Vec::new());
        }
        debug!("Snapshot returned {} titles for {}", titles.len(), key);
        Ok(titles.clone())
    }

    async fn get_popular(&self, kind: ContentKind, page: u32) -> CatalogResult<Vec<Title>> {
        if page != SNAPSHOT_PAGE {
            return Ok(Vec::new());
        }
        let titles = match kind {
            ContentKind::Movie => &self.snapshot.popular_movies,
            ContentKind::Series => &self.snapshot.popular_series,
        };
        Ok(titles.clone())
    }

    fn name(&self) -> &str {
        "snapshot"
    }
}

fn seed_key(id: TitleId, kind: ContentKind) -> String {
    format!("{}:{}", kind.as_token(), id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title(id: TitleId, kind: ContentKind, rating: f64) -> Title {
        Title {
            id,
            kind,
            name: format!("Title {}", id),
            poster: None,
            overview: String::new(),
            rating,
            popularity: 0.0,
            release_date: String::new(),
        }
    }

    #[tokio::test]
    async fn test_recommended_lookup() {
        let mut catalog = SnapshotCatalog::default();
        catalog.insert_recommendations(
            RecommendationSeed::new(5, ContentKind::Movie),
            vec![title(11, ContentKind::Movie, 8.5)],
        );

        let titles = catalog.get_recommended(5, ContentKind::Movie, 1).await.unwrap();
        assert_eq!(titles.len(), 1);

        // Same id, other kind is a different key
        let missing = catalog.get_recommended(5, ContentKind::Series, 1).await;
        assert!(matches!(missing, Err(CatalogError::NotFound(_))));

        let page_two = catalog.get_recommended(5, ContentKind::Movie, 2).await.unwrap();
        assert!(page_two.is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_seed() {
        let mut catalog = SnapshotCatalog::default();
        let seed = RecommendationSeed::new(13, ContentKind::Movie);
        catalog.insert_recommendations(seed, vec![title(1, ContentKind::Movie, 9.0)]);
        catalog.mark_unavailable(seed);

        let result = catalog.get_recommended(13, ContentKind::Movie, 1).await;
        assert!(matches!(result, Err(CatalogError::ServerError(_))));
    }

    #[test]
    fn test_parse_snapshot_json() {
        let json = r#"{
            "popular_movies": [
                { "id": 1, "kind": "movie", "name": "Heat", "rating": 8.3, "release_date": "1995-12-15" }
            ],
            "recommendations": {
                "tv:9": [ { "id": 20, "kind": "tv", "name": "Dark", "rating": 9.0 } ]
            }
        }"#;
        let snapshot: CatalogSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.popular_movies[0].year(), "1995");
        assert!(snapshot.popular_series.is_empty());
        assert_eq!(snapshot.recommendations["tv:9"][0].kind, ContentKind::Series);
    }
}
