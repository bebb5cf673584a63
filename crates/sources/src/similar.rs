//! Similar-titles source
//!
//! Turns one seed into candidates by asking the catalog for titles it
//! recommends alongside the seed.
//!
//! ## Algorithm
//! 1. Request a single page of recommendations for `(id, kind)`
//! 2. Stop waiting once the configured timeout elapses
//! 3. Tag every returned title with the seed and its page position
//!
//! A failure or timeout is reported for this seed only. The caller decides
//! what to do with it; nothing here is shared between seeds.

use crate::catalog::CatalogLookup;
use crate::error::SeedLookupError;
use crate::types::Candidate;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use watch_history::RecommendationSeed;

/// Default time to wait for one catalog call
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Catalog page requested for every seed
pub const DEFAULT_PAGE: u32 = 1;

/// Fetches per-seed recommendations from a catalog
#[derive(Clone)]
pub struct SimilarTitlesSource {
    /// Shared catalog handle; lookups are read-only
    catalog: Arc<dyn CatalogLookup>,

    /// How long to wait for one seed's page
    timeout: Duration,

    page: u32,
}

impl SimilarTitlesSource {
    pub fn new(catalog: Arc<dyn CatalogLookup>) -> Self {
        Self {
            catalog,
            timeout: DEFAULT_LOOKUP_TIMEOUT,
            page: DEFAULT_PAGE,
        }
    }

    /// Configure the per-call timeout (default: 5s)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configure the catalog page to request (default: 1)
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch candidates for one seed.
    ///
    /// `seed_index` is the seed's position in the request's seed list.
    #[instrument(skip(self, seed), fields(catalog = self.catalog.name(), seed = %seed))]
    pub async fn fetch(
        &self,
        seed: RecommendationSeed,
        seed_index: usize,
    ) -> Result<Vec<Candidate>, SeedLookupError> {
        let lookup = self.catalog.get_recommended(seed.id, seed.kind, self.page);

        let titles = match tokio::time::timeout(self.timeout, lookup).await {
            Ok(Ok(titles)) => titles,
            Ok(Err(source)) => {
                warn!("Catalog lookup failed for {}: {}", seed, source);
                return Err(SeedLookupError::Catalog { seed, source });
            }
            Err(_) => {
                warn!("Catalog lookup for {} timed out after {:?}", seed, self.timeout);
                return Err(SeedLookupError::Timeout {
                    seed,
                    timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
                });
            }
        };

        // Catalogs answer per kind; anything else is not comparable with
        // this seed's bucket and is dropped.
        let candidates: Vec<Candidate> = titles
            .into_iter()
            .filter(|title| title.kind == seed.kind)
            .enumerate()
            .map(|(rank, title)| Candidate::new(title, seed, seed_index, rank))
            .collect();

        debug!("Fetched {} candidates for {}", candidates.len(), seed);
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CatalogError, CatalogResult};
    use watch_history::{ContentKind, Title, TitleId};

    struct SlowCatalog;

    #[async_trait::async_trait]
    impl CatalogLookup for SlowCatalog {
        async fn get_recommended(
            &self,
            _id: TitleId,
            _kind: ContentKind,
            _page: u32,
        ) -> CatalogResult<Vec<Title>> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Vec::new())
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    struct FixedCatalog(CatalogResult<Vec<Title>>);

    #[async_trait::async_trait]
    impl CatalogLookup for FixedCatalog {
        async fn get_recommended(
            &self,
            _id: TitleId,
            _kind: ContentKind,
            _page: u32,
        ) -> CatalogResult<Vec<Title>> {
            self.0.clone()
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn title(id: TitleId, kind: ContentKind) -> Title {
        Title {
            id,
            kind,
            name: format!("Title {}", id),
            poster: None,
            overview: String::new(),
            rating: 7.0,
            popularity: 0.0,
            release_date: String::new(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_a_seed_failure() {
        let source = SimilarTitlesSource::new(Arc::new(SlowCatalog))
            .with_timeout(Duration::from_millis(250));
        let seed = RecommendationSeed::new(1, ContentKind::Movie);

        let result = source.fetch(seed, 0).await;
        assert_eq!(
            result,
            Err(SeedLookupError::Timeout {
                seed,
                timeout_ms: 250
            })
        );
    }

    #[tokio::test]
    async fn test_catalog_error_is_wrapped_with_seed() {
        let source = SimilarTitlesSource::new(Arc::new(FixedCatalog(Err(CatalogError::RateLimited))));
        let seed = RecommendationSeed::new(3, ContentKind::Series);

        let err = source.fetch(seed, 4).await.unwrap_err();
        assert_eq!(err.seed(), seed);
        assert!(matches!(err, SeedLookupError::Catalog { source: CatalogError::RateLimited, .. }));
    }

    #[tokio::test]
    async fn test_candidates_are_tagged_in_page_order() {
        let source = SimilarTitlesSource::new(Arc::new(FixedCatalog(Ok(vec![
            title(11, ContentKind::Movie),
            title(99, ContentKind::Series),
            title(12, ContentKind::Movie),
        ]))));
        let seed = RecommendationSeed::new(5, ContentKind::Movie);

        let candidates = source.fetch(seed, 2).await.unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].id(), 11);
        assert_eq!(candidates[1].id(), 12);
        assert_eq!(candidates[1].rank, 1);
        assert!(candidates.iter().all(|c| c.seed_index == 2 && c.seed == seed));
    }
}
