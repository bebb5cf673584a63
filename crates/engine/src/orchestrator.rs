//! # Recommendation Aggregator
//!
//! Coordinates one personalized-recommendation request:
//! 1. Build the user context (seeds, watched ids) from an explicit history
//! 2. Fetch every seed's catalog page concurrently, each with a timeout
//! 3. Per seed: quality threshold, then per-seed cap
//! 4. Merge into one id-unique set per kind, in seed order
//! 5. Per kind: drop watched and duplicate ids, sort by rating, cap
//!
//! A failing seed only loses its own titles. The call itself never fails:
//! lookup problems are listed in the report, and if every lookup failed
//! the report carries `AggregationUnavailable` next to empty lists.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};

use pipeline::{rank_and_truncate, FilterPipeline, KindBuckets};
use sources::user_context::{build_user_context, context_from_history};
use sources::{Candidate, CatalogLookup, SeedLookupError, SimilarTitlesSource, UserContext};
use watch_history::{ContentKind, HistoryStore, RecommendationSeed, Title, UserHistory};

use crate::config::EngineConfig;
use crate::report::{AggregationUnavailable, RankedResult, RecommendationReport};

/// Main aggregator; cheap to clone and share between requests
#[derive(Clone)]
pub struct RecommendationAggregator {
    source: SimilarTitlesSource,
    per_seed: Arc<FilterPipeline>,
    final_pass: Arc<FilterPipeline>,
    limiter: Arc<Semaphore>,
    config: EngineConfig,
}

impl RecommendationAggregator {
    /// Create an aggregator over a catalog
    ///
    /// # Arguments
    /// * `catalog` - Shared catalog handle, used read-only
    /// * `config` - Thresholds, caps, timeout and concurrency
    pub fn new(catalog: Arc<dyn CatalogLookup>, config: EngineConfig) -> Self {
        let source = SimilarTitlesSource::new(catalog).with_timeout(config.lookup_timeout());
        let per_seed = Arc::new(FilterPipeline::per_seed(
            config.quality_threshold,
            config.per_seed_limit,
        ));
        let final_pass = Arc::new(FilterPipeline::final_pass());
        let limiter = Arc::new(Semaphore::new(config.max_concurrent_lookups.max(1)));

        Self {
            source,
            per_seed,
            final_pass,
            limiter,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Read a user's history from the store, then recommend.
    ///
    /// Only a store failure is an error; catalog trouble ends up in the report.
    pub async fn recommend_for_user(
        &self,
        store: &dyn HistoryStore,
        user_key: &str,
    ) -> Result<RecommendationReport> {
        let context = build_user_context(store, user_key, self.config.seeds_per_kind)
            .with_context(|| format!("Failed to build context for {}", user_key))?;
        Ok(self.get_personalized_recommendations(&context).await)
    }

    /// Recommend from an explicitly supplied history.
    pub async fn recommend_from_history(
        &self,
        user_key: &str,
        history: &UserHistory,
    ) -> RecommendationReport {
        let context = context_from_history(user_key, history, self.config.seeds_per_kind);
        info!(
            "Built context for {}: {} watched, {} seeds",
            user_key,
            context.watched_ids.len(),
            context.seeds.len()
        );
        self.get_personalized_recommendations(&context).await
    }

    /// Main entry point: rank recommendations for the context's seeds.
    ///
    /// Never fails. An empty seed list yields empty lists and no error.
    #[instrument(skip(self, context), fields(user = %context.user_key, seeds = context.seeds.len()))]
    pub async fn get_personalized_recommendations(
        &self,
        context: &UserContext,
    ) -> RecommendationReport {
        let start_time = Instant::now();

        let (pages, failures) = self.fetch_all(&context.seeds).await;
        info!(
            "Fetched {} of {} seed pages ({} failed)",
            pages.len(),
            context.seeds.len(),
            failures.len()
        );

        let buckets = self.merge_pages(pages, context);
        debug!(
            "Accumulated {} movie and {} series candidates",
            buckets.movies.len(),
            buckets.series.len()
        );

        let ranked = self.rank_buckets(buckets, context);

        let unavailable = if !context.seeds.is_empty() && failures.len() == context.seeds.len() {
            let unavailable = AggregationUnavailable {
                attempted: context.seeds.len(),
                last_error: failures.last().cloned(),
            };
            warn!("{}", unavailable);
            Some(unavailable)
        } else {
            None
        };

        info!(
            "Ranked {} movies and {} series for {} in {:.2?}",
            ranked.movies.len(),
            ranked.series.len(),
            context.user_key,
            start_time.elapsed()
        );

        RecommendationReport {
            user_key: context.user_key.clone(),
            seeds: context.seeds.clone(),
            last_watched: context.last_watched,
            ranked,
            failures,
            unavailable,
        }
    }

    /// Fetch every seed concurrently (bounded by the limiter).
    ///
    /// Handles are awaited in seed order, so the returned pages are in
    /// seed order no matter which lookup finished first.
    async fn fetch_all(
        &self,
        seeds: &[RecommendationSeed],
    ) -> (Vec<Vec<Candidate>>, Vec<SeedLookupError>) {
        let mut handles = Vec::with_capacity(seeds.len());
        for (seed_index, &seed) in seeds.iter().enumerate() {
            let source = self.source.clone();
            let limiter = self.limiter.clone();
            let handle = tokio::spawn(async move {
                // The semaphore is never closed, so acquire only fails if it is
                let _permit = limiter.acquire_owned().await.ok();
                source.fetch(seed, seed_index).await
            });
            handles.push((seed, handle));
        }

        let mut pages = Vec::with_capacity(seeds.len());
        let mut failures = Vec::new();
        for (seed, handle) in handles {
            match handle.await {
                Ok(Ok(candidates)) => pages.push(candidates),
                Ok(Err(e)) => failures.push(e),
                Err(e) => {
                    warn!("Lookup task for {} did not complete: {}", seed, e);
                    failures.push(SeedLookupError::TaskFailed {
                        seed,
                        reason: e.to_string(),
                    });
                }
            }
        }
        (pages, failures)
    }

    /// Apply the per-seed filters and merge into per-kind sets.
    fn merge_pages(&self, pages: Vec<Vec<Candidate>>, context: &UserContext) -> KindBuckets {
        let mut buckets = KindBuckets::new();
        for page in pages {
            let fetched = page.len();
            match self.per_seed.apply(page, context) {
                Ok(kept) => {
                    let kept_len = kept.len();
                    let added = buckets.merge(kept);
                    debug!(
                        "Seed page: {} fetched, {} passed filters, {} new",
                        fetched, kept_len, added
                    );
                }
                Err(e) => warn!("Per-seed filters failed, dropping page: {:#}", e),
            }
        }
        buckets
    }

    /// Final pass and ranking for both kinds.
    fn rank_buckets(&self, buckets: KindBuckets, context: &UserContext) -> RankedResult {
        let KindBuckets { movies, series } = buckets;
        RankedResult {
            movies: self.rank_kind(ContentKind::Movie, movies.into_candidates(), context),
            series: self.rank_kind(ContentKind::Series, series.into_candidates(), context),
        }
    }

    fn rank_kind(
        &self,
        kind: ContentKind,
        candidates: Vec<Candidate>,
        context: &UserContext,
    ) -> Vec<Title> {
        match self.final_pass.apply(candidates, context) {
            Ok(kept) => rank_and_truncate(kept, self.config.ranked_limit),
            Err(e) => {
                warn!("Final filters failed for {}: {:#}", kind, e);
                Vec::new()
            }
        }
    }
}
