//! Trending Mixer
//!
//! Turns the two popular listings into the capped trending lists shown
//! next to personal recommendations. History plays no part here.
//!
//! `TrendingBoard` holds the latest popular lists and recomputes the
//! trending lists whenever either one is replaced, so the two listings
//! can arrive independently and in any order.

use serde::Serialize;
use sources::{CatalogError, CatalogLookup};
use tracing::{debug, info, instrument, warn};
use watch_history::{ContentKind, Title};

use crate::config::EngineConfig;

/// Popular listings are always read from their first page
const POPULAR_PAGE: u32 = 1;

/// Capped trending lists, one per kind
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrendingLists {
    pub movies: Vec<Title>,
    pub series: Vec<Title>,
}

/// Takes the head of each popular list and caps the result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendingMixer {
    take: usize,
    limit: usize,
}

impl Default for TrendingMixer {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self::new(config.trending_take, config.trending_limit)
    }
}

impl TrendingMixer {
    pub fn new(take: usize, limit: usize) -> Self {
        Self { take, limit }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.trending_take, config.trending_limit)
    }

    pub fn mix(&self, popular_movies: &[Title], popular_series: &[Title]) -> TrendingLists {
        TrendingLists {
            movies: self.cap(popular_movies),
            series: self.cap(popular_series),
        }
    }

    fn cap(&self, popular: &[Title]) -> Vec<Title> {
        popular
            .iter()
            .take(self.take)
            .take(self.limit)
            .cloned()
            .collect()
    }
}

/// Latest popular lists plus the trending lists derived from them
#[derive(Debug, Clone, Default)]
pub struct TrendingBoard {
    mixer: TrendingMixer,
    popular_movies: Vec<Title>,
    popular_series: Vec<Title>,
    trending: TrendingLists,
}

impl TrendingBoard {
    pub fn new(mixer: TrendingMixer) -> Self {
        Self {
            mixer,
            ..Self::default()
        }
    }

    pub fn set_popular_movies(&mut self, movies: Vec<Title>) {
        debug!("Popular movies updated: {} titles", movies.len());
        self.popular_movies = movies;
        self.refresh();
    }

    pub fn set_popular_series(&mut self, series: Vec<Title>) {
        debug!("Popular series updated: {} titles", series.len());
        self.popular_series = series;
        self.refresh();
    }

    pub fn set_popular(&mut self, kind: ContentKind, titles: Vec<Title>) {
        match kind {
            ContentKind::Movie => self.set_popular_movies(titles),
            ContentKind::Series => self.set_popular_series(titles),
        }
    }

    pub fn trending(&self) -> &TrendingLists {
        &self.trending
    }

    pub fn into_trending(self) -> TrendingLists {
        self.trending
    }

    fn refresh(&mut self) {
        self.trending = self.mixer.mix(&self.popular_movies, &self.popular_series);
    }
}

/// Fetch both popular listings and build the trending lists.
///
/// The two listings are requested concurrently. Either failure leaves
/// both lists empty and is returned next to them.
#[instrument(skip(catalog, config), fields(catalog = catalog.name()))]
pub async fn load_trending(
    catalog: &dyn CatalogLookup,
    config: &EngineConfig,
) -> (TrendingLists, Option<CatalogError>) {
    let (movies, series) = tokio::join!(
        catalog.get_popular(ContentKind::Movie, POPULAR_PAGE),
        catalog.get_popular(ContentKind::Series, POPULAR_PAGE),
    );

    match (movies, series) {
        (Ok(mut movies), Ok(mut series)) => {
            movies.truncate(config.popular_limit);
            series.truncate(config.popular_limit);

            let mut board = TrendingBoard::new(TrendingMixer::from_config(config));
            board.set_popular_movies(movies);
            board.set_popular_series(series);

            let trending = board.into_trending();
            info!(
                "Trending lists ready: {} movies, {} series",
                trending.movies.len(),
                trending.series.len()
            );
            (trending, None)
        }
        (Err(e), _) | (_, Err(e)) => {
            warn!("Failed to load popular titles: {}", e);
            (TrendingLists::default(), Some(e))
        }
    }
}
