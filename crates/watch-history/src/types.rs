//! Core domain types shared by every stage of the advisor.
//!
//! - `Title`: an immutable catalog item as returned by the catalog API
//! - `WatchRecord`: the persisted fact "user watched title X"
//! - `UserHistory`: one user's append-only, insertion-ordered records
//! - `RecommendationSeed`: an (id, kind) pair used to query the catalog

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================

/// Catalog identifier of a title.
///
/// Unique within a content kind only: a movie and a series may share an id.
pub type TitleId = u32;

/// Base URL for poster thumbnails served by the catalog's image CDN
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

// =============================================================================
// Content Kind
// =============================================================================

/// Discriminator between movie and series content.
///
/// On the wire (history lines, catalog JSON) series are written as `tv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContentKind {
    #[serde(rename = "movie")]
    Movie,
    #[serde(rename = "tv", alias = "series")]
    Series,
}

impl ContentKind {
    /// All kinds in display order
    pub const ALL: [ContentKind; 2] = [ContentKind::Movie, ContentKind::Series];

    /// Token written into encoded history lines
    pub fn as_token(&self) -> &'static str {
        match self {
            ContentKind::Movie => "movie",
            ContentKind::Series => "tv",
        }
    }

    /// Parse a wire token. `series` is accepted as an alias of `tv`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "movie" => Some(ContentKind::Movie),
            "tv" | "series" => Some(ContentKind::Series),
            _ => None,
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

// =============================================================================
// Title
// =============================================================================

/// A catalog item (movie or series).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub id: TitleId,
    pub kind: ContentKind,
    /// Display name (`title` for movies, `name` for series upstream)
    pub name: String,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub overview: String,
    /// Average vote, 0.0 to 10.0
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub popularity: f64,
    /// Release (or first-air) date as delivered, e.g. "2010-07-15"
    #[serde(default)]
    pub release_date: String,
}

impl Title {
    /// Release year: the first four characters of the release date
    pub fn year(&self) -> &str {
        let end = self
            .release_date
            .char_indices()
            .nth(4)
            .map(|(idx, _)| idx)
            .unwrap_or(self.release_date.len());
        &self.release_date[..end]
    }

    /// Full poster URL, if the title has a poster
    pub fn poster_url(&self) -> Option<String> {
        self.poster
            .as_deref()
            .map(|path| format!("{}{}", POSTER_BASE_URL, path))
    }
}

// =============================================================================
// Watch Records
// =============================================================================

/// The persisted fact "user watched title X".
///
/// Records are created when a user marks a title as watched and are
/// never mutated or deleted afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchRecord {
    pub id: TitleId,
    pub title: String,
    pub poster: Option<String>,
    /// Rating of the title at the time it was watched
    pub rating: f64,
    pub overview: String,
    pub year: String,
    pub kind: ContentKind,
}

impl From<&Title> for WatchRecord {
    fn from(title: &Title) -> Self {
        Self {
            id: title.id,
            title: title.name.clone(),
            poster: title.poster.clone(),
            rating: title.rating,
            overview: title.overview.clone(),
            year: title.year().to_string(),
            kind: title.kind,
        }
    }
}

impl WatchRecord {
    /// The (id, kind) pair used to query the catalog for related titles
    pub fn seed(&self) -> RecommendationSeed {
        RecommendationSeed {
            id: self.id,
            kind: self.kind,
        }
    }
}

/// A previously-watched title used to look up related recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecommendationSeed {
    pub id: TitleId,
    pub kind: ContentKind,
}

impl RecommendationSeed {
    pub fn new(id: TitleId, kind: ContentKind) -> Self {
        Self { id, kind }
    }
}

impl fmt::Display for RecommendationSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

// =============================================================================
// UserHistory
// =============================================================================

/// One user's watch history, oldest first.
///
/// The only mutation is `append_if_absent`, which keeps ids unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserHistory {
    records: Vec<WatchRecord>,
}

impl UserHistory {
    /// Creates an empty history
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Builds a history from already-ordered records.
    ///
    /// Later duplicates of an id are dropped so the uniqueness rule holds
    /// even for histories written by older clients.
    pub fn from_records(records: impl IntoIterator<Item = WatchRecord>) -> Self {
        let mut history = Self::new();
        for record in records {
            history.append_if_absent(record);
        }
        history
    }

    /// Appends the record unless its id is already present.
    ///
    /// Returns `true` if the record was added.
    pub fn append_if_absent(&mut self, record: WatchRecord) -> bool {
        if self.contains_id(record.id) {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn contains_id(&self, id: TitleId) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    /// Every id in the history, regardless of kind
    pub fn ids(&self) -> HashSet<TitleId> {
        self.records.iter().map(|r| r.id).collect()
    }

    pub fn records(&self) -> &[WatchRecord] {
        &self.records
    }

    /// Oldest first; walk it with `.rev()` for most recent first
    pub fn iter(&self) -> std::slice::Iter<'_, WatchRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: TitleId, kind: ContentKind) -> WatchRecord {
        WatchRecord {
            id,
            title: format!("Title {}", id),
            poster: None,
            rating: 7.5,
            overview: String::new(),
            year: "2010".to_string(),
            kind,
        }
    }

    #[test]
    fn test_kind_tokens() {
        assert_eq!(ContentKind::from_token("movie"), Some(ContentKind::Movie));
        assert_eq!(ContentKind::from_token("tv"), Some(ContentKind::Series));
        assert_eq!(ContentKind::from_token("series"), Some(ContentKind::Series));
        assert_eq!(ContentKind::from_token("podcast"), None);
        assert_eq!(ContentKind::Series.as_token(), "tv");
    }

    #[test]
    fn test_append_if_absent_is_idempotent() {
        let mut history = UserHistory::new();
        assert!(history.append_if_absent(record(5, ContentKind::Movie)));
        assert!(history.append_if_absent(record(9, ContentKind::Series)));

        let before = history.clone();
        assert!(!history.append_if_absent(record(5, ContentKind::Movie)));
        assert_eq!(history, before);
    }

    #[test]
    fn test_append_checks_id_across_kinds() {
        let mut history = UserHistory::new();
        history.append_if_absent(record(5, ContentKind::Movie));

        // Same id as a series is still treated as already present
        assert!(!history.append_if_absent(record(5, ContentKind::Series)));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_iter_walks_both_ways() {
        let history = UserHistory::from_records(vec![
            record(1, ContentKind::Movie),
            record(2, ContentKind::Series),
        ]);

        let newest_first: Vec<TitleId> = history.iter().rev().map(|r| r.id).collect();
        assert_eq!(newest_first, vec![2, 1]);
    }

    #[test]
    fn test_from_records_drops_later_duplicates() {
        let history = UserHistory::from_records(vec![
            record(1, ContentKind::Movie),
            record(2, ContentKind::Movie),
            record(1, ContentKind::Series),
        ]);

        assert_eq!(history.len(), 2);
        assert_eq!(history.records()[0].kind, ContentKind::Movie);
    }

    #[test]
    fn test_title_year_and_poster() {
        let title = Title {
            id: 27205,
            kind: ContentKind::Movie,
            name: "Inception".to_string(),
            poster: Some("/poster.jpg".to_string()),
            overview: String::new(),
            rating: 8.4,
            popularity: 90.0,
            release_date: "2010-07-15".to_string(),
        };

        assert_eq!(title.year(), "2010");
        assert_eq!(
            title.poster_url().as_deref(),
            Some("https://image.tmdb.org/t/p/w500/poster.jpg")
        );

        let watched = WatchRecord::from(&title);
        assert_eq!(watched.year, "2010");
        assert_eq!(watched.seed(), RecommendationSeed::new(27205, ContentKind::Movie));
    }

    #[test]
    fn test_short_release_date() {
        let title = Title {
            id: 1,
            kind: ContentKind::Series,
            name: "Pilot".to_string(),
            poster: None,
            overview: String::new(),
            rating: 0.0,
            popularity: 0.0,
            release_date: "19".to_string(),
        };
        assert_eq!(title.year(), "19");
        assert!(title.poster_url().is_none());
    }
}
