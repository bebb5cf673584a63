//! Text encoding for persisted watch records.
//!
//! One record per line:
//!
//! ```text
//! id:title:poster:rating:overview:year:kind
//! ```
//!
//! - `poster` is empty when the title has none
//! - `rating` is a decimal that always carries a fractional part (`7.0`)
//! - every `:` inside `overview` is written as `;` and reverted on decode
//! - `kind` is `movie` or `tv`; an empty or unknown token reads as `movie`
//!
//! Older clients wrote only `id:title:poster`. Those lines still decode,
//! with the missing fields defaulted. Nothing else is escaped, so a title
//! containing `:` shifts the fields of its own line; decoding stays
//! positional, exactly as the lines were always read.

use crate::error::DecodeError;
use crate::types::{ContentKind, TitleId, WatchRecord};
use rayon::prelude::*;

/// Separator between fields of an encoded line
pub const FIELD_DELIMITER: char = ':';

/// Stand-in for `:` inside the overview field
pub const OVERVIEW_COLON_SUBSTITUTE: char = ';';

/// Field count of the current format
pub const FULL_FIELD_COUNT: usize = 7;

/// Field count of the legacy `id:title:poster` format
pub const LEGACY_FIELD_COUNT: usize = 3;

/// Outcome of decoding a single line.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// Current seven-field format
    Full(WatchRecord),
    /// Legacy `id:title:poster` line; rating, overview, year and kind defaulted
    Legacy(WatchRecord),
    /// Unusable line; callers skip it and carry on with the rest
    Malformed(DecodeError),
}

impl Decoded {
    /// The record, if the line was usable in either format
    pub fn record(&self) -> Option<&WatchRecord> {
        match self {
            Decoded::Full(record) | Decoded::Legacy(record) => Some(record),
            Decoded::Malformed(_) => None,
        }
    }

    pub fn into_record(self) -> Option<WatchRecord> {
        match self {
            Decoded::Full(record) | Decoded::Legacy(record) => Some(record),
            Decoded::Malformed(_) => None,
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, Decoded::Legacy(_))
    }
}

/// Result of decoding many lines at once
#[derive(Debug, Default)]
pub struct DecodedBatch {
    /// Usable records in input order
    pub records: Vec<WatchRecord>,
    /// Zero-based line index and reason for every skipped line
    pub skipped: Vec<(usize, DecodeError)>,
    /// How many of `records` came from legacy lines
    pub legacy_count: usize,
}

/// Encode a record as a single history line.
pub fn encode(record: &WatchRecord) -> String {
    let overview: String = record
        .overview
        .chars()
        .map(|c| {
            if c == FIELD_DELIMITER {
                OVERVIEW_COLON_SUBSTITUTE
            } else {
                c
            }
        })
        .collect();

    format!(
        "{id}:{title}:{poster}:{rating}:{overview}:{year}:{kind}",
        id = record.id,
        title = record.title,
        poster = record.poster.as_deref().unwrap_or(""),
        rating = format_rating(record.rating),
        overview = overview,
        year = record.year,
        kind = record.kind.as_token(),
    )
}

/// Decode one history line.
///
/// Never panics; a bad line comes back as `Decoded::Malformed`.
pub fn decode(line: &str) -> Decoded {
    let parts: Vec<&str> = line.split(FIELD_DELIMITER).collect();

    if parts.len() >= FULL_FIELD_COUNT {
        let id = match parse_id(parts[0]) {
            Ok(id) => id,
            Err(e) => return Decoded::Malformed(e),
        };

        Decoded::Full(WatchRecord {
            id,
            title: parts[1].to_string(),
            poster: parse_poster(parts[2]),
            rating: parts[3].parse::<f64>().unwrap_or(0.0),
            overview: parts[4].replace(OVERVIEW_COLON_SUBSTITUTE, ":"),
            year: parts[5].to_string(),
            kind: parse_kind(id, parts[6]),
        })
    } else if parts.len() >= LEGACY_FIELD_COUNT {
        let id = match parse_id(parts[0]) {
            Ok(id) => id,
            Err(e) => return Decoded::Malformed(e),
        };

        Decoded::Legacy(WatchRecord {
            id,
            title: parts[1].to_string(),
            poster: parse_poster(parts[2]),
            rating: 0.0,
            overview: String::new(),
            year: String::new(),
            kind: ContentKind::Movie,
        })
    } else {
        Decoded::Malformed(DecodeError::TooFewFields {
            expected: LEGACY_FIELD_COUNT,
            found: parts.len(),
        })
    }
}

/// Decode a whole history, skipping corrupt lines.
///
/// Lines are decoded in parallel; output order matches input order.
pub fn decode_batch<S>(lines: &[S]) -> DecodedBatch
where
    S: AsRef<str> + Sync,
{
    let decoded: Vec<Decoded> = lines.par_iter().map(|line| decode(line.as_ref())).collect();

    let mut batch = DecodedBatch::default();
    for (idx, item) in decoded.into_iter().enumerate() {
        match item {
            Decoded::Full(record) => batch.records.push(record),
            Decoded::Legacy(record) => {
                batch.legacy_count += 1;
                batch.records.push(record);
            }
            Decoded::Malformed(reason) => {
                tracing::warn!("Skipping history line {}: {}", idx, reason);
                batch.skipped.push((idx, reason));
            }
        }
    }
    batch
}

/// Prefix every encoded line of the given id starts with
pub fn id_prefix(id: TitleId) -> String {
    format!("{}{}", id, FIELD_DELIMITER)
}

/// Shortest round-trip decimal that always shows a fractional part.
///
/// `{:?}` on f64 already behaves this way: `7.0`, `8.5`, `6.25`.
fn format_rating(rating: f64) -> String {
    format!("{:?}", rating)
}

fn parse_id(s: &str) -> Result<TitleId, DecodeError> {
    s.parse().map_err(|_| DecodeError::InvalidId {
        value: s.to_string(),
    })
}

fn parse_poster(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// The record still counts as watched whatever its kind field holds.
fn parse_kind(id: TitleId, s: &str) -> ContentKind {
    if s.is_empty() {
        return ContentKind::Movie;
    }
    ContentKind::from_token(s).unwrap_or_else(|| {
        tracing::warn!("Unknown kind {:?} for title {}, reading it as movie", s, id);
        ContentKind::Movie
    })
}
