//! Snapshot file loading plus the seed lookups built on it.

use sources::user_context::context_from_history;
use sources::{CatalogError, CatalogLookup, SeedLookupError, SimilarTitlesSource, SnapshotCatalog};
use std::io::Write;
use std::sync::Arc;
use watch_history::codec::decode_batch;
use watch_history::{ContentKind, RecommendationSeed, UserHistory};

const SNAPSHOT: &str = r#"{
    "popular_movies": [
        { "id": 550, "kind": "movie", "name": "Fight Club", "rating": 8.4, "release_date": "1999-10-15" }
    ],
    "recommendations": {
        "movie:27205": [
            { "id": 155, "kind": "movie", "name": "The Dark Knight", "rating": 8.5 },
            { "id": 1399, "kind": "tv", "name": "Game of Thrones", "rating": 8.4 }
        ],
        "tv:1396": [
            { "id": 60059, "kind": "tv", "name": "Better Call Saul", "rating": 8.7 }
        ]
    },
    "unavailable": ["movie:13"]
}"#;

fn write_snapshot() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SNAPSHOT.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_load_and_fetch_per_seed() {
    let file = write_snapshot();
    let catalog = Arc::new(SnapshotCatalog::load_from_file(file.path()).unwrap());
    let source = SimilarTitlesSource::new(catalog.clone());

    let lines = [
        "13:Forrest Gump::8.5:Life is like a box of chocolates:1994:movie",
        "1396:Breaking Bad::8.9:Chemistry teacher; cook:2008:tv",
        "27205:Inception::8.4:Dreams within dreams:2010:movie",
    ];
    let history = UserHistory::from_records(decode_batch(&lines).records);
    let context = context_from_history("ada@example.com", &history, 3);
    assert_eq!(context.seeds.len(), 3);

    let mut fetched = Vec::new();
    let mut failed = Vec::new();
    for (idx, seed) in context.seeds.iter().enumerate() {
        match source.fetch(*seed, idx).await {
            Ok(candidates) => fetched.extend(candidates),
            Err(e) => failed.push(e),
        }
    }

    // Forrest Gump is marked unavailable; the other two seeds still answer
    assert_eq!(failed.len(), 1);
    assert!(matches!(
        &failed[0],
        SeedLookupError::Catalog { source: CatalogError::ServerError(_), .. }
    ));
    assert_eq!(failed[0].seed(), RecommendationSeed::new(13, ContentKind::Movie));

    // The series listed under the Inception seed is dropped
    let ids: Vec<u32> = fetched.iter().map(|c| c.id()).collect();
    assert_eq!(ids, vec![60059, 155]);

    let popular = catalog.get_popular(ContentKind::Movie, 1).await.unwrap();
    assert_eq!(popular[0].year(), "1999");
}

#[test]
fn test_missing_snapshot_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = SnapshotCatalog::load_from_file(&dir.path().join("missing.json"));
    assert!(result.is_err());
}
