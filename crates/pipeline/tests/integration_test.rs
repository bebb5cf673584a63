//! Integration tests for the filter + accumulate + rank stages.

use pipeline::{rank_and_truncate, FilterPipeline, KindBuckets};
use sources::user_context::context_from_history;
use sources::Candidate;
use std::collections::HashSet;
use watch_history::{ContentKind, RecommendationSeed, Title, TitleId, UserHistory, WatchRecord};

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

fn page(seed: RecommendationSeed, seed_index: usize, titles: Vec<Title>) -> Vec<Candidate> {
    titles
        .into_iter()
        .enumerate()
        .map(|(rank, t)| Candidate::new(t, seed, seed_index, rank))
        .collect()
}

fn watched(items: &[(TitleId, ContentKind)]) -> UserHistory {
    UserHistory::from_records(items.iter().map(|&(id, kind)| WatchRecord {
        id,
        title: format!("Watched {}", id),
        poster: None,
        rating: 7.0,
        overview: String::new(),
        year: String::new(),
        kind,
    }))
}

/// Runs the three stages the way the aggregator does, without the catalog
fn run(history: &UserHistory, pages: Vec<Vec<Candidate>>) -> (Vec<Title>, Vec<Title>) {
    let context = context_from_history("ada", history, 3);
    let per_seed = FilterPipeline::per_seed(6.0, 8);
    let final_pass = FilterPipeline::final_pass();

    let mut buckets = KindBuckets::new();
    for candidates in pages {
        buckets.merge(per_seed.apply(candidates, &context).unwrap());
    }

    let movies = final_pass.apply(buckets.movies.into_candidates(), &context).unwrap();
    let series = final_pass.apply(buckets.series.into_candidates(), &context).unwrap();
    (rank_and_truncate(movies, 20), rank_and_truncate(series, 20))
}

#[test]
fn test_worked_example() {
    let movie_seed = RecommendationSeed::new(5, ContentKind::Movie);
    let series_seed = RecommendationSeed::new(9, ContentKind::Series);
    let history = watched(&[(5, ContentKind::Movie), (9, ContentKind::Series)]);

    let (movies, series) = run(
        &history,
        vec![
            page(
                movie_seed,
                0,
                vec![
                    title(5, ContentKind::Movie, 7.0),
                    title(11, ContentKind::Movie, 8.5),
                    title(12, ContentKind::Movie, 5.9),
                ],
            ),
            page(series_seed, 1, vec![title(20, ContentKind::Series, 9.0)]),
        ],
    );

    assert_eq!(movies, vec![title(11, ContentKind::Movie, 8.5)]);
    assert_eq!(series, vec![title(20, ContentKind::Series, 9.0)]);
}

#[test]
fn test_outputs_hold_dedup_and_exclusion_invariants() {
    let history = watched(&[
        (1, ContentKind::Movie),
        (2, ContentKind::Movie),
        (3, ContentKind::Movie),
        (50, ContentKind::Series),
    ]);

    // Three seeds recommending heavily overlapping titles, including watched ones
    let pages: Vec<Vec<Candidate>> = (1..=3)
        .map(|seed_id| {
            let seed = RecommendationSeed::new(seed_id, ContentKind::Movie);
            let titles = (1..=12)
                .map(|id| title(id * 2, ContentKind::Movie, 6.0 + (id % 5) as f64))
                .chain(std::iter::once(title(50, ContentKind::Movie, 9.9)))
                .collect();
            page(seed, seed_id as usize - 1, titles)
        })
        .collect();

    let (movies, series) = run(&history, pages);
    assert!(series.is_empty());

    let history_ids = history.ids();
    let mut seen = HashSet::new();
    for t in &movies {
        assert!(seen.insert(t.id), "duplicate id {}", t.id);
        assert!(!history_ids.contains(&t.id), "watched id {} leaked", t.id);
        assert!(t.rating > 6.0);
    }
    assert!(movies.len() <= 20);

    // Ratings never increase down the list
    assert!(movies.windows(2).all(|w| w[0].rating >= w[1].rating));
}

#[test]
fn test_per_seed_cap_counts_only_quality_titles() {
    let seed = RecommendationSeed::new(1, ContentKind::Series);
    let history = watched(&[(1, ContentKind::Series)]);

    let mut titles: Vec<Title> = (100..110).map(|id| title(id, ContentKind::Series, 4.0)).collect();
    titles.extend((200..215).map(|id| title(id, ContentKind::Series, 7.5)));

    let (_, series) = run(&history, vec![page(seed, 0, titles)]);

    let ids: Vec<TitleId> = series.iter().map(|t| t.id).collect();
    assert_eq!(ids, (200..208).collect::<Vec<TitleId>>());
}

#[test]
fn test_empty_history_and_no_pages() {
    let (movies, series) = run(&UserHistory::new(), Vec::new());
    assert!(movies.is_empty());
    assert!(series.is_empty());
}
