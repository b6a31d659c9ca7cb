//! Integration tests for ranking.
//!
//! Scenario checks over a small catalog plus property loops over
//! pseudo-random catalogs.

use catalog::{LabelSet, Movie};
use ranking::*;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

fn create_scenario_collection() -> Vec<Movie> {
    vec![
        Movie::new("inception", "Inception")
            .with_genre(["Sci-Fi"])
            .with_tags(["dream"])
            .with_rating(8.8),
        Movie::new("interstellar", "Interstellar")
            .with_genre(["Sci-Fi"])
            .with_tags(["space"])
            .with_rating(8.7),
        Movie::new("titanic", "Titanic")
            .with_genre(["Romance"])
            .with_rating(7.8),
    ]
}

const GENRES: [&str; 6] = ["Action", "Drama", "Comedy", "Sci-Fi", "Horror", "Romance"];
const TAGS: [&str; 5] = ["space", "dream", "heist", "family", "war"];
const TITLES: [&str; 6] = ["Alpha", "alpine", "Beta", "Bravo", "al", "Zed"];

fn pick<'a>(rng: &mut StdRng, pool: &[&'a str]) -> Vec<&'a str> {
    let count = rng.random_range(0..3);
    (0..count).filter_map(|_| pool.choose(rng).copied()).collect()
}

fn random_collection(rng: &mut StdRng, size: usize) -> Vec<Movie> {
    (0..size)
        .map(|i| {
            let prefix = TITLES.choose(rng).copied().unwrap_or("Alpha");
            let title = format!("{} {}", prefix, rng.random_range(0..20));
            Movie::new(format!("m{}", i), title)
                .with_genre(pick(rng, &GENRES))
                .with_tags(pick(rng, &TAGS))
                .with_rating(rng.random_range(0..=100u32) as f32 / 10.0)
        })
        .collect()
}

#[test]
fn test_scenario_recommend() {
    let collection = create_scenario_collection();
    let recommender = Recommender::default();
    let out = recommender.recommend(&["Inception"], &collection, 10);

    let titles: Vec<&str> = out.iter().map(|s| s.title()).collect();
    assert_eq!(titles, vec!["Interstellar", "Titanic"]);
    assert!(out[0].score > out[1].score);
    assert_eq!(
        out[0].reasons(),
        vec!["Because you watched \"Inception\" (genre 100%, tags 0%)".to_string()]
    );
    assert_eq!(
        out[1].reasons(),
        vec!["Because it's similar to your recent watches.".to_string()]
    );
}

#[test]
fn test_scenario_top_k() {
    let collection = create_scenario_collection();
    let titles: Vec<&str> = top_k_by_rating(&collection, 2)
        .iter()
        .map(|m| m.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Inception", "Interstellar"]);
}

#[test]
fn test_recommend_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(7);
    let collection = random_collection(&mut rng, 60);
    let history = vec![collection[3].title.clone(), collection[10].title.clone()];
    let recommender = Recommender::default();

    let first = recommender.recommend(&history, &collection, 15);
    let second = recommender.recommend(&history, &collection, 15);
    assert_eq!(first, second);
}

#[test]
fn test_property_recommend_excludes_history() {
    let mut rng = StdRng::seed_from_u64(42);
    let recommender = Recommender::default();
    for _ in 0..50 {
        let collection = random_collection(&mut rng, 30);
        let history: Vec<String> = (0..3)
            .map(|_| collection[rng.random_range(0..30)].title.to_uppercase())
            .collect();
        let watched: HashSet<String> = history.iter().map(|t| t.to_lowercase()).collect();

        let out = recommender.recommend(&history, &collection, 10);
        assert!(out.len() <= 10);
        assert!(!out.is_empty() || collection.iter().all(|m| watched.contains(&m.title_key())));
        for scored in &out {
            assert!(!watched.contains(&scored.movie.title_key()));
        }
        for pair in out.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }
}

#[test]
fn test_property_jaccard_bounds() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..200 {
        let a = LabelSet::from_labels(pick(&mut rng, &GENRES));
        let b = LabelSet::from_labels(pick(&mut rng, &GENRES));
        let sim = jaccard(&a, &b);
        assert!((0.0..=1.0).contains(&sim));
        assert_eq!(sim, jaccard(&b, &a));
        if !a.is_empty() {
            assert_eq!(jaccard(&a, &a), 1.0);
        }
    }
}

#[test]
fn test_property_diversify_is_permutation_and_capped() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..50 {
        let items = random_collection(&mut rng, 25);
        let max = rng.random_range(0..4);

        let strict = strict_pass(&items, max);
        let mut counts = std::collections::HashMap::new();
        for &index in &strict {
            for genre in items[index].genre.keys() {
                *counts.entry(genre).or_insert(0usize) += 1;
            }
        }
        assert!(counts.values().all(|&count| count <= max));

        let before: Vec<String> = items.iter().map(|m| m.id.clone()).collect();
        let out = diversify(items, max);
        let mut after: Vec<String> = out.iter().map(|m| m.id.clone()).collect();
        assert_eq!(after.len(), before.len());

        let mut sorted_before = before.clone();
        sorted_before.sort();
        after.sort();
        assert_eq!(after, sorted_before);
    }
}

#[test]
fn test_property_top_k_matches_full_sort() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..50 {
        let size = rng.random_range(0..40);
        let collection = random_collection(&mut rng, size);
        let k = rng.random_range(0..45);

        let heap: Vec<&str> = top_k_by_rating(&collection, k)
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        let sorted: Vec<&str> = sort_by_rating(&collection, k)
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(heap.len(), k.min(collection.len()));
        assert_eq!(heap, sorted);
    }
}

#[test]
fn test_property_prefix_search() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..50 {
        let collection = random_collection(&mut rng, 30);
        let query = *["a", "AL", "alp", "b", "z", "q"].choose(&mut rng).unwrap();
        let needle = query.to_lowercase();

        let found = prefix_search(&collection, query);
        let expected = collection
            .iter()
            .filter(|m| m.title_key().starts_with(&needle))
            .count();
        assert_eq!(found.len(), expected);
        assert!(found.iter().all(|m| m.title_key().starts_with(&needle)));
        for pair in found.windows(2) {
            assert!(pair[0].title_key() <= pair[1].title_key());
        }
    }

    let collection = create_scenario_collection();
    let all: Vec<&str> = prefix_search(&collection, "")
        .iter()
        .map(|m| m.id.as_str())
        .collect();
    assert_eq!(all, vec!["inception", "interstellar", "titanic"]);
}

#[test]
fn test_diverse_recommendations_with_pipeline() {
    let collection = vec![
        Movie::new("seed", "Seed").with_genre(["Action"]).with_tags(["heist"]),
        Movie::new("a1", "A1").with_genre(["Action"]).with_tags(["heist"]),
        Movie::new("a2", "A2").with_genre(["Action"]).with_tags(["heist"]),
        Movie::new("a3", "A3").with_genre(["Action"]).with_tags(["heist"]),
        Movie::new("c1", "C1").with_genre(["Comedy"]).with_tags(["heist"]),
    ];
    let recommender = Recommender::new(RankingConfig::default().with_max_per_genre(2));
    let out = recommender.recommend_diverse(&["seed"], &collection, 4, 2);

    let ids: Vec<&str> = out.iter().map(|s| s.movie.id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "a2", "c1", "a3"]);
}
