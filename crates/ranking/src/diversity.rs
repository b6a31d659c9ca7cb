//! Genre-capped diversity re-ranking.
//!
//! ## Algorithm
//! 1. Strict pass over the ranked input in order, keeping a running count per
//!    genre. An item is placed only if it has at least one genre and every one
//!    of its genres is still under `max_per_genre`; placing it bumps all of them.
//! 2. Fill pass: append every item not placed (capped out, or no genres) in
//!    original relative order.
//!
//! The result is always a permutation of the input. Placement is tracked by
//! input index, never by value equality.

use crate::traits::Reranker;
use crate::types::{HasGenres, ScoredMovie};
use std::collections::HashMap;
use tracing::debug;

/// Indices of the items accepted by the strict pass, in input order
pub fn strict_pass<T: HasGenres>(items: &[T], max_per_genre: usize) -> Vec<usize> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut placed = Vec::new();

    for (index, item) in items.iter().enumerate() {
        let genres = item.genres().keys();
        if genres.is_empty() {
            continue;
        }
        let under_cap = genres
            .iter()
            .all(|genre| counts.get(genre).copied().unwrap_or(0) < max_per_genre);
        if !under_cap {
            continue;
        }
        for genre in genres {
            *counts.entry(genre).or_insert(0) += 1;
        }
        placed.push(index);
    }

    placed
}

/// Reorder `items` so no genre exceeds `max_per_genre` near the top.
///
/// Same length and same elements as the input.
pub fn diversify<T: HasGenres>(items: Vec<T>, max_per_genre: usize) -> Vec<T> {
    let strict = strict_pass(&items, max_per_genre);
    debug!(
        "Diversity strict pass placed {} of {} items",
        strict.len(),
        items.len()
    );

    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    let mut out = Vec::with_capacity(slots.len());
    for index in strict {
        if let Some(item) = slots[index].take() {
            out.push(item);
        }
    }
    out.extend(slots.into_iter().flatten());
    out
}

/// `diversify` as a pipeline stage
#[derive(Debug, Clone)]
pub struct GenreDiversityReranker {
    max_per_genre: usize,
}

impl GenreDiversityReranker {
    pub fn new(max_per_genre: usize) -> Self {
        Self { max_per_genre }
    }
}

impl Reranker for GenreDiversityReranker {
    fn name(&self) -> &str {
        "GenreDiversity"
    }

    fn apply(&self, items: Vec<ScoredMovie>) -> Vec<ScoredMovie> {
        diversify(items, self.max_per_genre)
    }
}
