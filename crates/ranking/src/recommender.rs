//! History-seeded content recommendations.
//!
//! ## Algorithm
//! 1. Resolve recent history titles to movies (case-insensitive exact title);
//!    unresolved titles are dropped. Each resolved movie is a *seed*.
//! 2. Exclude every history title from the candidates.
//! 3. For each candidate and seed:
//!    `partial = genre_weight * J(genres) + tag_weight * J(tags)`
//! 4. `score = mean(partials) + clamp(rating / 10, 0, 1) * rating_weight`
//! 5. Explain with the seed that gave the single highest partial
//!    (first seen wins ties).
//! 6. Stable sort by score descending, keep `k`.
//!
//! No watched titles, or none that resolve, means no recommendations:
//! there is no cold-start fallback.

use crate::config::RankingConfig;
use crate::diversity::GenreDiversityReranker;
use crate::rerank_pipeline::RerankPipeline;
use crate::similarity::jaccard_keys;
use crate::types::{Explanation, ScoredMovie};
use catalog::{MAX_RATING, Movie};
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

/// Genre and tag keys of one watched movie, used only while scoring
#[derive(Debug)]
struct Seed<'a> {
    title: &'a str,
    genre: HashSet<String>,
    tags: HashSet<String>,
}

/// Best-matching seed for one candidate
#[derive(Debug, Clone, Copy)]
struct BestSeed<'a> {
    title: &'a str,
    genre_match: f32,
    tag_match: f32,
    partial: f32,
}

/// Scores a collection against recent watches.
///
/// Pure and deterministic: the same titles and collection always produce
/// the same output.
#[derive(Debug, Clone, Default)]
pub struct Recommender {
    config: RankingConfig,
}

impl Recommender {
    pub fn new(config: RankingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Rank `collection` against `recent_titles` (newest first) and keep the top `k`
    #[instrument(skip_all, fields(k = k, history = recent_titles.len(), collection = collection.len()))]
    pub fn recommend<S: AsRef<str>>(
        &self,
        recent_titles: &[S],
        collection: &[Movie],
        k: usize,
    ) -> Vec<ScoredMovie> {
        if recent_titles.is_empty() {
            debug!("No watch history, nothing to recommend");
            return Vec::new();
        }

        let seeds = resolve_seeds(recent_titles, collection);
        debug!(
            "Resolved {} of {} history titles to seeds",
            seeds.len(),
            recent_titles.len()
        );
        if seeds.is_empty() {
            return Vec::new();
        }

        let watched: HashSet<String> = recent_titles
            .iter()
            .map(|title| title.as_ref().to_lowercase())
            .collect();

        let mut scored: Vec<ScoredMovie> = collection
            .iter()
            .filter(|movie| !watched.contains(&movie.title_key()))
            .map(|movie| self.score_candidate(movie, &seeds))
            .collect();

        // sort_by is stable, so equal scores keep collection order
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(k);

        debug!("Returning {} recommendations", scored.len());
        scored
    }

    /// Recommendations with at most `max_per_genre` per genre in the strict pass.
    ///
    /// Ranks `k * diversity_pool_factor` candidates first so the cap has
    /// enough material to work with, then diversifies and keeps `k`.
    #[instrument(skip_all, fields(k = k, max_per_genre = max_per_genre))]
    pub fn recommend_diverse<S: AsRef<str>>(
        &self,
        recent_titles: &[S],
        collection: &[Movie],
        k: usize,
        max_per_genre: usize,
    ) -> Vec<ScoredMovie> {
        let pool_size = k.saturating_mul(self.config.diversity_pool_factor);
        let pool = self.recommend(recent_titles, collection, pool_size);

        let pipeline = RerankPipeline::new().add_stage(GenreDiversityReranker::new(max_per_genre));
        let mut diversified = pipeline.apply(pool);
        diversified.truncate(k);
        diversified
    }

    fn score_candidate(&self, movie: &Movie, seeds: &[Seed<'_>]) -> ScoredMovie {
        let genre = movie.genre.keys();
        let tags = movie.tags.keys();

        let mut sum = 0.0;
        let mut best: Option<BestSeed<'_>> = None;
        for seed in seeds {
            let genre_match = jaccard_keys(&genre, &seed.genre);
            let tag_match = jaccard_keys(&tags, &seed.tags);
            let partial = self.config.genre_weight * genre_match + self.config.tag_weight * tag_match;

            // Strictly greater: a zero partial never becomes the explanation
            if partial > best.map_or(0.0, |b| b.partial) {
                best = Some(BestSeed {
                    title: seed.title,
                    genre_match,
                    tag_match,
                    partial,
                });
            }
            sum += partial;
        }

        let rating_bonus = (movie.clamped_rating() / MAX_RATING) * self.config.rating_weight;
        let score = sum / seeds.len() as f32 + rating_bonus;

        let explanation = match best {
            Some(best) => Explanation::BecauseYouWatched {
                seed_title: best.title.to_string(),
                genre_match: best.genre_match,
                tag_match: best.tag_match,
            },
            None => Explanation::SimilarToRecentWatches,
        };

        ScoredMovie {
            movie: movie.clone(),
            score,
            explanation,
        }
    }
}

/// Map history titles to seeds, keeping history order.
///
/// When several movies share a title the last one in the collection wins.
fn resolve_seeds<'a, S: AsRef<str>>(recent_titles: &[S], collection: &'a [Movie]) -> Vec<Seed<'a>> {
    let by_title: HashMap<String, &Movie> = collection
        .iter()
        .map(|movie| (movie.title_key(), movie))
        .collect();

    recent_titles
        .iter()
        .filter_map(|title| by_title.get(&title.as_ref().to_lowercase()).copied())
        .map(|movie| Seed {
            title: &movie.title,
            genre: movie.genre.keys(),
            tags: movie.tags.keys(),
        })
        .collect()
}
