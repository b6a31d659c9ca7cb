//! # Explorer Orchestrator
//!
//! Ties the collection reader, the watch history and the ranking crate
//! together behind the operations a presentation layer calls:
//! 1. Read recent titles from history
//! 2. Fetch the collection from the reader
//! 3. Rank (optionally diversify) and return the top `k`
//!
//! Only collection retrieval and history persistence touch I/O. Scoring,
//! diversification, top-K and prefix search run synchronously once the
//! collection is in hand.
//!
//! Reader failures are logged and treated as an empty collection, so
//! recommendation and selection calls never fail.

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, instrument, warn};

use catalog::{Movie, MovieDraft, MovieId, SortDirection, SortField};
use history::{HistoryEntry, HistoryStore, KeyValueStore};
use ranking::{RankingConfig, Recommender, ScoredMovie, prefix_search, top_k_by_rating};

use crate::reader::{CollectionReader, CollectionWriter};

/// Coordinates reader, history and ranking
pub struct ExplorerOrchestrator<R, S: KeyValueStore> {
    reader: R,
    history: HistoryStore<S>,
    recommender: Recommender,
}

impl<R: CollectionReader, S: KeyValueStore> ExplorerOrchestrator<R, S> {
    /// Create an orchestrator, rejecting an invalid ranking configuration
    pub fn new(reader: R, history: HistoryStore<S>, config: RankingConfig) -> Result<Self> {
        config.validate().context("Invalid ranking configuration")?;
        Ok(Self {
            reader,
            history,
            recommender: Recommender::new(config),
        })
    }

    pub fn config(&self) -> &RankingConfig {
        self.recommender.config()
    }

    /// The full collection, propagating reader errors
    pub async fn collection(&self) -> Result<Vec<Movie>> {
        self.reader.fetch_all().await
    }

    /// Top `k` recommendations seeded by the `history_limit` most recent watches
    #[instrument(skip(self))]
    pub async fn recommend(&self, k: usize, history_limit: usize) -> Vec<ScoredMovie> {
        let start_time = Instant::now();

        let recent = self.history.read(history_limit);
        if recent.is_empty() {
            debug!("No watch history, skipping collection fetch");
            return Vec::new();
        }

        let collection = self.fetch_all_or_empty().await;
        let recommendations = self.recommender.recommend(&recent, &collection, k);

        info!(
            "Recommended {} of {} movies from {} recent watches in {:.2?}",
            recommendations.len(),
            collection.len(),
            recent.len(),
            start_time.elapsed()
        );
        recommendations
    }

    /// Genre-diversified recommendations, seeded by the configured history limit
    #[instrument(skip(self))]
    pub async fn recommend_diverse(&self, k: usize, max_per_genre: usize) -> Vec<ScoredMovie> {
        let recent = self.history.read(self.config().history_limit);
        if recent.is_empty() {
            debug!("No watch history, skipping collection fetch");
            return Vec::new();
        }

        let collection = self.fetch_all_or_empty().await;
        let recommendations =
            self.recommender
                .recommend_diverse(&recent, &collection, k, max_per_genre);
        info!(
            "Recommended {} diverse movies (max {} per genre)",
            recommendations.len(),
            max_per_genre
        );
        recommendations
    }

    /// Rank an already fetched collection against current history
    pub fn recommend_from(
        &self,
        collection: &[Movie],
        k: usize,
        history_limit: usize,
    ) -> Vec<ScoredMovie> {
        let recent = self.history.read(history_limit);
        self.recommender.recommend(&recent, collection, k)
    }

    /// The `k` highest-rated movies, best first
    pub async fn top_k(&self, k: usize) -> Vec<Movie> {
        let collection = self.fetch_all_or_empty().await;
        top_k_by_rating(&collection, k).into_iter().cloned().collect()
    }

    /// Movies whose title starts with `query`, in title order
    pub async fn prefix_search(&self, query: &str) -> Vec<Movie> {
        let collection = self.fetch_all_or_empty().await;
        prefix_search(&collection, query).into_iter().cloned().collect()
    }

    /// The collection ordered by the reader
    pub async fn browse(&self, field: SortField, direction: SortDirection) -> Vec<Movie> {
        self.reader
            .fetch_sorted(field, direction)
            .await
            .unwrap_or_else(|e| {
                warn!("Failed to fetch sorted collection: {:#}", e);
                Vec::new()
            })
    }

    /// Movies in one genre, as filtered by the reader
    pub async fn by_genre(&self, genre: &str) -> Vec<Movie> {
        self.reader.fetch_by_genre(genre).await.unwrap_or_else(|e| {
            warn!("Failed to fetch genre {:?}: {:#}", genre, e);
            Vec::new()
        })
    }

    /// Record a watch
    pub fn push_history(&mut self, entry: impl Into<HistoryEntry>) {
        self.history.push(entry);
    }

    /// Look `title` up in the collection and record it as watched.
    ///
    /// Returns the matched movie, or `None` (and records nothing) when no
    /// title matches case-insensitively.
    pub async fn watch(&mut self, title: &str) -> Option<Movie> {
        let needle = title.trim().to_lowercase();
        let collection = self.fetch_all_or_empty().await;
        // Last match wins, like title resolution during ranking
        let movie = collection
            .into_iter()
            .rev()
            .find(|movie| movie.title_key() == needle)?;
        self.history.push(&movie);
        Some(movie)
    }

    /// Up to `limit` recent titles, newest first
    pub fn read_history(&self, limit: usize) -> Vec<String> {
        self.history.read(limit)
    }

    pub fn history_entries(&self) -> Vec<HistoryEntry> {
        self.history.entries()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    async fn fetch_all_or_empty(&self) -> Vec<Movie> {
        match self.reader.fetch_all().await {
            Ok(movies) => {
                debug!("Fetched {} movies", movies.len());
                movies
            }
            Err(e) => {
                warn!("Failed to fetch collection: {:#}", e);
                Vec::new()
            }
        }
    }
}

impl<R: CollectionReader + CollectionWriter, S: KeyValueStore> ExplorerOrchestrator<R, S> {
    /// Validate and store a new movie; validation errors are returned, never dropped
    pub async fn add_movie(&self, draft: MovieDraft) -> Result<MovieId> {
        let title = draft.title.trim().to_string();
        let id = self
            .reader
            .add_movie(draft)
            .await
            .with_context(|| format!("Failed to add movie {:?}", title))?;
        info!("Added movie {} ({})", title, id);
        Ok(id)
    }
}
