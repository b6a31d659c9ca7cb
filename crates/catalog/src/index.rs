//! The in-memory `Catalog` and its lookup indices.
//!
//! The catalog keeps movies in collection order (the order they were
//! loaded or added). That order is observable: ranking breaks score ties
//! by it, so indices store positions into `movies` rather than copies.

use crate::draft::MovieDraft;
use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::{Movie, MovieId, SortDirection, SortField};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Movies plus id, title and genre lookups
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Vec<Movie>,
    /// id -> position in `movies`
    by_id: HashMap<MovieId, usize>,
    /// lowercased title -> position; the last record with a title wins
    by_title: HashMap<String, usize>,
    /// lowercased genre -> positions, in collection order
    genre_index: HashMap<String, Vec<usize>>,
}

impl Catalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and index a JSON catalog file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let movies = parser::parse_catalog(path)?;
        let catalog = Self::from_movies(movies)?;
        info!("Loaded {} movies from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Build a catalog from records, rejecting duplicate ids
    pub fn from_movies(movies: Vec<Movie>) -> Result<Self> {
        let mut catalog = Self::new();
        for movie in movies {
            if catalog.by_id.contains_key(&movie.id) {
                return Err(CatalogError::DuplicateId { id: movie.id });
            }
            catalog.insert_movie(movie);
        }
        Ok(catalog)
    }

    /// Persist the catalog as a JSON array
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        parser::write_catalog(path, &self.movies)
    }

    /// Insert a movie, replacing any existing record with the same id in place
    pub fn insert_movie(&mut self, movie: Movie) {
        match self.by_id.get(&movie.id).copied() {
            Some(pos) => {
                self.movies[pos] = movie;
                self.rebuild_indices();
            }
            None => {
                let pos = self.movies.len();
                self.index_movie(pos, &movie);
                self.movies.push(movie);
            }
        }
    }

    /// Validate a draft and insert the resulting movie.
    ///
    /// Returns the stored id so callers can report what was written.
    pub fn add(&mut self, draft: MovieDraft) -> Result<MovieId> {
        let movie = draft.into_movie()?;
        let id = movie.id.clone();
        self.insert_movie(movie);
        Ok(id)
    }

    /// All movies in collection order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn get_movie(&self, id: &str) -> Option<&Movie> {
        self.by_id.get(id).map(|&pos| &self.movies[pos])
    }

    /// Case-insensitive exact title lookup
    pub fn find_by_title(&self, title: &str) -> Option<&Movie> {
        self.by_title
            .get(&title.to_lowercase())
            .map(|&pos| &self.movies[pos])
    }

    /// Movies carrying `genre` (case-insensitive), in collection order
    pub fn by_genre(&self, genre: &str) -> Vec<&Movie> {
        self.genre_index
            .get(&genre.trim().to_lowercase())
            .map(|positions| positions.iter().map(|&pos| &self.movies[pos]).collect())
            .unwrap_or_default()
    }

    /// Movies ordered by one field.
    ///
    /// The sort is stable. Titles compare case-insensitively and a missing
    /// year sorts below every known year.
    pub fn sorted(&self, field: SortField, direction: SortDirection) -> Vec<&Movie> {
        let mut movies: Vec<&Movie> = self.movies.iter().collect();
        movies.sort_by(|a, b| direction.apply(field.compare(a, b)));
        movies
    }

    /// Distinct genres in first-seen order, display spelling
    pub fn genres(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.movies
            .iter()
            .flat_map(|movie| movie.genre.iter())
            .filter(|genre| seen.insert(genre.to_lowercase()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    fn index_movie(&mut self, pos: usize, movie: &Movie) {
        self.by_id.insert(movie.id.clone(), pos);
        self.by_title.insert(movie.title_key(), pos);
        for genre in movie.genre.keys() {
            self.genre_index.entry(genre).or_default().push(pos);
        }
    }

    fn rebuild_indices(&mut self) {
        self.by_id.clear();
        self.by_title.clear();
        self.genre_index.clear();
        let movies = std::mem::take(&mut self.movies);
        for (pos, movie) in movies.iter().enumerate() {
            self.index_movie(pos, movie);
        }
        self.movies = movies;
    }
}
