//! Collection readers: where the explorer gets its movies from.
//!
//! The orchestrator never knows the storage format. It asks a
//! [`CollectionReader`] for records and, when adding movies, a
//! [`CollectionWriter`].

use anyhow::{Context, Result};
use catalog::{Catalog, Movie, MovieDraft, MovieId, SortDirection, SortField, parser};
use std::future::Future;
use std::path::PathBuf;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Async source of movie records.
///
/// Ordering and genre filtering are delegated to the reader so a store
/// that can do them natively is free to.
pub trait CollectionReader: Send + Sync {
    /// Every record, in collection order
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Movie>>> + Send;

    /// Every record ordered by `field` (stable, missing years lowest)
    fn fetch_sorted(
        &self,
        field: SortField,
        direction: SortDirection,
    ) -> impl Future<Output = Result<Vec<Movie>>> + Send;

    /// Records whose genre set contains `genre`, case-insensitively
    fn fetch_by_genre(&self, genre: &str) -> impl Future<Output = Result<Vec<Movie>>> + Send;
}

/// The creation path: validate a draft and store the resulting record
pub trait CollectionWriter: Send + Sync {
    fn add_movie(&self, draft: MovieDraft) -> impl Future<Output = Result<MovieId>> + Send;
}

/// Reads a JSON catalog file on every call.
///
/// Re-reading keeps the reader in step with edits made by other processes.
#[derive(Debug, Clone)]
pub struct JsonCatalogReader {
    path: PathBuf,
}

impl JsonCatalogReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load(&self) -> Result<Catalog> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read catalog {}", self.path.display()))?;
        let movies = parser::parse_catalog_str(&text, &self.path.display().to_string())?;
        let catalog = Catalog::from_movies(movies)?;
        debug!("Read {} movies from {}", catalog.len(), self.path.display());
        Ok(catalog)
    }

    /// A missing file is an empty catalog when adding the first movie
    async fn load_or_empty(&self) -> Result<Catalog> {
        if tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            self.load().await
        } else {
            Ok(Catalog::new())
        }
    }
}

impl CollectionReader for JsonCatalogReader {
    async fn fetch_all(&self) -> Result<Vec<Movie>> {
        let catalog = self.load().await?;
        Ok(catalog.movies().to_vec())
    }

    async fn fetch_sorted(&self, field: SortField, direction: SortDirection) -> Result<Vec<Movie>> {
        let catalog = self.load().await?;
        Ok(catalog.sorted(field, direction).into_iter().cloned().collect())
    }

    async fn fetch_by_genre(&self, genre: &str) -> Result<Vec<Movie>> {
        let catalog = self.load().await?;
        Ok(catalog.by_genre(genre).into_iter().cloned().collect())
    }
}

impl CollectionWriter for JsonCatalogReader {
    async fn add_movie(&self, draft: MovieDraft) -> Result<MovieId> {
        let mut catalog = self.load_or_empty().await?;
        let id = catalog.add(draft)?;

        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || catalog.save_to_file(&path))
            .await
            .context("Catalog writer task failed")?
            .with_context(|| format!("Failed to write catalog {}", self.path.display()))?;

        info!("Stored movie {} in {}", id, self.path.display());
        Ok(id)
    }
}

/// Serves an in-memory [`Catalog`]
#[derive(Debug, Default)]
pub struct CatalogReader {
    catalog: RwLock<Catalog>,
}

impl CatalogReader {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: RwLock::new(catalog),
        }
    }

    /// Convenience for tests and tools: index `movies` directly
    pub fn from_movies(movies: Vec<Movie>) -> Result<Self> {
        Ok(Self::new(Catalog::from_movies(movies)?))
    }

    pub async fn len(&self) -> usize {
        self.catalog.read().await.len()
    }
}

impl CollectionReader for CatalogReader {
    async fn fetch_all(&self) -> Result<Vec<Movie>> {
        Ok(self.catalog.read().await.movies().to_vec())
    }

    async fn fetch_sorted(&self, field: SortField, direction: SortDirection) -> Result<Vec<Movie>> {
        let catalog = self.catalog.read().await;
        Ok(catalog.sorted(field, direction).into_iter().cloned().collect())
    }

    async fn fetch_by_genre(&self, genre: &str) -> Result<Vec<Movie>> {
        let catalog = self.catalog.read().await;
        Ok(catalog.by_genre(genre).into_iter().cloned().collect())
    }
}

impl CollectionWriter for CatalogReader {
    async fn add_movie(&self, draft: MovieDraft) -> Result<MovieId> {
        let id = self.catalog.write().await.add(draft)?;
        Ok(id)
    }
}
