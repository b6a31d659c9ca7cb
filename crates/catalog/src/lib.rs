//! # Catalog Crate
//!
//! This crate owns the movie record model and everything needed to get
//! records in and out of a JSON catalog.
//!
//! ## Main Components
//!
//! - **types**: `Movie`, `LabelSet`, sort options
//! - **parser**: Parse and write JSON catalog documents
//! - **index**: `Catalog`, an ordered in-memory collection with lookups
//! - **draft**: The creation path (`MovieDraft` validation and slug ids)
//! - **error**: Error types for catalog operations
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{Catalog, MovieDraft};
//! use std::path::Path;
//!
//! let mut catalog = Catalog::load_from_file(Path::new("data/movies.json"))?;
//! let movie = catalog.find_by_title("inception").unwrap();
//! println!("{} is rated {}", movie.title, movie.rating);
//!
//! catalog.add(MovieDraft::new("Dune"))?;
//! ```

// Public modules
pub mod draft;
pub mod error;
pub mod index;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use draft::{MovieDraft, slugify};
pub use error::{CatalogError, Result};
pub use index::Catalog;
pub use types::{LabelSet, MAX_RATING, Movie, MovieId, SortDirection, SortField};
