//! Error types for the catalog crate.
//!
//! Loading a catalog file, parsing records and validating new movies all
//! report through [`CatalogError`]. Malformed optional fields on a record
//! (genre, tags, rating) are not errors; they normalize to empty/zero.

use thiserror::Error;

/// Errors that can occur while loading, parsing or editing a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading or writing a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The catalog document is not valid JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The catalog document has the wrong overall shape
    #[error("Parse error in {source_name}: {reason}")]
    ParseError { source_name: String, reason: String },

    /// A field had a value that could not be interpreted
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Two records in one catalog share an identifier
    #[error("Duplicate movie id: {id}")]
    DuplicateId { id: String },

    /// User-supplied movie data failed validation
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
