//! Parser for JSON catalog documents.
//!
//! Two document shapes are accepted:
//! - an array of movie records: `[{"id": "inception", "title": "Inception", ...}]`
//! - an object keyed by document id: `{"inception": {"title": "Inception", ...}}`
//!
//! In the keyed form the key becomes the movie id unless the record carries
//! its own. Records without any id get a slug derived from title and year.

use crate::draft::slugify;
use crate::error::{CatalogError, Result};
use crate::types::Movie;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Parse a catalog file from disk
pub fn parse_catalog(path: &Path) -> Result<Vec<Movie>> {
    if !path.exists() {
        return Err(CatalogError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let text = fs::read_to_string(path)?;
    parse_catalog_str(&text, &path.display().to_string())
}

/// Parse a catalog document held in memory
///
/// `source_name` only appears in error messages and logs.
pub fn parse_catalog_str(text: &str, source_name: &str) -> Result<Vec<Movie>> {
    let document: Value = serde_json::from_str(text)?;

    let records: Vec<(Option<String>, Value)> = match document {
        Value::Array(items) => items.into_iter().map(|record| (None, record)).collect(),
        Value::Object(map) => map.into_iter().map(|(key, record)| (Some(key), record)).collect(),
        other => {
            return Err(CatalogError::ParseError {
                source_name: source_name.to_string(),
                reason: format!("expected an array or object of movies, found {}", kind(&other)),
            });
        }
    };

    let mut movies = Vec::with_capacity(records.len());
    for (idx, (key, record)) in records.into_iter().enumerate() {
        let record_no = idx + 1;
        if !record.is_object() {
            warn!("Skipping record {} in {}: not an object", record_no, source_name);
            continue;
        }

        let mut movie: Movie = match serde_json::from_value(record) {
            Ok(movie) => movie,
            Err(e) => {
                warn!("Skipping record {} in {}: {}", record_no, source_name, e);
                continue;
            }
        };

        movie.title = movie.title.trim().to_string();
        if movie.title.is_empty() {
            warn!("Skipping record {} in {}: missing title", record_no, source_name);
            continue;
        }

        if movie.id.trim().is_empty() {
            movie.id = key.unwrap_or_else(|| slugify(&movie.title, movie.year));
        }
        movies.push(movie);
    }

    debug!("Parsed {} movies from {}", movies.len(), source_name);
    Ok(movies)
}

/// Write movies back out as a pretty-printed JSON array
pub fn write_catalog<'a, I>(path: &Path, movies: I) -> Result<()>
where
    I: IntoIterator<Item = &'a Movie>,
{
    let movies: Vec<&Movie> = movies.into_iter().collect();
    let text = serde_json::to_string_pretty(&movies)?;
    fs::write(path, text)?;
    Ok(())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_array_document() {
        let text = r#"[
            {"id": "inception", "title": "Inception", "genre": ["Sci-Fi"], "tags": ["dream"], "rating": 8.8},
            {"title": "Titanic", "genre": "Romance", "rating": 7.8, "year": 1997}
        ]"#;
        let movies = parse_catalog_str(text, "test").unwrap();

        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].id, "inception");
        assert_eq!(movies[1].id, "titanic-1997");
        assert!(movies[1].genre.contains("romance"));
    }

    #[test]
    fn test_parse_keyed_document_keeps_order() {
        let text = r#"{
            "parasite": {"title": "Parasite", "genre": "Thriller", "rating": 8.6},
            "avatar": {"title": "Avatar", "genre": "Fantasy", "rating": 7.9}
        }"#;
        let movies = parse_catalog_str(text, "seed").unwrap();

        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].id, "parasite");
        assert_eq!(movies[1].id, "avatar");
    }

    #[test]
    fn test_untitled_records_are_skipped() {
        let text = r#"[{"id": "x"}, 42, {"title": "  Joker "}]"#;
        let movies = parse_catalog_str(text, "test").unwrap();

        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "Joker");
    }

    #[test]
    fn test_malformed_record_is_skipped() {
        let text = r#"[
            {"id": "inception", "title": "Inception", "genre": ["Sci-Fi"], "rating": 8.8},
            {"id": 42, "title": "Titanic"},
            {"id": "heat", "title": null},
            {"id": "a", "title": "A", "posterUrl": 3},
            {"id": "up", "title": "Up", "rating": "8.3"}
        ]"#;
        let movies = parse_catalog_str(text, "test").unwrap();

        let ids: Vec<&str> = movies.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["inception", "up"]);
    }

    #[test]
    fn test_wrong_document_shape() {
        let err = parse_catalog_str("\"movies\"", "test").unwrap_err();
        assert!(matches!(err, CatalogError::ParseError { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = parse_catalog(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, CatalogError::FileNotFound { .. }));
    }

    #[test]
    fn test_write_then_parse_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.json");
        let movies = vec![Movie::new("gladiator-2000", "Gladiator").with_year(2000).with_rating(8.5)];

        write_catalog(&path, &movies).unwrap();
        let loaded = parse_catalog(&path).unwrap();

        assert_eq!(loaded, movies);
    }
}
