//! The creation path: turning raw form input into a validated movie.
//!
//! A missing title is a hard validation error. The caller must surface it
//! rather than drop the add attempt.

use crate::error::{CatalogError, Result};
use crate::types::{LabelSet, MAX_RATING, Movie};
use std::time::{SystemTime, UNIX_EPOCH};

/// Raw, unvalidated movie input as typed into an "add movie" form
#[derive(Debug, Clone, Default)]
pub struct MovieDraft {
    pub id: Option<String>,
    pub title: String,
    pub year: Option<String>,
    pub rating: Option<String>,
    /// Comma-separated genres
    pub genre: String,
    /// Comma-separated tags
    pub tags: String,
    pub poster_url: Option<String>,
    pub language: Option<String>,
}

impl MovieDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Validate the draft and build the movie record to store.
    ///
    /// - title is trimmed and required
    /// - year must be an integer when given
    /// - rating must be numeric when given and is clamped to `[0, 10]`
    /// - the id is the explicit one, or a slug of title and year
    pub fn into_movie(self) -> Result<Movie> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(CatalogError::ValidationError("Title is required".to_string()));
        }

        let year = match non_blank(self.year.as_deref()) {
            Some(raw) => Some(raw.parse::<i32>().map_err(|_| CatalogError::InvalidValue {
                field: "year".to_string(),
                value: raw.to_string(),
            })?),
            None => None,
        };

        let rating = match non_blank(self.rating.as_deref()) {
            Some(raw) => {
                let value = raw
                    .parse::<f32>()
                    .ok()
                    .filter(|r| r.is_finite())
                    .ok_or_else(|| CatalogError::InvalidValue {
                        field: "rating".to_string(),
                        value: raw.to_string(),
                    })?;
                value.clamp(0.0, MAX_RATING)
            }
            None => 0.0,
        };

        let id = match non_blank(self.id.as_deref()) {
            Some(id) => id.to_string(),
            None => slugify(&title, year),
        };

        Ok(Movie {
            id,
            title,
            year,
            rating,
            genre: LabelSet::from_comma_separated(&self.genre),
            tags: LabelSet::from_comma_separated(&self.tags),
            language: Some(
                non_blank(self.language.as_deref())
                    .unwrap_or("Unknown")
                    .to_string(),
            ),
            poster_url: Some(
                non_blank(self.poster_url.as_deref())
                    .unwrap_or_default()
                    .to_string(),
            ),
        })
    }
}

/// Derive a document id from a title and optional year.
///
/// Example: `("The Dark Knight", Some(2008))` -> `"the-dark-knight-2008"`
pub fn slugify(title: &str, year: Option<i32>) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for ch in title.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }

    match year {
        Some(year) => format!("{}-{}", slug, year),
        None if slug.is_empty() => {
            let millis = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default();
            format!("movie-{}", millis)
        }
        None => slug,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
