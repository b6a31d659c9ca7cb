//! Core domain types for the movie catalog.
//!
//! Records arrive from a loosely-typed document store: `genre` may be a
//! single string or a list, `rating` may be missing or a string. Everything
//! is normalized here, at deserialization time, so downstream code only
//! ever sees a [`LabelSet`] and a finite `f32`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a movie within one catalog (a document id or slug)
pub type MovieId = String;

/// Upper bound of the rating scale
pub const MAX_RATING: f32 = 10.0;

// =============================================================================
// Label sets
// =============================================================================

/// An unordered, de-duplicated set of labels (genres or tags).
///
/// Labels compare case-insensitively. The first spelling seen is kept for
/// display, and insertion order is preserved so output stays deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LabelSet(Vec<String>);

impl LabelSet {
    /// Creates an empty label set
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Builds a set from raw labels, trimming whitespace and dropping
    /// blanks and case-insensitive duplicates.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for label in labels {
            let label = label.as_ref().trim();
            if label.is_empty() {
                continue;
            }
            if seen.insert(label.to_lowercase()) {
                out.push(label.to_string());
            }
        }
        Self(out)
    }

    /// Parses form input such as `"Sci-Fi, Thriller"`
    pub fn from_comma_separated(s: &str) -> Self {
        Self::from_labels(s.split(','))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Labels in their display spelling
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Lowercased labels, the form used for every comparison
    pub fn keys(&self) -> HashSet<String> {
        self.0.iter().map(|label| label.to_lowercase()).collect()
    }

    /// Case-insensitive membership test
    pub fn contains(&self, label: &str) -> bool {
        let needle = label.trim().to_lowercase();
        self.0.iter().any(|l| l.to_lowercase() == needle)
    }
}

impl<S: AsRef<str>> FromIterator<S> for LabelSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_labels(iter)
    }
}

impl fmt::Display for LabelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

/// Every shape a label field takes in stored documents
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLabels {
    One(String),
    Many(Vec<Value>),
    Other(Value),
}

impl<'de> Deserialize<'de> for LabelSet {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<RawLabels>::deserialize(deserializer)?;
        Ok(match raw {
            // A bare string is one label, not a comma list
            Some(RawLabels::One(label)) => LabelSet::from_labels([label]),
            Some(RawLabels::Many(items)) => {
                LabelSet::from_labels(items.iter().filter_map(Value::as_str))
            }
            Some(RawLabels::Other(_)) | None => LabelSet::new(),
        })
    }
}

// =============================================================================
// Movie record
// =============================================================================

/// A movie record as owned by the external store.
///
/// Movies are immutable inputs to ranking and selection; nothing in the
/// ranking path mutates one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(default)]
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(
        default,
        deserialize_with = "lenient_year",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<i32>,
    /// Conventionally 0-10. Missing or unparseable values load as 0.
    #[serde(default, deserialize_with = "lenient_rating")]
    pub rating: f32,
    #[serde(default)]
    pub genre: LabelSet,
    #[serde(default)]
    pub tags: LabelSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
}

impl Movie {
    /// Creates a movie with no year, zero rating and empty label sets
    pub fn new(id: impl Into<MovieId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            year: None,
            rating: 0.0,
            genre: LabelSet::new(),
            tags: LabelSet::new(),
            language: None,
            poster_url: None,
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_genre<I, S>(mut self, genre: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.genre = LabelSet::from_labels(genre);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags = LabelSet::from_labels(tags);
        self
    }

    /// Rating clamped into `[0, MAX_RATING]`; non-finite values count as 0
    pub fn clamped_rating(&self) -> f32 {
        if self.rating.is_finite() {
            self.rating.clamp(0.0, MAX_RATING)
        } else {
            0.0
        }
    }

    /// Lowercased title used for case-insensitive lookups and search
    pub fn title_key(&self) -> String {
        self.title.to_lowercase()
    }
}

fn lenient_rating<'de, D>(deserializer: D) -> std::result::Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let rating = match value {
        Some(Value::Number(n)) => n.as_f64().map(|r| r as f32),
        Some(Value::String(s)) => s.trim().parse::<f32>().ok(),
        _ => None,
    };
    Ok(rating.filter(|r| r.is_finite()).unwrap_or(0.0))
}

fn lenient_year<'de, D>(deserializer: D) -> std::result::Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        Some(Value::String(s)) => s.trim().parse::<i32>().ok(),
        _ => None,
    })
}

// =============================================================================
// Query options
// =============================================================================

/// Field a catalog listing can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Title,
    Year,
    Rating,
}

/// Ordering direction for a sorted listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortField {
    /// Ascending order of two movies on this field.
    ///
    /// Titles compare case-insensitively, a missing year is below every
    /// known year, ratings compare clamped.
    pub fn compare(self, a: &Movie, b: &Movie) -> Ordering {
        match self {
            SortField::Title => a.title_key().cmp(&b.title_key()),
            SortField::Year => a.year.cmp(&b.year),
            SortField::Rating => a.clamped_rating().total_cmp(&b.clamped_rating()),
        }
    }
}

impl SortDirection {
    /// Orient an ascending ordering
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(SortField::Title),
            "year" => Ok(SortField::Year),
            "rating" => Ok(SortField::Rating),
            other => Err(format!("unknown sort field '{}'", other)),
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction '{}'", other)),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortField::Title => "title",
            SortField::Year => "year",
            SortField::Rating => "rating",
        };
        f.write_str(name)
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        })
    }
}
