//! Result types produced by ranking.

use catalog::{LabelSet, Movie};
use std::fmt;

/// Why a movie was recommended
#[derive(Debug, Clone, PartialEq)]
pub enum Explanation {
    /// The watched movie whose partial score was highest, with its match ratios
    BecauseYouWatched {
        seed_title: String,
        genre_match: f32,
        tag_match: f32,
    },
    /// No seed matched at all; never point at a meaningless 0% seed
    SimilarToRecentWatches,
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Explanation::BecauseYouWatched {
                seed_title,
                genre_match,
                tag_match,
            } => write!(
                f,
                "Because you watched \"{}\" (genre {}%, tags {}%)",
                seed_title,
                percent(*genre_match),
                percent(*tag_match)
            ),
            Explanation::SimilarToRecentWatches => {
                f.write_str("Because it's similar to your recent watches.")
            }
        }
    }
}

fn percent(ratio: f32) -> u32 {
    (ratio * 100.0).round() as u32
}

/// A movie with its transient recommendation score.
///
/// Exists only while a result list is produced and presented.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMovie {
    pub movie: Movie,
    pub score: f32,
    pub explanation: Explanation,
}

impl ScoredMovie {
    pub fn title(&self) -> &str {
        &self.movie.title
    }

    /// Explanation lines for display (currently always exactly one)
    pub fn reasons(&self) -> Vec<String> {
        vec![self.explanation.to_string()]
    }
}

/// Anything that carries a genre set; lets diversity work on plain movies too
pub trait HasGenres {
    fn genres(&self) -> &LabelSet;
}

impl HasGenres for Movie {
    fn genres(&self) -> &LabelSet {
        &self.genre
    }
}

impl HasGenres for ScoredMovie {
    fn genres(&self) -> &LabelSet {
        &self.movie.genre
    }
}

impl<T: HasGenres + ?Sized> HasGenres for &T {
    fn genres(&self) -> &LabelSet {
        (**self).genres()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explanation_text() {
        let why = Explanation::BecauseYouWatched {
            seed_title: "Inception".to_string(),
            genre_match: 1.0,
            tag_match: 1.0 / 3.0,
        };
        assert_eq!(
            why.to_string(),
            "Because you watched \"Inception\" (genre 100%, tags 33%)"
        );
        assert_eq!(
            Explanation::SimilarToRecentWatches.to_string(),
            "Because it's similar to your recent watches."
        );
    }
}
