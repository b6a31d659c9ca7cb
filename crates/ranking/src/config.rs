//! Tunable ranking weights and limits.

use anyhow::{Result, ensure};

/// Weights and limits used by the recommender and diversity pass
#[derive(Debug, Clone, PartialEq)]
pub struct RankingConfig {
    /// Weight of genre similarity in a seed's partial score
    pub genre_weight: f32,
    /// Weight of tag similarity in a seed's partial score
    pub tag_weight: f32,
    /// Maximum bonus a perfect rating adds; keep small so rating only breaks near-ties
    pub rating_weight: f32,
    /// Number of recent history titles used as seeds
    pub history_limit: usize,
    /// Diverse recommendations rank `k * diversity_pool_factor` candidates before capping
    pub diversity_pool_factor: usize,
    /// Default cap per genre for diverse recommendations
    pub max_per_genre: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            genre_weight: 0.6,
            tag_weight: 0.4,
            rating_weight: 0.1,
            history_limit: 5,
            diversity_pool_factor: 3,
            max_per_genre: 2,
        }
    }
}

impl RankingConfig {
    pub fn with_weights(mut self, genre_weight: f32, tag_weight: f32) -> Self {
        self.genre_weight = genre_weight;
        self.tag_weight = tag_weight;
        self
    }

    pub fn with_rating_weight(mut self, rating_weight: f32) -> Self {
        self.rating_weight = rating_weight;
        self
    }

    pub fn with_history_limit(mut self, history_limit: usize) -> Self {
        self.history_limit = history_limit;
        self
    }

    pub fn with_diversity_pool_factor(mut self, factor: usize) -> Self {
        self.diversity_pool_factor = factor;
        self
    }

    pub fn with_max_per_genre(mut self, max_per_genre: usize) -> Self {
        self.max_per_genre = max_per_genre;
        self
    }

    /// Reject weights that would make scores meaningless
    pub fn validate(&self) -> Result<()> {
        for (name, weight) in [
            ("genre_weight", self.genre_weight),
            ("tag_weight", self.tag_weight),
            ("rating_weight", self.rating_weight),
        ] {
            ensure!(
                weight.is_finite() && weight >= 0.0,
                "{} must be a finite, non-negative number (got {})",
                name,
                weight
            );
        }
        ensure!(
            self.diversity_pool_factor > 0,
            "diversity_pool_factor must be at least 1"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(RankingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_weights() {
        assert!(RankingConfig::default().with_rating_weight(-0.1).validate().is_err());
        assert!(RankingConfig::default().with_weights(f32::NAN, 0.4).validate().is_err());
        assert!(RankingConfig::default().with_diversity_pool_factor(0).validate().is_err());
    }
}
