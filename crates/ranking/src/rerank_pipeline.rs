//! Chains re-ranking stages.

use crate::traits::Reranker;
use crate::types::ScoredMovie;
use tracing::debug;

/// Runs re-rankers in insertion order.
///
/// ## Usage
/// ```ignore
/// let pipeline = RerankPipeline::new()
///     .add_stage(GenreDiversityReranker::new(2));
///
/// let reordered = pipeline.apply(scored);
/// ```
pub struct RerankPipeline {
    stages: Vec<Box<dyn Reranker>>,
}

impl RerankPipeline {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Add a stage (builder pattern)
    pub fn add_stage(mut self, stage: impl Reranker + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Apply every stage in sequence
    pub fn apply(&self, items: Vec<ScoredMovie>) -> Vec<ScoredMovie> {
        let mut current = items;
        for stage in &self.stages {
            debug!(
                "Applying re-ranker: {} (input count: {})",
                stage.name(),
                current.len()
            );
            current = stage.apply(current);
            debug!(
                "Re-ranker applied: {} (output count: {})",
                stage.name(),
                current.len()
            );
        }
        current
    }
}

impl Default for RerankPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Explanation;
    use catalog::Movie;

    struct Reverse;

    impl Reranker for Reverse {
        fn name(&self) -> &str {
            "Reverse"
        }

        fn apply(&self, mut items: Vec<ScoredMovie>) -> Vec<ScoredMovie> {
            items.reverse();
            items
        }
    }

    fn scored(id: &str) -> ScoredMovie {
        ScoredMovie {
            movie: Movie::new(id, id),
            score: 0.5,
            explanation: Explanation::SimilarToRecentWatches,
        }
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline = RerankPipeline::new();
        assert!(pipeline.is_empty());

        let out = pipeline.apply(vec![scored("a"), scored("b")]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].movie.id, "a");
    }

    #[test]
    fn test_stages_run_in_order() {
        let pipeline = RerankPipeline::new().add_stage(Reverse).add_stage(Reverse);
        assert_eq!(pipeline.len(), 2);

        let out = pipeline.apply(vec![scored("a"), scored("b")]);
        assert_eq!(out[0].movie.id, "a");
        assert_eq!(out[1].movie.id, "b");
    }

    #[test]
    fn test_single_stage() {
        let pipeline = RerankPipeline::new().add_stage(Reverse);
        let out = pipeline.apply(vec![scored("a"), scored("b")]);
        assert_eq!(out[0].movie.id, "b");
    }
}
