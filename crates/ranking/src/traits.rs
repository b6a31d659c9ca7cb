//! Core traits for the re-ranking stages.
//!
//! A re-ranker takes an already scored, ordered list and reorders it.
//! Re-rankers never drop items: the output is a permutation of the input.

use crate::types::ScoredMovie;

/// A reordering stage applied after scoring.
///
/// `Send + Sync` so a pipeline can be shared by an orchestrator behind a reference.
pub trait Reranker: Send + Sync {
    /// Returns the name of this stage (for logging)
    fn name(&self) -> &str;

    /// Reorder `items`, taking ownership to avoid cloning
    fn apply(&self, items: Vec<ScoredMovie>) -> Vec<ScoredMovie>;
}
