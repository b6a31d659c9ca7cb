//! Ranking for movie exploration.
//!
//! This crate provides:
//! - Jaccard similarity over normalized label sets
//! - `Recommender`, history-seeded content scoring with explanations
//! - `RerankPipeline` and the genre diversity re-ranker
//! - Selection primitives: bounded top-K by rating and title prefix search
//!
//! Everything here is synchronous and deterministic. Persistence and
//! collection retrieval live in other crates.
//!
//! ## Example Usage
//! ```ignore
//! use ranking::{Recommender, RankingConfig, top_k_by_rating};
//!
//! let recommender = Recommender::new(RankingConfig::default());
//! let picks = recommender.recommend(&["Inception"], &movies, 10);
//! for pick in &picks {
//!     println!("{} ({:.3}) {}", pick.title(), pick.score, pick.explanation);
//! }
//!
//! let best = top_k_by_rating(&movies, 5);
//! ```

pub mod config;
pub mod diversity;
pub mod recommender;
pub mod rerank_pipeline;
pub mod selection;
pub mod similarity;
pub mod traits;
pub mod types;

// Re-export main types
pub use config::RankingConfig;
pub use diversity::{GenreDiversityReranker, diversify, strict_pass};
pub use recommender::Recommender;
pub use rerank_pipeline::RerankPipeline;
pub use selection::{prefix_search, sort_by_rating, top_k_by_rating};
pub use similarity::{jaccard, jaccard_keys};
pub use traits::Reranker;
pub use types::{Explanation, HasGenres, ScoredMovie};
