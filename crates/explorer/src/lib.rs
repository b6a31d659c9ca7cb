//! Explorer crate for the movie explorer.
//!
//! This crate contains the orchestrator that sits between a presentation
//! layer and the core: it pulls the collection from a `CollectionReader`,
//! reads and writes watch history, and hands both to the ranking crate.

pub mod orchestrator;
pub mod reader;

pub use orchestrator::ExplorerOrchestrator;
pub use reader::{CatalogReader, CollectionReader, CollectionWriter, JsonCatalogReader};
