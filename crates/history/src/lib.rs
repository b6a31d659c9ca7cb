//! # History Crate
//!
//! Per-device watch history for the movie explorer.
//!
//! ## Components
//!
//! - **store**: `KeyValueStore`, the injected persistence primitive, with
//!   `MemoryStore` and `FileStore` implementations
//! - **history**: `HistoryStore`, the bounded move-to-front recency list
//! - **types**: `HistoryEntry`
//!
//! ## Example Usage
//!
//! ```ignore
//! use history::{FileStore, HistoryStore};
//!
//! let mut history = HistoryStore::new(FileStore::new(".movie-explorer"));
//! history.push("Inception");
//! let recent = history.read(5); // newest first
//! ```

pub mod error;
pub mod history;
pub mod store;
pub mod types;

pub use error::{HistoryError, Result};
pub use history::{DEFAULT_MAX_ENTRIES, HISTORY_KEY, HistoryStore};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use types::HistoryEntry;

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Movie;

    #[test]
    fn test_file_backed_history_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let mut history = HistoryStore::new(FileStore::new(dir.path()));
        history.push(&Movie::new("inception", "Inception"));
        history.push("Titanic");
        drop(history);

        let reopened = HistoryStore::new(FileStore::new(dir.path()));
        assert_eq!(reopened.read(DEFAULT_MAX_ENTRIES), vec!["Titanic", "Inception"]);
        assert_eq!(reopened.entries()[1].id.as_deref(), Some("inception"));
    }
}
