//! The watch-history store.
//!
//! An ordered, most-recent-first list of watched titles, bounded in length,
//! with move-to-front semantics: pushing a title that is already present
//! removes the old entry before reinserting at the head, so titles never
//! repeat.
//!
//! Persistence problems are never the caller's problem. `push` and `clear`
//! log and carry on; `read` falls back to an empty history.

use crate::error::Result;
use crate::store::KeyValueStore;
use crate::types::{HistoryEntry, StoredEntry};
use tracing::{debug, instrument, warn};

/// Key the history list is stored under
pub const HISTORY_KEY: &str = "auralia_history_titles";

/// Default maximum number of remembered entries
pub const DEFAULT_MAX_ENTRIES: usize = 20;

/// Bounded, de-duplicated recency list over a [`KeyValueStore`]
#[derive(Debug, Clone)]
pub struct HistoryStore<S: KeyValueStore> {
    store: S,
    key: String,
    max_len: usize,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// Create a history over `store` using the default key and length
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: HISTORY_KEY.to_string(),
            max_len: DEFAULT_MAX_ENTRIES,
        }
    }

    /// Configure the maximum number of entries kept by `push` (default: 20)
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Record a watch using the configured maximum length
    pub fn push(&mut self, entry: impl Into<HistoryEntry>) {
        let max_len = self.max_len;
        self.push_bounded(entry, max_len);
    }

    /// Record a watch, keeping at most `max_len` entries.
    ///
    /// Titles match exactly (case-sensitive) for de-duplication.
    #[instrument(skip(self, entry))]
    pub fn push_bounded(&mut self, entry: impl Into<HistoryEntry>, max_len: usize) {
        let entry = entry.into();
        let title = entry.title.clone();
        match self.try_push(entry, max_len) {
            Ok(len) => debug!("Recorded watch of {:?} (history length: {})", title, len),
            Err(e) => warn!("Failed to record watch of {:?}: {}", title, e),
        }
    }

    /// Up to `limit` most recent titles, newest first.
    ///
    /// An empty, corrupted or unreadable store yields an empty list.
    pub fn read(&self, limit: usize) -> Vec<String> {
        self.entries()
            .into_iter()
            .take(limit)
            .map(|entry| entry.title)
            .collect()
    }

    /// Every stored entry, newest first
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.load().unwrap_or_else(|e| {
            warn!("Failed to read history: {}", e);
            Vec::new()
        })
    }

    /// Forget every entry
    pub fn clear(&mut self) {
        match self.store.remove(&self.key) {
            Ok(()) => debug!("Cleared watch history"),
            Err(e) => warn!("Failed to clear history: {}", e),
        }
    }

    /// Borrow the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    fn try_push(&mut self, entry: HistoryEntry, max_len: usize) -> Result<usize> {
        let mut entries = self.load()?;
        entries.retain(|existing| existing.title != entry.title);
        entries.insert(0, entry);
        entries.truncate(max_len);

        let payload = serde_json::to_string(&entries)?;
        self.store.set(&self.key, &payload)?;
        Ok(entries.len())
    }

    fn load(&self) -> Result<Vec<HistoryEntry>> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };
        let stored: Vec<StoredEntry> = serde_json::from_str(&raw)?;
        Ok(stored.into_iter().map(HistoryEntry::from).collect())
    }
}
