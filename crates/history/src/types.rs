use catalog::Movie;
use serde::{Deserialize, Serialize};

/// One watch event: a title, plus the catalog id when it is known
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl HistoryEntry {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

impl From<&str> for HistoryEntry {
    fn from(title: &str) -> Self {
        Self::new(title)
    }
}

impl From<String> for HistoryEntry {
    fn from(title: String) -> Self {
        Self::new(title)
    }
}

impl From<&Movie> for HistoryEntry {
    fn from(movie: &Movie) -> Self {
        Self::new(movie.title.clone()).with_id(movie.id.clone())
    }
}

/// Persisted element shape. Older payloads hold bare title strings.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum StoredEntry {
    Entry(HistoryEntry),
    Title(String),
}

impl From<StoredEntry> for HistoryEntry {
    fn from(stored: StoredEntry) -> Self {
        match stored {
            StoredEntry::Entry(entry) => entry,
            StoredEntry::Title(title) => HistoryEntry::new(title),
        }
    }
}
