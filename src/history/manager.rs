//! Recent search terms, bounded and deduplicated.
//!
//! Re-searching a term that is already in the list leaves the list as it is;
//! the term is not moved to the front.

use crate::config::HistoryConfig;
use crate::constants::history::{DEFAULT_CAPACITY, DEFAULT_KEY};
use crate::history::storage::{JsonFileStore, KeyValueStore};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::warn;

/// Applies one recorded query to `entries` (most recent first).
///
/// Returns `false` when nothing changed: the query was already present or
/// the capacity is zero.
pub fn push_recent(entries: &mut Vec<String>, query: &str, capacity: usize) -> bool {
    if capacity == 0 || entries.iter().any(|e| e == query) {
        return false;
    }

    entries.truncate(capacity - 1);
    entries.insert(0, query.to_string());
    true
}

/// Entries containing `needle`, ignoring case, in their original order.
#[must_use]
pub fn filter_entries(entries: &[String], needle: &str) -> Vec<String> {
    let needle = needle.to_lowercase();
    entries
        .iter()
        .filter(|e| e.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Persisted search history.
///
/// All methods do blocking file I/O through the store. Async callers should
/// go through `tokio::task::spawn_blocking`.
pub struct SearchHistory {
    store: Arc<dyn KeyValueStore>,
    key: String,
    capacity: usize,
    // Serializes read-modify-write cycles in `record_query`.
    write_lock: Mutex<()>,
}

impl SearchHistory {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_options(store, DEFAULT_KEY, DEFAULT_CAPACITY)
    }

    pub fn with_options(
        store: Arc<dyn KeyValueStore>,
        key: impl Into<String>,
        capacity: usize,
    ) -> Self {
        Self {
            store,
            key: key.into(),
            capacity,
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn from_config(config: &HistoryConfig) -> Self {
        Self::with_options(
            Arc::new(JsonFileStore::new(&config.path)),
            config.key.clone(),
            config.capacity,
        )
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records a search term.
    ///
    /// Known terms are ignored. Otherwise the oldest entry is dropped if the
    /// list is full and `query` goes to the front. Storage failures are logged
    /// and swallowed.
    pub fn record_query(&self, query: &str) {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut entries = self.get_history();
        if !push_recent(&mut entries, query, self.capacity) {
            return;
        }

        if let Err(e) = self.store.store_strings(&self.key, &entries) {
            warn!("Failed to save search history: {}", e);
        }
    }

    /// Full history, most recent first. Empty if nothing was recorded or the
    /// store cannot be read.
    #[must_use]
    pub fn get_history(&self) -> Vec<String> {
        match self.store.load_strings(&self.key) {
            Ok(entries) => entries.unwrap_or_default(),
            Err(e) => {
                warn!("Failed to read search history: {}", e);
                Vec::new()
            }
        }
    }

    /// Suggestions for the text typed so far.
    #[must_use]
    pub fn filter_history(&self, needle: &str) -> Vec<String> {
        filter_entries(&self.get_history(), needle)
    }
}
