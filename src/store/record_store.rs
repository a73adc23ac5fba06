//! In-memory form of the primary store file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{MemoryEntry, Timestamp, STORE_VERSION};

/// Store-wide bookkeeping, each field absent until first set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreMeta {
    /// Time of the latest `remember`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_write: Option<Timestamp>,
    /// Number of entries as of the latest mutation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_entries: Option<usize>,
    /// Time of the latest garbage collection that removed something.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_gc: Option<Timestamp>,
}

/// The primary record store: format version, entries by ID, metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    entries: BTreeMap<String, MemoryEntry>,
    #[serde(default)]
    meta: StoreMeta,
}

fn default_version() -> u32 {
    STORE_VERSION
}

impl Store {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self {
            version: STORE_VERSION,
            entries: BTreeMap::new(),
            meta: StoreMeta::default(),
        }
    }

    /// Format version recorded in the file.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Store-wide metadata.
    pub fn meta(&self) -> &StoreMeta {
        &self.meta
    }

    /// Get an entry by ID.
    pub fn get(&self, id: &str) -> Option<&MemoryEntry> {
        self.entries.get(id)
    }

    /// Get a mutable entry by ID.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut MemoryEntry> {
        self.entries.get_mut(id)
    }

    /// Whether an entry with this ID exists.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Insert or overwrite an entry, returning the previous version.
    pub fn insert(&mut self, entry: MemoryEntry) -> Option<MemoryEntry> {
        let previous = self.entries.insert(entry.id.clone(), entry);
        self.sync_count();
        previous
    }

    /// Remove an entry by ID.
    pub fn remove(&mut self, id: &str) -> Option<MemoryEntry> {
        let removed = self.entries.remove(id);
        if removed.is_some() {
            self.sync_count();
        }
        removed
    }

    /// Remove every entry matching `pred`, returning the removed entries.
    pub fn remove_where<F>(&mut self, mut pred: F) -> Vec<MemoryEntry>
    where
        F: FnMut(&MemoryEntry) -> bool,
    {
        let ids: Vec<String> = self
            .entries
            .values()
            .filter(|&e| pred(e))
            .map(|e| e.id.clone())
            .collect();
        let removed: Vec<MemoryEntry> = ids
            .iter()
            .filter_map(|id| self.entries.remove(id))
            .collect();
        if !removed.is_empty() {
            self.sync_count();
        }
        removed
    }

    /// Iterate over all entries in ID order.
    pub fn entries(&self) -> impl Iterator<Item = &MemoryEntry> {
        self.entries.values()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count entries per namespace.
    pub fn namespace_histogram(&self) -> BTreeMap<String, usize> {
        let mut histogram = BTreeMap::new();
        for entry in self.entries.values() {
            *histogram.entry(entry.namespace.clone()).or_insert(0) += 1;
        }
        histogram
    }

    /// Stamp a write at `now`.
    pub fn record_write(&mut self, now: Timestamp) {
        self.meta.last_write = Some(now);
        self.sync_count();
    }

    /// Stamp a garbage collection at `now`.
    pub fn record_gc(&mut self, now: Timestamp) {
        self.meta.last_gc = Some(now);
        self.sync_count();
    }

    fn sync_count(&mut self) {
        self.meta.total_entries = Some(self.entries.len());
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
