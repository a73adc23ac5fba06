//! Store statistics report.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::types::Timestamp;

/// Snapshot of the store, as returned by `MemoryEngine::memory_stats`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryStats {
    /// Number of entries on disk, expired or not.
    pub total_entries: usize,
    /// Entry count per namespace.
    pub namespaces: BTreeMap<String, usize>,
    /// Number of distinct tags in the index, stale references included.
    pub tag_count: usize,
    /// Location of the primary store file.
    pub memory_file: PathBuf,
    /// Location of the tag index file.
    pub index_file: PathBuf,
    /// Time of the latest write.
    pub last_write: Option<Timestamp>,
    /// Time of the latest garbage collection that removed something.
    pub last_gc: Option<Timestamp>,
}

impl MemoryStats {
    /// Entry count for one namespace.
    pub fn namespace_count(&self, namespace: &str) -> usize {
        self.namespaces.get(namespace).copied().unwrap_or(0)
    }
}
