//! The memory engine. Remembers, recalls, forgets and collects expired entries.
//!
//! Every operation reloads the files it needs, mutates them in memory and
//! writes them back whole. Nothing is cached between calls, and nothing
//! arbitrates between processes: concurrent writers race and the last
//! whole-file write wins.

use std::path::Path;
use std::time::Duration;

use crate::config::{MemoryConfig, StorePaths};
use crate::format::{StoreReader, StoreWriter};
use crate::index::TagIndex;
use crate::store::Store;
use crate::types::{entry_id, now_secs, MemResult, MemoryEntry, MemoryValue, Timestamp};

use super::stats::MemoryStats;

type Clock = Box<dyn Fn() -> Timestamp + Send + Sync>;

/// Handle on one project's memory files.
pub struct MemoryEngine {
    paths: StorePaths,
    clock: Clock,
}

impl MemoryEngine {
    /// Create an engine over already-resolved paths.
    pub fn new(paths: StorePaths) -> Self {
        Self {
            paths,
            clock: Box::new(now_secs),
        }
    }

    /// Create an engine for the project containing `start`, honouring any
    /// config file found there.
    pub fn open(start: &Path) -> Self {
        let config = MemoryConfig::load_or_default(start);
        Self::new(config.resolve(start))
    }

    /// Replace the time source.
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> Timestamp + Send + Sync + 'static,
    {
        self.clock = Box::new(clock);
        self
    }

    /// The files this engine reads and writes.
    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    fn now(&self) -> Timestamp {
        (self.clock)()
    }

    fn load_store(&self) -> Store {
        StoreReader::read_store(self.paths.store_file())
    }

    fn save_store(&self, store: &Store) -> MemResult<()> {
        StoreWriter::write_store(store, self.paths.store_file())
    }

    fn load_index(&self) -> TagIndex {
        StoreReader::read_index(self.paths.index_file())
    }

    fn save_index(&self, index: &TagIndex) -> MemResult<()> {
        StoreWriter::write_index(index, self.paths.index_file())
    }

    /// Store `value` under `(namespace, key)`, overwriting any previous value.
    ///
    /// An overwrite keeps the entry's `created_at` and `access_count`; tags
    /// are replaced, not merged. With a TTL the entry expires `ttl` after
    /// this write (a zero TTL produces an already-expired entry).
    pub fn remember<S: AsRef<str>>(
        &self,
        namespace: &str,
        key: &str,
        value: MemoryValue,
        tags: &[S],
        ttl: Option<Duration>,
    ) -> MemResult<MemoryEntry> {
        let now = self.now();
        let mut store = self.load_store();

        let mut entry = MemoryEntry::new(namespace, key, value, now);
        if let Some(previous) = store.get(&entry.id) {
            entry.created_at = previous.created_at;
            entry.access_count = previous.access_count;
            entry.last_accessed = previous.last_accessed;
        }
        for tag in tags {
            let tag = tag.as_ref();
            if !entry.has_tag(tag) {
                entry.tags.push(tag.to_string());
            }
        }
        entry.expires_at = ttl.map(|ttl| now + ttl.as_secs_f64());

        store.insert(entry.clone());
        store.record_write(now);
        self.save_store(&store)?;

        if !entry.tags.is_empty() {
            let mut index = self.load_index();
            let pruned = index.prune(|tag, id| is_live(&store, tag, id, now));
            if pruned > 0 {
                log::debug!("Pruned {} stale tag references", pruned);
            }
            index.add(&entry.id, &entry.tags);
            self.save_index(&index)?;
        }

        Ok(entry)
    }

    /// Fetch the entry for `(namespace, key)`, counting the access.
    ///
    /// An expired entry is deleted on the spot and reported as absent.
    pub fn recall(&self, namespace: &str, key: &str) -> MemResult<Option<MemoryEntry>> {
        let now = self.now();
        let id = entry_id(namespace, key);
        let mut store = self.load_store();

        let Some(entry) = store.get_mut(&id) else {
            return Ok(None);
        };

        if entry.is_expired_at(now) {
            let had_tags = !entry.tags.is_empty();
            store.remove(&id);
            self.save_store(&store)?;
            log::debug!("Expired entry {} removed on recall", id);

            if had_tags {
                let mut index = self.load_index();
                if index.remove_id(&id) {
                    self.save_index(&index)?;
                }
            }
            return Ok(None);
        }

        entry.access_count += 1;
        entry.last_accessed = Some(now);
        let recalled = entry.clone();
        self.save_store(&store)?;
        Ok(Some(recalled))
    }

    /// All live entries carrying `tag`, in index order.
    ///
    /// Read-only: access counters are untouched and expired entries are
    /// skipped, not deleted. Stale index references are ignored.
    pub fn recall_by_tag(&self, tag: &str) -> Vec<MemoryEntry> {
        let now = self.now();
        let index = self.load_index();
        let ids = index.get(tag);
        if ids.is_empty() {
            return Vec::new();
        }

        let store = self.load_store();
        ids.iter()
            .filter(|id| is_live(&store, tag, id, now))
            .filter_map(|id| store.get(id).cloned())
            .collect()
    }

    /// All live entries in `namespace`, oldest first. Read-only.
    pub fn recall_namespace(&self, namespace: &str) -> Vec<MemoryEntry> {
        let now = self.now();
        let store = self.load_store();
        let mut entries: Vec<MemoryEntry> = store
            .entries()
            .filter(|e| e.namespace == namespace && !e.is_expired_at(now))
            .cloned()
            .collect();
        entries.sort_by(|a, b| {
            a.created_at
                .total_cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        entries
    }

    /// Delete the entry for `(namespace, key)` and its tag references.
    /// Returns whether an entry existed.
    pub fn forget(&self, namespace: &str, key: &str) -> MemResult<bool> {
        let now = self.now();
        let id = entry_id(namespace, key);
        let mut store = self.load_store();

        if store.remove(&id).is_none() {
            return Ok(false);
        }
        self.save_store(&store)?;

        let mut index = self.load_index();
        index.remove_id(&id);
        index.prune(|tag, id| is_live(&store, tag, id, now));
        self.save_index(&index)?;
        Ok(true)
    }

    /// Delete every entry in `namespace`. Returns the number removed.
    ///
    /// The tag index is left as is; its references to removed entries are
    /// filtered on lookup and pruned by the next `remember` or `forget`.
    pub fn forget_namespace(&self, namespace: &str) -> MemResult<usize> {
        let mut store = self.load_store();
        let removed = store.remove_where(|e| e.namespace == namespace);
        if !removed.is_empty() {
            self.save_store(&store)?;
        }
        Ok(removed.len())
    }

    /// Delete every expired entry. Returns the number removed.
    ///
    /// The store is only rewritten when something was removed. Like
    /// `forget_namespace`, this leaves the tag index alone.
    pub fn gc_expired(&self) -> MemResult<usize> {
        let now = self.now();
        let mut store = self.load_store();
        let removed = store.remove_where(|e| e.is_expired_at(now));
        if !removed.is_empty() {
            store.record_gc(now);
            self.save_store(&store)?;
            log::info!("Garbage collected {} expired entries", removed.len());
        }
        Ok(removed.len())
    }

    /// Counts and timestamps describing the store. Read-only.
    pub fn memory_stats(&self) -> MemoryStats {
        let store = self.load_store();
        let index = self.load_index();
        MemoryStats {
            total_entries: store.len(),
            namespaces: store.namespace_histogram(),
            tag_count: index.tag_count(),
            memory_file: self.paths.store_file().to_path_buf(),
            index_file: self.paths.index_file().to_path_buf(),
            last_write: store.meta().last_write,
            last_gc: store.meta().last_gc,
        }
    }

    /// The whole store as currently on disk. Read-only.
    pub fn dump_all(&self) -> Store {
        self.load_store()
    }
}

/// Whether an index reference `tag -> id` points at a live entry still
/// carrying that tag.
fn is_live(store: &Store, tag: &str, id: &str, now: Timestamp) -> bool {
    store
        .get(id)
        .is_some_and(|e| e.has_tag(tag) && !e.is_expired_at(now))
}
