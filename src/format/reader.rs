//! Reads store and index files, treating damage as emptiness.

use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::index::TagIndex;
use crate::store::Store;

/// Reader for the store and tag index files.
///
/// Reads never fail: a missing file is a fresh structure, and an unreadable
/// or unparseable file is logged and replaced by a fresh structure.
pub struct StoreReader;

impl StoreReader {
    /// Read the primary store file.
    pub fn read_store(path: &Path) -> Store {
        let store: Store = read_or_default(path);
        log::debug!(
            "Loaded {} entries from {}",
            store.len(),
            path.display()
        );
        store
    }

    /// Read the tag index file.
    pub fn read_index(path: &Path) -> TagIndex {
        let index: TagIndex = read_or_default(path);
        log::debug!(
            "Loaded {} tags from {}",
            index.tag_count(),
            path.display()
        );
        index
    }

    /// Parse a store from an in-memory JSON document.
    pub fn parse_store(text: &str) -> Store {
        serde_json::from_str(text).unwrap_or_default()
    }
}

fn read_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return T::default(),
        Err(e) => {
            log::warn!("Cannot read {}: {}; using empty", path.display(), e);
            return T::default();
        }
    };

    match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Corrupt file {}: {}; using empty", path.display(), e);
            T::default()
        }
    }
}
