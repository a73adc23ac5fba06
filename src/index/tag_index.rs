//! Tag index, mapping each tag to the ordered entry IDs carrying it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Maps each tag to an insertion-ordered, duplicate-free list of entry IDs.
///
/// References may go stale when entries are removed in bulk (namespace
/// removal, garbage collection). Readers must check every ID against the
/// record store; [`TagIndex::prune`] drops stale references.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagIndex {
    #[serde(default)]
    tags: BTreeMap<String, Vec<String>>,
}

impl TagIndex {
    /// Create a new, empty tag index.
    pub fn new() -> Self {
        Self {
            tags: BTreeMap::new(),
        }
    }

    /// Get all entry IDs under a tag.
    pub fn get(&self, tag: &str) -> &[String] {
        self.tags.get(tag).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Append `id` under each tag, skipping tags that already list it.
    pub fn add<S: AsRef<str>>(&mut self, id: &str, tags: &[S]) {
        for tag in tags {
            let list = self.tags.entry(tag.as_ref().to_string()).or_default();
            if !list.iter().any(|existing| existing == id) {
                list.push(id.to_string());
            }
        }
    }

    /// Remove `id` from every tag list, dropping tags left empty.
    /// Returns whether any reference was removed.
    pub fn remove_id(&mut self, id: &str) -> bool {
        let mut removed = false;
        self.tags.retain(|_, list| {
            let before = list.len();
            list.retain(|existing| existing != id);
            removed |= list.len() != before;
            !list.is_empty()
        });
        removed
    }

    /// Keep only references for which `live(tag, id)` holds, dropping tags
    /// left empty. Returns the number of references removed.
    pub fn prune<F>(&mut self, mut live: F) -> usize
    where
        F: FnMut(&str, &str) -> bool,
    {
        let mut pruned = 0;
        self.tags.retain(|tag, list| {
            let before = list.len();
            list.retain(|id| live(tag.as_str(), id.as_str()));
            pruned += before - list.len();
            !list.is_empty()
        });
        pruned
    }

    /// Number of distinct tags.
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// Number of references across all tags.
    pub fn len(&self) -> usize {
        self.tags.values().map(|v| v.len()).sum()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Get a reference to the underlying map.
    pub fn inner(&self) -> &BTreeMap<String, Vec<String>> {
        &self.tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_duplicate_free_and_ordered() {
        let mut index = TagIndex::new();
        index.add("b", &["t"]);
        index.add("a", &["t"]);
        index.add("b", &["t"]);
        assert_eq!(index.get("t"), &["b".to_string(), "a".to_string()]);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn remove_id_drops_empty_tags() {
        let mut index = TagIndex::new();
        index.add("x", &["a", "b"]);
        index.add("y", &["b"]);

        assert!(index.remove_id("x"));
        assert!(index.get("a").is_empty());
        assert_eq!(index.tag_count(), 1);
        assert_eq!(index.get("b"), &["y".to_string()]);
        assert!(!index.remove_id("x"));
    }

    #[test]
    fn prune_keeps_live_references() {
        let mut index = TagIndex::new();
        index.add("x", &["a"]);
        index.add("y", &["a", "b"]);

        let pruned = index.prune(|_, id| id == "y");
        assert_eq!(pruned, 1);
        assert_eq!(index.get("a"), &["y".to_string()]);
        assert_eq!(index.get("b"), &["y".to_string()]);
    }

    #[test]
    fn missing_tag_is_empty() {
        let index = TagIndex::new();
        assert!(index.get("nope").is_empty());
        assert!(index.is_empty());
    }
}
