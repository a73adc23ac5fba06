//! The stored memory entry and its derived identifier.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{Timestamp, ENTRY_ID_LEN};

/// Payload of an entry: null, bool, number, string, sequence or mapping.
pub type MemoryValue = serde_json::Value;

/// Derive the stable entry ID for a `(namespace, key)` pair.
///
/// The ID is the first 16 hex characters of `SHA-256("namespace:key")`.
pub fn entry_id(namespace: &str, key: &str) -> String {
    let digest = Sha256::digest(format!("{}:{}", namespace, key).as_bytes());
    let mut id = hex::encode(digest);
    id.truncate(ENTRY_ID_LEN);
    id
}

/// A single remembered fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    /// Stable ID derived from namespace and key.
    pub id: String,
    /// Caller-chosen category.
    pub namespace: String,
    /// Key, unique within the namespace.
    pub key: String,
    /// Arbitrary JSON-shaped payload.
    #[serde(default)]
    pub value: MemoryValue,
    /// Labels indexed by the tag index.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Time of the first write for this ID.
    pub created_at: Timestamp,
    /// Time of the latest write.
    pub updated_at: Timestamp,
    /// Absolute expiry time, `None` for permanent entries.
    #[serde(default)]
    pub expires_at: Option<Timestamp>,
    /// Successful recalls so far.
    #[serde(default)]
    pub access_count: u64,
    /// Time of the latest successful recall.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_accessed: Option<Timestamp>,
}

impl MemoryEntry {
    /// Create a fresh entry written at `now`.
    pub fn new(
        namespace: impl Into<String>,
        key: impl Into<String>,
        value: MemoryValue,
        now: Timestamp,
    ) -> Self {
        let namespace = namespace.into();
        let key = key.into();
        Self {
            id: entry_id(&namespace, &key),
            namespace,
            key,
            value,
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
            expires_at: None,
            access_count: 0,
            last_accessed: None,
        }
    }

    /// Whether the entry has expired at `now`. An expiry equal to `now` counts.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        matches!(self.expires_at, Some(at) if at <= now)
    }

    /// Whether the entry carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
