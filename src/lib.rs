//! nika-memory: persistent, namespaced memory for agent sessions.
//!
//! Entries are stored under a `(namespace, key)` pair whose hash is the
//! entry ID, optionally tagged and optionally expiring. Two JSON files under
//! the project's `.claude/` directory hold the records and the tag index.

pub mod cli;
pub mod config;
pub mod engine;
pub mod format;
pub mod index;
pub mod store;
pub mod types;

// Re-export commonly used types at the crate root
pub use config::{find_project_root, MemoryConfig, StorePaths};
pub use engine::{MemoryEngine, MemoryStats};
pub use format::{StoreReader, StoreWriter};
pub use index::TagIndex;
pub use store::{Store, StoreMeta};
pub use types::{
    entry_id, now_secs, MemError, MemResult, MemoryEntry, MemoryValue, Timestamp, ENTRY_ID_LEN,
    STORE_VERSION,
};
