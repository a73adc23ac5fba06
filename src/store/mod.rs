//! Primary record store: entries keyed by ID plus store-wide metadata.

pub mod record_store;

pub use record_store::{Store, StoreMeta};
