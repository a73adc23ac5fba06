//! All data types for the nika-memory library.

pub mod entry;
pub mod error;

pub use entry::{entry_id, MemoryEntry, MemoryValue};
pub use error::{MemError, MemResult};

/// Current store file format version.
pub const STORE_VERSION: u32 = 1;

/// Number of hex characters kept from the SHA-256 digest of `namespace:key`.
pub const ENTRY_ID_LEN: usize = 16;

/// Unix epoch seconds with sub-second precision.
pub type Timestamp = f64;

/// Returns the current time as Unix epoch seconds.
pub fn now_secs() -> Timestamp {
    chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
