//! High-level operations: the memory engine and its reports.

pub mod memory;
pub mod stats;

pub use memory::MemoryEngine;
pub use stats::MemoryStats;
