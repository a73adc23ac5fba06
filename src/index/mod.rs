//! Secondary index structures over the record store.

pub mod tag_index;

pub use tag_index::TagIndex;
