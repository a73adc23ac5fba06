//! JSON file I/O for the store and tag index files.

pub mod reader;
pub mod writer;

pub use reader::StoreReader;
pub use writer::StoreWriter;
