//! Writes store and index files as whole-file replacements.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::index::TagIndex;
use crate::store::Store;
use crate::types::MemResult;

/// Writer for the store and tag index files.
pub struct StoreWriter;

impl StoreWriter {
    /// Write the primary store file.
    pub fn write_store(store: &Store, path: &Path) -> MemResult<()> {
        write_json(store, path)?;
        log::debug!("Saved {} entries to {}", store.len(), path.display());
        Ok(())
    }

    /// Write the tag index file.
    pub fn write_index(index: &TagIndex, path: &Path) -> MemResult<()> {
        write_json(index, path)?;
        log::debug!("Saved {} tags to {}", index.tag_count(), path.display());
        Ok(())
    }
}

/// Pretty-print `value` to a temp file beside `path`, then rename over it.
fn write_json<T: Serialize>(value: &T, path: &Path) -> MemResult<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut tmp, value)?;
    tmp.write_all(b"\n")?;
    tmp.flush()?;
    tmp.persist(path)?;
    Ok(())
}
