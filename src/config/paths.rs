//! Project-root discovery and file locations.

use std::path::{Path, PathBuf};

use super::MemoryConfig;

/// Walk up from `start` to the first directory containing `marker` as a
/// subdirectory. Returns `start` unchanged when no ancestor has one.
pub fn find_project_root(start: &Path, marker: &str) -> PathBuf {
    start
        .ancestors()
        .find(|dir| dir.join(marker).is_dir())
        .unwrap_or(start)
        .to_path_buf()
}

/// Resolved locations of the memory files for one project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    root: PathBuf,
    store_file: PathBuf,
    index_file: PathBuf,
}

impl StorePaths {
    /// Lay out the files of `config` under `root`.
    pub fn new(root: PathBuf, config: &MemoryConfig) -> Self {
        let dir = root.join(&config.marker_dir);
        Self {
            store_file: dir.join(&config.store_file),
            index_file: dir.join(&config.index_file),
            root,
        }
    }

    /// The project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the primary store file.
    pub fn store_file(&self) -> &Path {
        &self.store_file
    }

    /// Path of the tag index file.
    pub fn index_file(&self) -> &Path {
        &self.index_file
    }
}
