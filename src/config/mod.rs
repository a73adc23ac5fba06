//! Storage configuration and project-root resolution.

pub mod paths;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::MemResult;

pub use paths::{find_project_root, StorePaths};

/// Environment variable that pins the storage root.
pub const ROOT_ENV: &str = "NIKA_MEMORY_ROOT";

/// Name of the optional config file inside the marker directory.
pub const CONFIG_FILE: &str = "nika-memory.toml";

/// Where and under what names the memory files live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Directory whose presence marks a project root.
    pub marker_dir: String,
    /// Primary store file name, inside the marker directory.
    pub store_file: String,
    /// Tag index file name, inside the marker directory.
    pub index_file: String,
    /// Explicit root; skips the upward search when set.
    pub root: Option<PathBuf>,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            marker_dir: ".claude".to_string(),
            store_file: "nika-memory.json".to_string(),
            index_file: "nika-memory.index.json".to_string(),
            root: None,
        }
    }
}

impl MemoryConfig {
    /// Load from TOML file
    pub fn load(path: &Path) -> MemResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save to TOML file
    pub fn save(&self, path: &Path) -> MemResult<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolve the config that applies when working from `start`.
    ///
    /// Looks for `<root>/.claude/nika-memory.toml` and falls back to the
    /// defaults. `NIKA_MEMORY_ROOT` overrides whatever root the file names.
    pub fn load_or_default(start: &Path) -> Self {
        let defaults = Self::default();
        let root = find_project_root(start, &defaults.marker_dir);
        let path = root.join(&defaults.marker_dir).join(CONFIG_FILE);

        let mut config = if path.is_file() {
            Self::load(&path).unwrap_or_else(|e| {
                log::warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            defaults
        };

        if let Some(root) = std::env::var_os(ROOT_ENV).filter(|v| !v.is_empty()) {
            config.root = Some(PathBuf::from(root));
        }
        config
    }

    /// Resolve the file locations for this config, searching upward from `start`.
    pub fn resolve(&self, start: &Path) -> StorePaths {
        let root = match &self.root {
            Some(root) => root.clone(),
            None => find_project_root(start, &self.marker_dir),
        };
        StorePaths::new(root, self)
    }
}
