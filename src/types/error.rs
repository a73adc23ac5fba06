//! Error types for the nika-memory library.

use thiserror::Error;

/// Errors that can escape the memory engine.
///
/// Missing or corrupt store files are not errors: they load as an empty
/// store. Only failures to write, or to read configuration the caller
/// explicitly asked for, surface here.
#[derive(Error, Debug)]
pub enum MemError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Configuration file could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<tempfile::PersistError> for MemError {
    fn from(err: tempfile::PersistError) -> Self {
        MemError::Io(err.error)
    }
}

impl From<toml::de::Error> for MemError {
    fn from(err: toml::de::Error) -> Self {
        MemError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for MemError {
    fn from(err: toml::ser::Error) -> Self {
        MemError::Config(err.to_string())
    }
}

/// Convenience result type for memory operations.
pub type MemResult<T> = Result<T, MemError>;
