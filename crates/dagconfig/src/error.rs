//! Error types for dagconfig operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for loading graph documents and lookup settings.
///
/// A lookup that finds nothing is not an error; lookups return `Option`.
#[derive(Debug, Error)]
pub enum Error {
    /// A file could not be opened or read.
    #[error("IO error reading '{}': {source}", path.display())]
    Io {
        /// Path that was being read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// The graph document does not have the expected structure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The lookup settings file is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A specialized Result type for dagconfig operations.
pub type Result<T> = std::result::Result<T, Error>;
