//! Properties file reader.

use std::path::{Path, PathBuf};

use agent_config_core::{Properties, PropertiesError};
use thiserror::Error;

/// Error type for reading a properties source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The file could not be opened or read.
    #[error("I/O error reading properties at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but its contents are not valid properties text.
    #[error("failed to parse properties at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: PropertiesError,
    },
}

impl SourceError {
    /// Path of the source that failed.
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}

/// Reads and parses the properties file at `path`.
///
/// # Errors
///
/// Returns [`SourceError::Io`] if the file cannot be read (including when
/// `path` is a directory) and [`SourceError::Parse`] if it contains a
/// malformed escape.
pub fn read_properties(path: &Path) -> Result<Properties, SourceError> {
    let bytes = std::fs::read(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Properties::from_bytes(&bytes).map_err(|source| SourceError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
