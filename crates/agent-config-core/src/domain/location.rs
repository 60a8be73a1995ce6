//! Resolved resource locations.
//!
//! Every resource the loader discovers (test-case files, test-case
//! directories) is exposed as a [`ResourceLocation`].  The preferred form is a
//! `file://` URL so downstream consumers can treat local and packaged
//! resources alike.  When a path cannot be expressed as a URL the raw path is
//! kept instead, so resolution never fails.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};
use url::Url;

/// A resolved location of a test-case or resource directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceLocation {
    /// A `file://` URL.  Directory URLs always end with `/`.
    Url(Url),
    /// Raw filesystem path, used when URL conversion is not possible.
    Path(PathBuf),
}

impl ResourceLocation {
    /// Builds a location for a file (or any entry whose kind is not known).
    ///
    /// Relative paths are made absolute against the current working
    /// directory first, because `file://` URLs cannot be relative.
    pub fn from_path(path: &Path) -> Self {
        let absolute = absolutize(path);
        match Url::from_file_path(&absolute) {
            Ok(url) => Self::Url(url),
            Err(()) => Self::Path(absolute),
        }
    }

    /// Builds a location for a directory.  The URL form ends with `/`.
    pub fn from_directory(path: &Path) -> Self {
        let absolute = absolutize(path);
        match Url::from_directory_path(&absolute) {
            Ok(url) => Self::Url(url),
            Err(()) => Self::Path(absolute),
        }
    }

    /// Returns the URL if this location was resolved to one.
    pub fn as_url(&self) -> Option<&Url> {
        match self {
            Self::Url(url) => Some(url),
            Self::Path(_) => None,
        }
    }

    /// Converts the location back into a filesystem path.
    ///
    /// For URLs that do not map onto a local path (non-`file` schemes, a
    /// foreign host) the URL path component is used verbatim.
    pub fn to_file_path(&self) -> PathBuf {
        match self {
            Self::Url(url) => url
                .to_file_path()
                .unwrap_or_else(|()| PathBuf::from(url.path())),
            Self::Path(path) => path.clone(),
        }
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

impl Serialize for ResourceLocation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
