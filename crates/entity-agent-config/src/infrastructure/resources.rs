//! Directory probing and listing for packaged resources.
//!
//! None of these functions fail the load: a path that cannot be normalised
//! is used as given, and a directory that cannot be listed has no entries as
//! far as the caller is concerned.

use std::io;
use std::path::{Path, PathBuf};

use agent_config_core::ResourceLocation;

/// Normalises a directory path, falling back to the raw path when the
/// filesystem cannot resolve it (missing directory, permission error).
pub fn normalize_dir(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Returns the normalised path if `path` exists and is a directory.
pub fn probe_directory(path: &Path) -> Option<PathBuf> {
    if path.is_dir() {
        Some(normalize_dir(path))
    } else {
        None
    }
}

/// Lists the immediate entries of `dir` in the order the OS returns them.
///
/// Files and sub-directories are both included; nothing is sorted or
/// filtered.  Entries that vanish or fail mid-listing are skipped.
///
/// # Errors
///
/// Returns the I/O error if the directory itself cannot be opened.
pub fn list_entries(dir: &Path) -> io::Result<Vec<PathBuf>> {
    Ok(std::fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .collect())
}

/// Converts a listed entry to its resource location.  Directories get a
/// trailing-slash URL.
pub fn entry_location(path: &Path) -> ResourceLocation {
    if path.is_dir() {
        ResourceLocation::from_directory(path)
    } else {
        ResourceLocation::from_path(path)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
