//! Resource root resolution.
//!
//! The test-case directory and the FOM directory are named relative to a
//! *resource root*: the directory where the agent's resources are packaged.
//! Which directory that is depends on how the agent is deployed, so the
//! loader receives a [`ResourceLocator`] instead of hard-coding a rule.
//!
//! | Locator                    | Root                                          |
//! |----------------------------|-----------------------------------------------|
//! | [`FixedResourceRoot`]      | A directory chosen by the caller              |
//! | [`ExecutableResourceRoot`] | The executable's directory (plus optional sub-directory) |

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error type for resource root resolution.
#[derive(Debug, Error)]
pub enum ResourceRootError {
    /// The path of the running executable could not be determined.
    #[error("could not determine the running executable: {0}")]
    CurrentExe(#[source] std::io::Error),

    /// The executable path has no parent directory.
    #[error("executable path {0} has no parent directory")]
    NoParentDir(PathBuf),
}

/// Supplies the base directory that resource names are resolved against.
pub trait ResourceLocator: Send + Sync {
    /// Returns the resource root.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceRootError`] if no root can be determined at all.
    /// This is the only condition under which a configuration load fails in
    /// permissive mode.
    fn resource_root(&self) -> Result<PathBuf, ResourceRootError>;
}

impl<T: ResourceLocator + ?Sized> ResourceLocator for &T {
    fn resource_root(&self) -> Result<PathBuf, ResourceRootError> {
        (**self).resource_root()
    }
}

impl<T: ResourceLocator + ?Sized> ResourceLocator for Box<T> {
    fn resource_root(&self) -> Result<PathBuf, ResourceRootError> {
        (**self).resource_root()
    }
}

/// Joins a resource name onto `root`.
///
/// Names are always relative to the root: leading separators are stripped,
/// so `/cases` and `cases` resolve to the same directory.
pub fn resolve_resource(root: &Path, name: &str) -> PathBuf {
    let relative = name.trim_start_matches(['/', '\\']);
    if relative.is_empty() {
        root.to_path_buf()
    } else {
        root.join(relative)
    }
}

// ── Fixed directory ───────────────────────────────────────────────────────────

/// A resource root chosen by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedResourceRoot {
    root: PathBuf,
}

impl FixedResourceRoot {
    /// Uses `root` as the resource root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResourceLocator for FixedResourceRoot {
    fn resource_root(&self) -> Result<PathBuf, ResourceRootError> {
        Ok(self.root.clone())
    }
}

// ── Executable directory ──────────────────────────────────────────────────────

/// Resolves resources next to the running executable.
///
/// With a sub-directory set, the root is `<exe dir>/<subdir>`; this matches
/// installs that ship resources in e.g. a `resources/` folder beside the
/// binary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutableResourceRoot {
    subdir: Option<PathBuf>,
}

impl ExecutableResourceRoot {
    /// Root is the directory containing the executable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Root is `subdir` inside the executable's directory.
    pub fn with_subdir(subdir: impl Into<PathBuf>) -> Self {
        Self {
            subdir: Some(subdir.into()),
        }
    }
}

impl ResourceLocator for ExecutableResourceRoot {
    fn resource_root(&self) -> Result<PathBuf, ResourceRootError> {
        let exe = std::env::current_exe().map_err(ResourceRootError::CurrentExe)?;
        let dir = exe
            .parent()
            .ok_or_else(|| ResourceRootError::NoParentDir(exe.clone()))?;
        Ok(match &self.subdir {
            Some(subdir) => dir.join(subdir),
            None => dir.to_path_buf(),
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
