//! ConfigLoader: builds an [`AgentConfig`] from a properties file.
//!
//! # Load steps
//!
//! ```text
//! load(path)
//!  ├─ read + parse properties      unreadable → error! + empty (Permissive)
//!  │                                           → ConfigLoadError  (Strict)
//!  ├─ scalar settings              absent/blank key → default
//!  ├─ locator.resource_root()      failure → ConfigLoadError (always)
//!  ├─ <root>/fom                   not a directory → warn!, fom = None
//!  └─ <root>/<testcaseDir>         missing/unlistable → empty list
//! ```
//!
//! # Diagnostics
//!
//! All messages go through `tracing`.  A loader built with
//! [`ConfigLoader::with_dispatch`] sends them to that dispatcher only;
//! otherwise they go to whatever dispatcher is current for the caller.

use std::path::Path;

use agent_config_core::domain::config::FOM_DIR_NAME;
use agent_config_core::{AgentConfig, AgentSettings, Properties, ResourceLocation};
use thiserror::Error;
use tracing::{debug, error, info, warn, Dispatch};

use crate::infrastructure::properties_file::{read_properties, SourceError};
use crate::infrastructure::resource_root::{resolve_resource, ResourceLocator, ResourceRootError};
use crate::infrastructure::resources::{entry_location, list_entries, normalize_dir, probe_directory};

/// Error type for a configuration load.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    /// The resource root could not be determined at all.
    #[error("could not determine the resource root: {0}")]
    ResourceRoot(#[from] ResourceRootError),

    /// The properties source is unreadable and the loader is in strict mode.
    #[error("properties source is unreadable: {0}")]
    Source(#[from] SourceError),
}

/// How the loader treats an unreadable properties source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadMode {
    /// Log the failure and continue as if the source were empty.
    #[default]
    Permissive,
    /// Fail the load with [`ConfigLoadError::Source`].
    Strict,
}

/// Loads [`AgentConfig`] values.
///
/// The loader holds only its options; every call to [`ConfigLoader::load`]
/// reads the filesystem afresh.
#[derive(Debug)]
pub struct ConfigLoader<L> {
    locator: L,
    mode: LoadMode,
    dispatch: Option<Dispatch>,
}

impl<L: ResourceLocator> ConfigLoader<L> {
    /// Creates a permissive loader that resolves resources via `locator`.
    pub fn new(locator: L) -> Self {
        Self {
            locator,
            mode: LoadMode::default(),
            dispatch: None,
        }
    }

    /// Sets how an unreadable properties source is handled.
    pub fn with_mode(mut self, mode: LoadMode) -> Self {
        self.mode = mode;
        self
    }

    /// Routes the loader's diagnostics to `dispatch`.
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    /// The loader's current [`LoadMode`].
    pub fn mode(&self) -> LoadMode {
        self.mode
    }

    /// Loads the configuration from the properties file at `path`.
    ///
    /// Missing keys, a missing FOM directory, and a missing or empty
    /// test-case directory never fail the load.
    ///
    /// # Errors
    ///
    /// - [`ConfigLoadError::ResourceRoot`] if the locator cannot produce a
    ///   resource root.
    /// - [`ConfigLoadError::Source`] if the file cannot be read or parsed and
    ///   the loader is in [`LoadMode::Strict`].
    pub fn load(&self, path: impl AsRef<Path>) -> Result<AgentConfig, ConfigLoadError> {
        let path = path.as_ref();
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, || self.load_from(path)),
            None => self.load_from(path),
        }
    }

    fn load_from(&self, path: &Path) -> Result<AgentConfig, ConfigLoadError> {
        let properties = self.read_source(path)?;
        let settings = AgentSettings::from_properties(&properties);
        debug!(
            "settings from {}: federation={} federate={} testcaseDir={}",
            path.display(),
            settings.federation_name,
            settings.federate_name,
            settings.testcase_dir
        );

        let root = self.locator.resource_root()?;

        let fom_dir = resolve_resource(&root, FOM_DIR_NAME);
        let fom_path = probe_directory(&fom_dir);
        match &fom_path {
            Some(fom) => info!("found FOM directory at {}", fom.display()),
            None => warn!("could not find FOM directory, looked in {}", fom_dir.display()),
        }

        let testcase_dir = normalize_dir(&resolve_resource(&root, &settings.testcase_dir));
        let testcase_list = discover_testcases(&testcase_dir);

        Ok(AgentConfig::new(settings, fom_path, testcase_list))
    }

    fn read_source(&self, path: &Path) -> Result<Properties, ConfigLoadError> {
        match read_properties(path) {
            Ok(properties) => Ok(properties),
            Err(e) if self.mode == LoadMode::Strict => Err(e.into()),
            Err(e) => {
                error!("could not load a valid properties file, using defaults: {e}");
                Ok(Properties::default())
            }
        }
    }
}

/// Lists `dir` and converts every entry to a location, in listing order.
fn discover_testcases(dir: &Path) -> Vec<ResourceLocation> {
    let dir_location = ResourceLocation::from_directory(dir);
    if !dir.is_dir() {
        warn!("test case directory {dir_location} not found, no test cases loaded");
        return Vec::new();
    }

    let entries = match list_entries(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("failed to list test case directory {dir_location}: {e}");
            return Vec::new();
        }
    };

    entries
        .iter()
        .map(|entry| {
            info!("found test case: {}", entry.display());
            entry_location(entry)
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
