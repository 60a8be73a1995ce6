//! entity-agent-config library entry point.
//!
//! Loads the IVCT Entity Agent configuration from a properties file and
//! resolves the resources it points at.
//!
//! # What does the loader do?
//!
//! 1. Reads and parses the properties file.  A missing or corrupt file is
//!    logged and treated as empty unless [`LoadMode::Strict`] is selected.
//! 2. Fills in the three scalar settings, substituting defaults.
//! 3. Asks the injected [`ResourceLocator`] for the resource root and
//!    resolves the `testcaseDir` setting and the fixed `fom` directory
//!    against it.
//! 4. Lists the test-case directory (non-recursive, listing order) and
//!    returns an immutable [`AgentConfig`].
//!
//! ```no_run
//! use entity_agent_config::{ConfigLoader, FixedResourceRoot};
//!
//! let loader = ConfigLoader::new(FixedResourceRoot::new("/opt/entity-agent/resources"));
//! let config = loader.load("/opt/entity-agent/EntityAgent.properties")?;
//! println!("{} joins {}", config.federate_name(), config.federation_name());
//! # Ok::<(), entity_agent_config::ConfigLoadError>(())
//! ```

/// Application layer: the configuration load use case.
pub mod application;

/// Infrastructure layer: filesystem adapters and resource locators.
pub mod infrastructure;

pub use agent_config_core::{AgentConfig, AgentSettings, Properties, ResourceLocation};
pub use application::load_config::{ConfigLoadError, ConfigLoader, LoadMode};
pub use infrastructure::properties_file::SourceError;
pub use infrastructure::resource_root::{
    ExecutableResourceRoot, FixedResourceRoot, ResourceLocator, ResourceRootError,
};
