//! The Entity Agent configuration value.
//!
//! [`AgentConfig`] is built once by the loader and then only read.  It holds
//! three scalar settings, the optional FOM directory, and the ordered list of
//! discovered test cases.
//!
//! # Example properties source
//!
//! ```text
//! localSettingsDesignator=crcAddress=rti.example.org:8989
//! federationName=IVCTFederation
//! federateName=EntityAgent
//! testcaseDir=testcases
//! ```
//!
//! # Defaults
//!
//! A key that is missing, or whose value is blank, falls back to its default.
//! This keeps every scalar non-empty even for a partial or empty source.
//!
//! | Key                       | Default                |
//! |---------------------------|------------------------|
//! | `localSettingsDesignator` | `crcAddress=localhost` |
//! | `federationName`          | `IVCTFederation`       |
//! | `federateName`            | `EntityAgent`          |
//! | `testcaseDir`             | `.`                    |

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::location::ResourceLocation;
use crate::properties::Properties;

/// Key for the RTI local settings designator.
pub const LOCAL_SETTINGS_DESIGNATOR_KEY: &str = "localSettingsDesignator";
/// Key for the federation name.
pub const FEDERATION_NAME_KEY: &str = "federationName";
/// Key for the federate name.
pub const FEDERATE_NAME_KEY: &str = "federateName";
/// Key for the test-case directory, relative to the resource root.
pub const TESTCASE_DIR_KEY: &str = "testcaseDir";

/// Name of the FOM directory under the resource root.  Not configurable.
pub const FOM_DIR_NAME: &str = "fom";

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_local_settings_designator() -> String {
    "crcAddress=localhost".to_string()
}
fn default_federation_name() -> String {
    "IVCTFederation".to_string()
}
fn default_federate_name() -> String {
    "EntityAgent".to_string()
}
fn default_testcase_dir() -> String {
    ".".to_string()
}

// ── Scalar settings ───────────────────────────────────────────────────────────

/// The plain string settings read from a properties source.
///
/// These are the values that need no filesystem access to resolve.  The
/// loader turns `testcase_dir` into a location; the other three are copied
/// into [`AgentConfig`] as they are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSettings {
    pub local_settings_designator: String,
    pub federation_name: String,
    pub federate_name: String,
    /// Test-case directory name, relative to the resource root.
    pub testcase_dir: String,
}

impl AgentSettings {
    /// Reads the settings from `properties`, substituting defaults for keys
    /// that are absent or blank.
    pub fn from_properties(properties: &Properties) -> Self {
        Self {
            local_settings_designator: setting_or(
                properties,
                LOCAL_SETTINGS_DESIGNATOR_KEY,
                default_local_settings_designator,
            ),
            federation_name: setting_or(properties, FEDERATION_NAME_KEY, default_federation_name),
            federate_name: setting_or(properties, FEDERATE_NAME_KEY, default_federate_name),
            testcase_dir: setting_or(properties, TESTCASE_DIR_KEY, default_testcase_dir),
        }
    }
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            local_settings_designator: default_local_settings_designator(),
            federation_name: default_federation_name(),
            federate_name: default_federate_name(),
            testcase_dir: default_testcase_dir(),
        }
    }
}

fn setting_or(properties: &Properties, key: &str, default: fn() -> String) -> String {
    match properties.get(key) {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => default(),
    }
}

// ── Resolved configuration ────────────────────────────────────────────────────

/// Immutable Entity Agent configuration.
///
/// All fields are private; the accessors are plain reads.  The value is
/// `Send + Sync` and can be shared behind an `Arc` by any number of readers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentConfig {
    local_settings_designator: String,
    federation_name: String,
    federate_name: String,
    #[serde(rename = "fom", skip_serializing_if = "Option::is_none")]
    fom_path: Option<PathBuf>,
    testcase_list: Vec<ResourceLocation>,
}

impl AgentConfig {
    /// Assembles a configuration from already-resolved parts.
    pub fn new(
        settings: AgentSettings,
        fom_path: Option<PathBuf>,
        testcase_list: Vec<ResourceLocation>,
    ) -> Self {
        Self {
            local_settings_designator: settings.local_settings_designator,
            federation_name: settings.federation_name,
            federate_name: settings.federate_name,
            fom_path,
            testcase_list,
        }
    }

    /// RTI local settings designator, e.g. `crcAddress=localhost`.
    pub fn local_settings_designator(&self) -> &str {
        &self.local_settings_designator
    }

    /// Name of the federation the agent joins.
    pub fn federation_name(&self) -> &str {
        &self.federation_name
    }

    /// Name the agent registers under as a federate.
    pub fn federate_name(&self) -> &str {
        &self.federate_name
    }

    /// Path of the FOM directory, if one was found under the resource root.
    pub fn fom(&self) -> Option<&Path> {
        self.fom_path.as_deref()
    }

    /// Test cases in directory-listing order.
    pub fn testcase_list(&self) -> &[ResourceLocation] {
        &self.testcase_list
    }
}

impl Default for AgentConfig {
    /// All scalar defaults, no FOM directory, no test cases.
    fn default() -> Self {
        Self::new(AgentSettings::default(), None, Vec::new())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
