//! Integration tests for the configuration load pipeline.
//!
//! These tests exercise `ConfigLoader` end-to-end against real temporary
//! directories: properties parsing, resource root resolution, FOM probing,
//! and test-case discovery.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use entity_agent_config::{
    ConfigLoadError, ConfigLoader, FixedResourceRoot, LoadMode, ResourceLocator,
    ResourceRootError, SourceError,
};
use mockall::mock;
use tempfile::TempDir;
use tracing::Dispatch;

// ── Fixtures ──────────────────────────────────────────────────────────────────

/// A resource root in a temp directory plus a properties file outside it.
struct Fixture {
    root: TempDir,
    config_dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("root dir"),
            config_dir: tempfile::tempdir().expect("config dir"),
        }
    }

    fn root(&self) -> &Path {
        self.root.path()
    }

    fn write_properties(&self, text: &str) -> PathBuf {
        let path = self.config_dir.path().join("EntityAgent.properties");
        std::fs::write(&path, text).expect("write properties");
        path
    }

    fn missing_properties(&self) -> PathBuf {
        self.config_dir.path().join("missing.properties")
    }

    fn create_dir(&self, relative: &str) -> PathBuf {
        let path = self.root().join(relative);
        std::fs::create_dir_all(&path).expect("create dir");
        path
    }

    fn create_file(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.root().join(relative);
        std::fs::write(&path, contents).expect("create file");
        path
    }

    fn loader(&self) -> ConfigLoader<FixedResourceRoot> {
        ConfigLoader::new(FixedResourceRoot::new(self.root()))
    }
}

/// Shared byte buffer that a `tracing-subscriber` fmt layer writes into.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        let bytes = self.0.lock().expect("log buffer lock");
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capturing_dispatch() -> (Dispatch, LogBuffer) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();
    (Dispatch::new(subscriber), buffer)
}

mock! {
    pub Locator {}

    impl ResourceLocator for Locator {
        fn resource_root(&self) -> Result<PathBuf, ResourceRootError>;
    }
}

const FULL_PROPERTIES: &str = "\
# Entity Agent
localSettingsDesignator=crcAddress=rti.lab:8989
federationName=LabFederation
federateName=Agent42
testcaseDir=cases
";

// ── Scalar settings ───────────────────────────────────────────────────────────

#[test]
fn test_full_source_values_are_used_verbatim() {
    // Arrange
    let fx = Fixture::new();
    let path = fx.write_properties(FULL_PROPERTIES);

    // Act
    let cfg = fx.loader().load(&path).expect("load");

    // Assert
    assert_eq!(cfg.local_settings_designator(), "crcAddress=rti.lab:8989");
    assert_eq!(cfg.federation_name(), "LabFederation");
    assert_eq!(cfg.federate_name(), "Agent42");
}

#[test]
fn test_empty_source_uses_defaults() {
    let fx = Fixture::new();
    let path = fx.write_properties("");

    let cfg = fx.loader().load(&path).expect("load");

    assert_eq!(cfg.local_settings_designator(), "crcAddress=localhost");
    assert_eq!(cfg.federation_name(), "IVCTFederation");
    assert_eq!(cfg.federate_name(), "EntityAgent");
}

#[test]
fn test_missing_source_does_not_fail_and_yields_defaults() {
    // Arrange: point testcaseDir's default (".") at an empty root
    let fx = Fixture::new();

    // Act
    let cfg = fx.loader().load(fx.missing_properties()).expect("permissive load");

    // Assert
    assert_eq!(cfg.local_settings_designator(), "crcAddress=localhost");
    assert_eq!(cfg.federation_name(), "IVCTFederation");
    assert_eq!(cfg.federate_name(), "EntityAgent");
    assert!(cfg.testcase_list().is_empty());
    assert!(cfg.fom().is_none());
}

#[test]
fn test_corrupt_source_is_treated_as_empty_in_permissive_mode() {
    // Arrange: a malformed escape makes the whole file unparsable
    let fx = Fixture::new();
    let path = fx.write_properties("federateName=Valid\nfederationName=\\u00\n");

    // Act
    let cfg = fx.loader().load(&path).expect("permissive load");

    // Assert – nothing from the file is used
    assert_eq!(cfg.federate_name(), "EntityAgent");
    assert_eq!(cfg.federation_name(), "IVCTFederation");
}

#[test]
fn test_corrupt_source_fails_in_strict_mode() {
    let fx = Fixture::new();
    let path = fx.write_properties("federationName=\\u00\n");

    let result = fx.loader().with_mode(LoadMode::Strict).load(&path);

    assert!(matches!(
        result,
        Err(ConfigLoadError::Source(SourceError::Parse { .. }))
    ));
}

#[test]
fn test_strict_mode_accepts_readable_source() {
    let fx = Fixture::new();
    let path = fx.write_properties(FULL_PROPERTIES);

    let cfg = fx.loader().with_mode(LoadMode::Strict).load(&path).expect("load");

    assert_eq!(cfg.federate_name(), "Agent42");
}

// ── FOM directory ─────────────────────────────────────────────────────────────

#[test]
fn test_fom_absent_when_no_fom_directory() {
    let fx = Fixture::new();
    let path = fx.write_properties(FULL_PROPERTIES);

    let cfg = fx.loader().load(&path).expect("load");

    assert!(cfg.fom().is_none());
}

#[test]
fn test_fom_present_when_fom_directory_exists() {
    // Arrange
    let fx = Fixture::new();
    let fom = fx.create_dir("fom");
    fx.create_file("fom/RPR-FOM.xml", "<objectModel/>");
    let path = fx.write_properties(FULL_PROPERTIES);

    // Act
    let cfg = fx.loader().load(&path).expect("load");

    // Assert
    let found = cfg.fom().expect("fom directory must be found");
    assert_eq!(found, std::fs::canonicalize(&fom).expect("canonical fom"));
    assert!(found.is_dir());
}

#[test]
fn test_fom_file_instead_of_directory_is_absent() {
    let fx = Fixture::new();
    fx.create_file("fom", "not a directory");
    let path = fx.write_properties(FULL_PROPERTIES);

    let cfg = fx.loader().load(&path).expect("load");

    assert!(cfg.fom().is_none());
}

// ── Test cases ────────────────────────────────────────────────────────────────

#[test]
fn test_testcase_scenario_two_xml_files() {
    // Arrange
    let fx = Fixture::new();
    fx.create_dir("cases");
    fx.create_file("cases/a.xml", "<a/>");
    fx.create_file("cases/b.xml", "<b/>");
    let path = fx.write_properties("testcaseDir=cases\n");

    // Act
    let cfg = fx.loader().load(&path).expect("load");

    // Assert – order is listing order, so compare as a sorted set
    assert_eq!(cfg.testcase_list().len(), 2);
    let mut contents: Vec<String> = cfg
        .testcase_list()
        .iter()
        .map(|location| std::fs::read_to_string(location.to_file_path()).expect("readable"))
        .collect();
    contents.sort();
    assert_eq!(contents, vec!["<a/>", "<b/>"]);
}

#[test]
fn test_testcase_locations_are_file_urls() {
    let fx = Fixture::new();
    fx.create_dir("cases");
    fx.create_file("cases/a.xml", "<a/>");
    let path = fx.write_properties("testcaseDir=cases\n");

    let cfg = fx.loader().load(&path).expect("load");

    let location = &cfg.testcase_list()[0];
    let url = location.as_url().expect("file url");
    assert_eq!(url.scheme(), "file");
    assert!(url.path().ends_with("/cases/a.xml"));
}

#[test]
fn test_testcase_list_counts_files_and_directories_non_recursively() {
    // Arrange
    let fx = Fixture::new();
    fx.create_dir("cases/suite");
    fx.create_file("cases/suite/inner.xml", "<i/>");
    fx.create_file("cases/a.xml", "<a/>");
    fx.create_file("cases/b.xml", "<b/>");
    let path = fx.write_properties("testcaseDir=cases\n");

    // Act
    let cfg = fx.loader().load(&path).expect("load");

    // Assert – a.xml, b.xml, suite/
    assert_eq!(cfg.testcase_list().len(), 3);
    assert!(cfg
        .testcase_list()
        .iter()
        .any(|location| location.to_string().ends_with("/suite/")));
}

#[test]
fn test_testcase_list_keeps_directory_listing_order() {
    // Arrange: names deliberately out of alphabetical order
    let fx = Fixture::new();
    let cases = fx.create_dir("cases");
    for name in ["b.xml", "zz.xml", "q.xml", "c.xml", "m.xml", "a.xml"] {
        fx.create_file(&format!("cases/{name}"), "<case/>");
    }
    let path = fx.write_properties("testcaseDir=cases\n");

    // Act
    let cfg = fx.loader().load(&path).expect("load");

    // Assert – same sequence the OS listing returns, no sorting applied
    let file_name = |p: PathBuf| {
        p.file_name()
            .expect("file name")
            .to_string_lossy()
            .into_owned()
    };
    let listed: Vec<String> = std::fs::read_dir(std::fs::canonicalize(&cases).expect("canonical"))
        .expect("read_dir")
        .map(|entry| file_name(entry.expect("entry").path()))
        .collect();
    let loaded: Vec<String> = cfg
        .testcase_list()
        .iter()
        .map(|location| file_name(location.to_file_path()))
        .collect();
    assert_eq!(loaded.len(), 6);
    assert_eq!(loaded, listed);
}

#[test]
fn test_missing_testcase_directory_yields_empty_list() {
    let fx = Fixture::new();
    let path = fx.write_properties("testcaseDir=does-not-exist\n");

    let cfg = fx.loader().load(&path).expect("load");

    assert!(cfg.testcase_list().is_empty());
}

#[test]
fn test_testcase_dir_with_leading_slash_stays_under_root() {
    let fx = Fixture::new();
    fx.create_dir("cases");
    fx.create_file("cases/a.xml", "<a/>");
    let path = fx.write_properties("testcaseDir=/cases\n");

    let cfg = fx.loader().load(&path).expect("load");

    assert_eq!(cfg.testcase_list().len(), 1);
}

#[test]
fn test_default_testcase_dir_lists_resource_root() {
    // Arrange: no testcaseDir key, root holds fom/ and one case file
    let fx = Fixture::new();
    fx.create_dir("fom");
    fx.create_file("case.xml", "<c/>");
    let path = fx.write_properties("federateName=RootLister\n");

    // Act
    let cfg = fx.loader().load(&path).expect("load");

    // Assert – "." means the root itself, fom/ included
    assert_eq!(cfg.testcase_list().len(), 2);
    assert!(cfg.fom().is_some());
}

// ── Whole-config properties ───────────────────────────────────────────────────

#[test]
fn test_load_twice_yields_identical_configs() {
    // Arrange
    let fx = Fixture::new();
    fx.create_dir("fom");
    fx.create_dir("cases");
    fx.create_file("cases/a.xml", "<a/>");
    fx.create_file("cases/b.xml", "<b/>");
    let path = fx.write_properties(FULL_PROPERTIES);
    let loader = fx.loader();

    // Act
    let first = loader.load(&path).expect("first load");
    let second = loader.load(&path).expect("second load");

    // Assert
    assert_eq!(first, second);
}

#[test]
fn test_config_snapshot_serializes_resolved_values() {
    // Arrange
    let fx = Fixture::new();
    fx.create_dir("fom");
    fx.create_dir("cases");
    fx.create_file("cases/a.xml", "<a/>");
    let path = fx.write_properties(FULL_PROPERTIES);

    // Act
    let cfg = fx.loader().load(&path).expect("load");
    let json = serde_json::to_value(&cfg).expect("serialize");

    // Assert
    assert_eq!(json["federateName"], "Agent42");
    assert!(json["fom"].is_string());
    let cases = json["testcaseList"].as_array().expect("array");
    assert_eq!(cases.len(), 1);
    assert!(cases[0].as_str().expect("string").starts_with("file://"));
}

// ── Resource root failures ────────────────────────────────────────────────────

#[test]
fn test_resource_root_failure_is_propagated() {
    // Arrange
    let fx = Fixture::new();
    let path = fx.write_properties(FULL_PROPERTIES);
    let mut locator = MockLocator::new();
    locator.expect_resource_root().times(1).returning(|| {
        Err(ResourceRootError::NoParentDir(PathBuf::from("/")))
    });

    // Act
    let result = ConfigLoader::new(locator).load(&path);

    // Assert
    assert!(matches!(result, Err(ConfigLoadError::ResourceRoot(_))));
}

#[test]
fn test_locator_is_consulted_once_per_load() {
    let fx = Fixture::new();
    let path = fx.write_properties(FULL_PROPERTIES);
    let root = fx.root().to_path_buf();
    let mut locator = MockLocator::new();
    locator
        .expect_resource_root()
        .times(2)
        .returning(move || Ok(root.clone()));

    let loader = ConfigLoader::new(locator);
    loader.load(&path).expect("first load");
    loader.load(&path).expect("second load");
}

// ── Diagnostics ───────────────────────────────────────────────────────────────

#[test]
fn test_missing_fom_logs_warning() {
    let fx = Fixture::new();
    let path = fx.write_properties(FULL_PROPERTIES);
    let (dispatch, logs) = capturing_dispatch();

    fx.loader().with_dispatch(dispatch).load(&path).expect("load");

    let output = logs.contents();
    assert!(output.contains("WARN"), "expected a warning, got: {output}");
    assert!(output.contains("could not find FOM directory"));
}

#[test]
fn test_discovered_resources_log_at_info() {
    // Arrange
    let fx = Fixture::new();
    fx.create_dir("fom");
    fx.create_dir("cases");
    fx.create_file("cases/a.xml", "<a/>");
    let path = fx.write_properties(FULL_PROPERTIES);
    let (dispatch, logs) = capturing_dispatch();

    // Act
    fx.loader().with_dispatch(dispatch).load(&path).expect("load");

    // Assert
    let output = logs.contents();
    assert!(output.contains("found FOM directory at"));
    assert!(output.contains("found test case:"));
    assert!(output.contains("a.xml"));
    assert!(!output.contains("ERROR"));
}

#[test]
fn test_unreadable_source_logs_error() {
    let fx = Fixture::new();
    let (dispatch, logs) = capturing_dispatch();

    fx.loader()
        .with_dispatch(dispatch)
        .load(fx.missing_properties())
        .expect("permissive load");

    let output = logs.contents();
    assert!(output.contains("ERROR"), "expected an error line, got: {output}");
    assert!(output.contains("missing.properties"));
}
