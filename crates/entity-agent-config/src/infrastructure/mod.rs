//! Infrastructure layer for the configuration loader.
//!
//! Everything that touches the filesystem lives here.
//!
//! # Sub-modules
//!
//! - **`properties_file`** – Reads a properties file from disk and hands the
//!   bytes to the core parser.
//!
//! - **`resource_root`** – The [`ResourceLocator`](resource_root::ResourceLocator)
//!   trait and its implementations: a fixed directory, or the directory of
//!   the running executable.
//!
//! - **`resources`** – Directory probing and listing used to find the FOM
//!   directory and the test cases.

pub mod properties_file;
pub mod resource_root;
pub mod resources;
