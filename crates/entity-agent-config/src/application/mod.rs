//! Application layer use cases.
//!
//! - **`load_config`** – Builds an [`AgentConfig`](agent_config_core::AgentConfig)
//!   from a properties file.  The resource root comes from an injected
//!   [`ResourceLocator`](crate::infrastructure::resource_root::ResourceLocator)
//!   and diagnostics go to an optionally injected `tracing` dispatcher, so
//!   the use case is a function of its inputs and the filesystem only.

pub mod load_config;
