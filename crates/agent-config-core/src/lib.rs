//! # agent-config-core
//!
//! Pure domain types for the IVCT Entity Agent configuration.
//!
//! This crate has no filesystem access of its own.  It defines:
//!
//! - **`domain`** – The immutable [`AgentConfig`] value, the scalar
//!   [`AgentSettings`] with their defaults, and [`ResourceLocation`], the
//!   `file://` URL (or raw path fallback) form used for every resolved
//!   resource.
//!
//! - **`properties`** – The `.properties` line grammar: comments, key/value
//!   separators, line continuations, and escape sequences.  The loader crate
//!   reads the bytes; this crate turns them into a [`Properties`] map.

pub mod domain;
pub mod properties;

pub use domain::config::{AgentConfig, AgentSettings};
pub use domain::location::ResourceLocation;
pub use properties::{Properties, PropertiesError};
