//! Domain entities for the Entity Agent configuration.
//!
//! Nothing in here touches the filesystem.  The loader in
//! `entity-agent-config` performs all I/O and hands the results to these
//! types, which only validate and hold them.

/// The resolved configuration value and its scalar settings.
pub mod config;

/// Resource locations (`file://` URLs with a raw path fallback).
pub mod location;
