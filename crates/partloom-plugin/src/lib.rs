//! Build-part plugin contract for the partloom orchestrator.
//!
//! This crate defines the narrow seam between the orchestrator and the
//! per-artifact plugins it loads: how a plugin declares its build-time
//! properties, how it validates the prepared build environment, and how
//! it hands the orchestrator the shell commands for the build step.
//!
//! # Contract Overview
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`Plugin`] | Build hooks: snaps, packages, environment, commands |
//! | [`PluginProperties`] | Strict parsing of a plugin's configuration keys |
//! | [`EnvironmentValidator`] | Pre-build probe of the prepared environment |
//! | [`PartInfo`] | Read-only per-part paths and names |
//! | [`PluginError`] | Unified error type for plugin operations |
//!
//! Plugins hold no shared mutable state: properties are parsed once per
//! part and immutable thereafter, validation is a read-only gate, and
//! command emission is pure computation. The orchestrator may drive
//! multiple parts concurrently without any locking discipline here.

pub mod error;
pub mod part;
pub mod plugin;
pub mod properties;
pub mod validator;

// Re-export core types at crate root for convenience.
pub use error::{EnvironmentValidationError, PluginError};
pub use part::PartInfo;
pub use plugin::Plugin;
pub use properties::{PluginProperties, extract_plugin_properties};
pub use validator::{COMMAND_NOT_FOUND, EnvironmentValidator, ProbeError};
