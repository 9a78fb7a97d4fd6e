//! The plugin contract consumed by the orchestrator.

use std::collections::{HashMap, HashSet};

use crate::error::PluginError;

/// A pluggable build strategy for parts of a given type.
///
/// The orchestrator consults a part's plugin for the snaps and packages
/// its build environment needs, the environment variables to inject,
/// and the ordered shell commands to run during the build step. The
/// commands are executed later in the orchestrator's own sandbox,
/// entirely outside the plugin's control.
pub trait Plugin: Send + Sync {
    /// Snaps to install in the build environment.
    fn get_build_snaps(&self) -> HashSet<String>;

    /// Packages to install in the build environment.
    fn get_build_packages(&self) -> HashSet<String>;

    /// Environment variables to set for the build step.
    fn get_build_environment(&self) -> HashMap<String, String>;

    /// Ordered shell commands to run during the build step.
    fn get_build_commands(&self) -> Result<Vec<String>, PluginError>;
}
