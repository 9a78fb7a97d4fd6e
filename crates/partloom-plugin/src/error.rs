//! Plugin error types.
//!
//! Defines [`PluginError`], the unified error type for plugin operations,
//! plus [`EnvironmentValidationError`], the typed failure an environment
//! validator raises before a build starts.

use thiserror::Error;

/// A part's build environment was rejected by its plugin's validator.
///
/// Carries the owning part's name and a human-readable reason; the
/// orchestrator surfaces both to the user and does not retry.
#[derive(Debug, Error)]
#[error("environment validation failed for part {part_name:?}: {reason}")]
pub struct EnvironmentValidationError {
    /// The part whose build environment was being validated.
    pub part_name: String,

    /// Why the environment was rejected.
    pub reason: String,
}

/// Errors produced by plugin operations.
#[derive(Debug, Error)]
pub enum PluginError {
    /// Plugin properties failed strict validation (missing required key,
    /// unrecognized key, or wrong value type).
    #[error("invalid plugin properties: {0}")]
    Properties(#[from] serde_json::Error),

    /// The build environment was rejected before the build step ran.
    #[error("{0}")]
    EnvironmentValidation(#[from] EnvironmentValidationError),

    /// A configured build argument could not be split into shell words.
    #[error("invalid build argument: {0:?}")]
    InvalidBuildArgument(String),
}
