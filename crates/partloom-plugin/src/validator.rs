//! Build-environment validation.
//!
//! A plugin may ship an [`EnvironmentValidator`] that the orchestrator
//! invokes once per part before scheduling the build step. Validators
//! probe the prepared environment with short external commands; they
//! mutate nothing.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::EnvironmentValidationError;

/// Exit status POSIX shells use when a command cannot be found.
pub const COMMAND_NOT_FOUND: i32 = 127;

/// Failure modes of an environment probe.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The shell running the probe could not be spawned.
    #[error("failed to spawn probe shell: {0}")]
    Spawn(#[from] std::io::Error),

    /// The probe exited with a non-zero status.
    #[error("probe exited with status {code}")]
    ExitStatus {
        /// Exit code; signal terminations are folded to `-1`.
        code: i32,
        /// Captured standard error.
        stderr: String,
    },
}

/// Checks a part's prepared build environment before the build starts.
///
/// The orchestrator constructs one validator per part with the part's
/// name and the environment setup script it will later prepend to the
/// build step itself.
#[async_trait]
pub trait EnvironmentValidator: Send + Sync {
    /// The part whose build environment is being validated.
    fn part_name(&self) -> &str;

    /// Environment setup script prepended to every probe command.
    fn env(&self) -> &str;

    /// Ensure the environment contains the dependencies the plugin needs.
    ///
    /// `part_dependencies` lists the parts this part depends on, when
    /// the orchestrator knows them.
    async fn validate_environment(
        &self,
        part_dependencies: Option<&[String]>,
    ) -> Result<(), EnvironmentValidationError>;

    /// Run `cmd` in the validator's environment and return its stdout.
    ///
    /// The command is executed as `bash -c` with the environment setup
    /// script prepended, matching how the orchestrator later runs the
    /// build commands themselves. A non-zero exit becomes
    /// [`ProbeError::ExitStatus`]; command-not-found surfaces as
    /// [`COMMAND_NOT_FOUND`].
    async fn execute(&self, cmd: &str) -> Result<String, ProbeError> {
        let script = format!("{}\n{}", self.env(), cmd);
        debug!(part = %self.part_name(), command = %cmd, "running environment probe");

        let output = Command::new("/bin/bash").arg("-c").arg(&script).output().await?;

        if !output.status.success() {
            return Err(ProbeError::ExitStatus {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
