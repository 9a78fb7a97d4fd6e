//! Execution-environment checks for the reactive plugin.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use partloom_plugin::{
    COMMAND_NOT_FOUND, EnvironmentValidationError, EnvironmentValidator, ProbeError,
};

/// External CLI package the plugin wraps, and the literal part name
/// that may supply it.
const TOOL_NAME: &str = "charm-tools";

/// Checks the build environment for a working charm-tools install.
///
/// Runs `charm version --format json` in the prepared environment and
/// requires a `charm-tools` entry carrying `version` and `git` fields.
/// A missing `charm` executable is tolerated only when the part depends
/// on a sibling part named `charm-tools`, which will build the tool
/// before this part's build step runs.
pub struct ReactivePluginEnvironmentValidator {
    part_name: String,
    env: String,
}

impl ReactivePluginEnvironmentValidator {
    /// Create a validator for the named part and its environment setup script.
    pub fn new(part_name: impl Into<String>, env: impl Into<String>) -> Self {
        Self {
            part_name: part_name.into(),
            env: env.into(),
        }
    }

    fn error(&self, reason: impl Into<String>) -> EnvironmentValidationError {
        EnvironmentValidationError {
            part_name: self.part_name.clone(),
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl EnvironmentValidator for ReactivePluginEnvironmentValidator {
    fn part_name(&self) -> &str {
        &self.part_name
    }

    fn env(&self) -> &str {
        &self.env
    }

    async fn validate_environment(
        &self,
        part_dependencies: Option<&[String]>,
    ) -> Result<(), EnvironmentValidationError> {
        match self.execute("charm version --format json").await {
            Ok(stdout) => {
                let version_data: Value = serde_json::from_str(&stdout)
                    .map_err(|_| self.error("invalid charm tools installed"))?;

                let tools = &version_data[TOOL_NAME];
                let (Some(version), Some(git)) =
                    (tools["version"].as_str(), tools["git"].as_str())
                else {
                    return Err(
                        self.error(format!("invalid charm tools version {version_data}"))
                    );
                };

                info!("found {TOOL_NAME} {version} ({git})");
                Ok(())
            }
            Err(ProbeError::ExitStatus {
                code: COMMAND_NOT_FOUND,
                ..
            }) => {
                let tool_part_declared = part_dependencies
                    .is_some_and(|deps| deps.iter().any(|dep| dep == TOOL_NAME));
                if tool_part_declared {
                    // The charm-tools part builds first and supplies the
                    // executable before this part's build step runs.
                    return Ok(());
                }
                warn!(part = %self.part_name, "charm tool not found in the build environment");
                Err(self.error(format!(
                    "charm tool not found and part '{}' does not depend on a part named '{TOOL_NAME}'",
                    self.part_name
                )))
            }
            Err(ProbeError::ExitStatus { code, .. }) => {
                Err(self.error(format!("charm tools failed with error code {code}")))
            }
            Err(ProbeError::Spawn(err)) => {
                Err(self.error(format!("failed to probe charm tools: {err}")))
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;

    /// Write a fake `charm` executable into `dir` with the given body.
    fn fake_charm(dir: &Path, body: &str) {
        let path = dir.join("charm");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    fn path_env(dir: &Path) -> String {
        format!("PATH={}", dir.display())
    }

    #[tokio::test]
    async fn validate_accepts_working_charm_tools() {
        let bin_dir = TempDir::new().unwrap();
        fake_charm(
            bin_dir.path(),
            r#"echo '{"charm-tools": {"version": "2.8.4", "git": "+git-7-6126e17", "gitn": 7, "gitsha": "6126e17", "pre_release": false, "snap": "+snap-x12"}}'"#,
        );
        let validator =
            ReactivePluginEnvironmentValidator::new("my-part", path_env(bin_dir.path()));
        validator.validate_environment(None).await.unwrap();
    }

    #[tokio::test]
    async fn validate_tolerates_missing_charm_with_tool_part_declared() {
        let validator = ReactivePluginEnvironmentValidator::new("my-part", "PATH=/foo");
        validator
            .validate_environment(Some(&["charm-tools".to_string()]))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn validate_rejects_missing_charm_without_tool_part() {
        let validator = ReactivePluginEnvironmentValidator::new("my-part", "PATH=/foo");
        let err = validator.validate_environment(None).await.unwrap_err();
        assert_eq!(err.part_name, "my-part");
        assert_eq!(
            err.reason,
            "charm tool not found and part 'my-part' does not depend on a part named 'charm-tools'"
        );
    }

    #[tokio::test]
    async fn validate_rejects_missing_charm_with_unrelated_dependencies() {
        let validator = ReactivePluginEnvironmentValidator::new("my-part", "PATH=/foo");
        let err = validator
            .validate_environment(Some(&["other-part".to_string()]))
            .await
            .unwrap_err();
        assert!(err.reason.contains("charm tool not found"), "{err}");
    }

    #[tokio::test]
    async fn validate_embeds_nonzero_exit_code() {
        let bin_dir = TempDir::new().unwrap();
        fake_charm(bin_dir.path(), "exit 1");
        let validator =
            ReactivePluginEnvironmentValidator::new("my-part", path_env(bin_dir.path()));
        let err = validator.validate_environment(None).await.unwrap_err();
        assert_eq!(err.reason, "charm tools failed with error code 1");
    }

    #[tokio::test]
    async fn validate_rejects_unparseable_version_output() {
        let bin_dir = TempDir::new().unwrap();
        fake_charm(bin_dir.path(), "echo 'not json at all'");
        let validator =
            ReactivePluginEnvironmentValidator::new("my-part", path_env(bin_dir.path()));
        let err = validator.validate_environment(None).await.unwrap_err();
        assert_eq!(err.reason, "invalid charm tools installed");
    }

    #[tokio::test]
    async fn validate_rejects_version_json_missing_git_field() {
        let bin_dir = TempDir::new().unwrap();
        fake_charm(
            bin_dir.path(),
            r#"echo '{"charm-tools": {"version": "2.8.4"}}'"#,
        );
        let validator =
            ReactivePluginEnvironmentValidator::new("my-part", path_env(bin_dir.path()));
        let err = validator.validate_environment(None).await.unwrap_err();
        assert!(err.reason.starts_with("invalid charm tools version"), "{err}");
        assert!(err.reason.contains("2.8.4"), "{err}");
    }

    #[tokio::test]
    async fn validate_rejects_version_json_without_tool_entry() {
        let bin_dir = TempDir::new().unwrap();
        fake_charm(bin_dir.path(), r#"echo '{"something-else": {}}'"#);
        let validator =
            ReactivePluginEnvironmentValidator::new("my-part", path_env(bin_dir.path()));
        let err = validator.validate_environment(None).await.unwrap_err();
        assert!(err.reason.starts_with("invalid charm tools version"), "{err}");
    }
}
