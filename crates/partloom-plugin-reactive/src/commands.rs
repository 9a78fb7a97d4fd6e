//! Build command emission.
//!
//! Everything here is pure string computation: the returned commands are
//! executed later by the orchestrator, in its own sandbox.

use std::borrow::Cow;

use partloom_plugin::{PartInfo, PluginError};

use crate::properties::ReactivePluginProperties;

/// Inclusive lower bound of charm's warning exit-status band.
const WARNING_STATUS_MIN: i32 = 100;
/// Exclusive upper bound of charm's warning exit-status band.
const WARNING_STATUS_MAX: i32 = 200;

/// Shell function wrapping every charm invocation in the build step.
///
/// Applies the same status mapping as [`classify`]: success and
/// warnings let the build continue, any other status is echoed to
/// stderr and returned, failing the build step.
pub const RUN_CHARM_FUNCTION: &str = r#"run_charm(){
    set +e
    charm $@
    retcode=$?
    set -e
    if (( $retcode == 0 )); then
        echo "charm $1 result: SUCCESS"
        return 0
    elif (( 100 <= $retcode && $retcode < 200 )); then
        echo "charm $1 result: WARNING ($retcode)" >&2
        return 0
    else
        echo "charm $1 result: ERROR ($retcode)" >&2
        return $retcode
    fi
}
"#;

/// Outcome of a charm invocation, keyed on its exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharmOutcome {
    /// Exit status 0.
    Success,
    /// Exit status in `[100, 200)`; reported but the build continues.
    Warning(i32),
    /// Any other non-zero exit status; fails the build step.
    Error(i32),
}

/// Classify a charm exit status into its three-tier outcome.
pub fn classify(exit_status: i32) -> CharmOutcome {
    match exit_status {
        0 => CharmOutcome::Success,
        code if (WARNING_STATUS_MIN..WARNING_STATUS_MAX).contains(&code) => {
            CharmOutcome::Warning(code)
        }
        code => CharmOutcome::Error(code),
    }
}

/// Re-split the configured build arguments into shell words and re-quote
/// them into a single argument string.
///
/// The list-of-strings config schema colocates an option with its value
/// in one entry; splitting sends them to charm as separate tokens, and
/// the re-quote keeps any token containing metacharacters a single
/// literal argument.
fn charm_build_args(arguments: &[String]) -> Result<String, PluginError> {
    let mut tokens: Vec<String> = Vec::new();
    for argument in arguments {
        let words = shlex::split(argument)
            .ok_or_else(|| PluginError::InvalidBuildArgument(argument.clone()))?;
        tokens.extend(words);
    }

    let quoted = tokens
        .iter()
        .map(|token| {
            shlex::try_quote(token)
                .map(Cow::into_owned)
                .map_err(|_| PluginError::InvalidBuildArgument(token.clone()))
        })
        .collect::<Result<Vec<_>, PluginError>>()?;

    Ok(quoted.join(" "))
}

/// Ordered shell commands for the reactive build step.
///
/// charm writes its output into a directory named after the project, so
/// a symlink redirects that location into the part's install dir for
/// the duration of the build. Cleanup of the link is best-effort: it is
/// a plain sequential command, skipped if the build line aborts the
/// enclosing shell session.
pub fn build_commands(
    properties: &ReactivePluginProperties,
    part_info: &PartInfo,
) -> Result<Vec<String>, PluginError> {
    let command_args = charm_build_args(&properties.reactive_charm_build_arguments)?;
    let output_dir = part_info.part_build_dir.join(&part_info.project_name);

    Ok(vec![
        RUN_CHARM_FUNCTION.to_string(),
        "run_charm proof".to_string(),
        format!(
            "ln -sf {} {}",
            part_info.part_install_dir.display(),
            output_dir.display()
        ),
        format!(
            "run_charm build {command_args} -o {}",
            part_info.part_build_dir.display()
        ),
        format!("rm -f {}", output_dir.display()),
    ])
}
