//! Reactive charm build plugin for partloom.
//!
//! Packs reactive charms with the external charm-tools CLI. The plugin
//! declares the part properties it accepts, checks that a compatible
//! `charm` executable is reachable before the build step is scheduled,
//! and emits the shell commands the orchestrator runs in its own
//! sandbox.
//!
//! # Probe contract
//!
//! `charm version --format json` must print a JSON object with a
//! `charm-tools` entry carrying `version` and `git` fields. A missing
//! executable is tolerated only when the part depends on a sibling part
//! named `charm-tools`; that part then supplies the tool before the
//! build step runs.

pub mod commands;
pub mod properties;
pub mod validator;

use std::collections::{HashMap, HashSet};

use partloom_plugin::{PartInfo, Plugin, PluginError};

pub use commands::{CharmOutcome, RUN_CHARM_FUNCTION, classify};
pub use properties::ReactivePluginProperties;
pub use validator::ReactivePluginEnvironmentValidator;

/// Build a reactive charm using charm-tools.
pub struct ReactivePlugin {
    options: ReactivePluginProperties,
    part_info: PartInfo,
}

impl ReactivePlugin {
    /// Create the plugin from one part's validated properties and paths.
    pub fn new(options: ReactivePluginProperties, part_info: PartInfo) -> Self {
        Self { options, part_info }
    }
}

impl Plugin for ReactivePlugin {
    fn get_build_snaps(&self) -> HashSet<String> {
        HashSet::new()
    }

    fn get_build_packages(&self) -> HashSet<String> {
        HashSet::new()
    }

    fn get_build_environment(&self) -> HashMap<String, String> {
        // Cryptography fails to load the OpenSSL legacy provider in some
        // environments; the legacy provider is not needed here.
        HashMap::from([(
            "CRYPTOGRAPHY_OPENSSL_NO_LEGACY".to_string(),
            "true".to_string(),
        )])
    }

    fn get_build_commands(&self) -> Result<Vec<String>, PluginError> {
        commands::build_commands(&self.options, &self.part_info)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use partloom_plugin::PluginProperties;
    use serde_json::json;

    use super::*;

    fn plugin() -> ReactivePlugin {
        let spec = json!({
            "plugin": "reactive",
            "source": "/work/charm",
            "reactive-charm-build-arguments": [
                "--charm-argument",
                "--charm-argument-with argument",
            ],
        });
        let properties = ReactivePluginProperties::unmarshal(&spec).unwrap();
        let part_info = PartInfo {
            part_name: "foo".into(),
            part_build_dir: PathBuf::from("/work/parts/foo/build"),
            part_install_dir: PathBuf::from("/work/parts/foo/install"),
            project_name: "fake-project".into(),
        };
        ReactivePlugin::new(properties, part_info)
    }

    #[test]
    fn no_build_snaps() {
        assert!(plugin().get_build_snaps().is_empty());
    }

    #[test]
    fn no_build_packages() {
        assert!(plugin().get_build_packages().is_empty());
    }

    #[test]
    fn build_environment_disables_openssl_legacy_provider() {
        let env = plugin().get_build_environment();
        assert_eq!(
            env,
            HashMap::from([(
                "CRYPTOGRAPHY_OPENSSL_NO_LEGACY".to_string(),
                "true".to_string()
            )])
        );
    }

    #[test]
    fn build_commands_match_the_documented_sequence() {
        assert_eq!(
            plugin().get_build_commands().unwrap(),
            vec![
                RUN_CHARM_FUNCTION.to_string(),
                "run_charm proof".to_string(),
                "ln -sf /work/parts/foo/install /work/parts/foo/build/fake-project".to_string(),
                "run_charm build --charm-argument --charm-argument-with argument \
                 -o /work/parts/foo/build"
                    .to_string(),
                "rm -f /work/parts/foo/build/fake-project".to_string(),
            ]
        );
    }

    #[test]
    fn plugin_works_as_a_trait_object() {
        let plugin: Box<dyn Plugin> = Box::new(plugin());
        assert_eq!(plugin.get_build_commands().unwrap().len(), 5);
    }
}
