//! Properties used to pack reactive charms with charm-tools.

use serde::Deserialize;
use serde_json::Value;

use partloom_plugin::{PluginError, PluginProperties, extract_plugin_properties};

/// User-supplied configuration for the reactive plugin.
///
/// Parsed strictly: `source` is mandatory and any unrecognized key
/// scoped to this plugin is a validation error.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ReactivePluginProperties {
    /// Filesystem path or VCS locator of the charm source.
    pub source: String,

    /// Extra arguments for `charm build`.
    ///
    /// The list-of-strings config schema colocates an option with its
    /// value in one entry; entries are re-split into shell words before
    /// they reach the command line.
    #[serde(default)]
    pub reactive_charm_build_arguments: Vec<String>,
}

impl PluginProperties for ReactivePluginProperties {
    /// Populate reactive plugin properties from the part specification.
    fn unmarshal(data: &Value) -> Result<Self, PluginError> {
        let plugin_data = extract_plugin_properties(data, "reactive", &["source"]);
        let properties = serde_json::from_value(plugin_data)?;
        Ok(properties)
    }
}
