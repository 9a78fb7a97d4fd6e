//! Plugin properties parsing.
//!
//! A part's raw configuration mixes orchestrator-level keys (`plugin`,
//! `after`, ...) with plugin-scoped keys. [`extract_plugin_properties`]
//! scopes that mapping down to one plugin's keys, and each plugin's
//! properties type implements [`PluginProperties`] to strictly parse
//! the result.

use serde_json::{Map, Value};

use crate::error::PluginError;

/// Validated, immutable build-time properties of one plugin.
///
/// Constructed once per part configuration load and discarded with the
/// orchestrator's configuration model.
pub trait PluginProperties: Sized + Send + Sync {
    /// Populate plugin properties from the part specification.
    ///
    /// `data` is the part's full configuration mapping; implementations
    /// scope it with [`extract_plugin_properties`] before parsing, so
    /// orchestrator-level keys never count as unknown plugin keys.
    fn unmarshal(data: &Value) -> Result<Self, PluginError>;
}

/// Extract the subset of a part's configuration that belongs to one plugin.
///
/// Selects keys prefixed with `"<plugin_name>-"` plus the `required`
/// passthrough keys (typically `source`). All other keys are the
/// orchestrator's business and are left out of the result, so a strict
/// parse of the returned mapping rejects exactly the unrecognized keys
/// scoped to this plugin.
pub fn extract_plugin_properties(data: &Value, plugin_name: &str, required: &[&str]) -> Value {
    let prefix = format!("{plugin_name}-");
    let mut plugin_data = Map::new();
    if let Some(map) = data.as_object() {
        for (key, value) in map {
            if key.starts_with(&prefix) || required.contains(&key.as_str()) {
                plugin_data.insert(key.clone(), value.clone());
            }
        }
    }
    Value::Object(plugin_data)
}
