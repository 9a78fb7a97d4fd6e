//! Per-part build context handed to plugins.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Paths and names for one part's build step.
///
/// Owned by the orchestrator and read-only to plugins: a plugin only
/// formats these into command strings, it never creates or mutates the
/// directories itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartInfo {
    /// Name of the part being built.
    pub part_name: String,

    /// Directory the part's build step runs in.
    pub part_build_dir: PathBuf,

    /// Directory the part's build output is staged into.
    pub part_install_dir: PathBuf,

    /// Name of the enclosing project.
    pub project_name: String,
}
