//! Build module descriptors
//!
//! A module is one unit of a multi-module build: an identity made of a group
//! and an artifact, plus the directory its own files live under. Modules are
//! read-only inputs; the list order is significant for tie-breaking.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A build module as exported by the build tool's project model
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Module {
    /// Group identifier (e.g. "com.example")
    pub group_id: String,

    /// Artifact identifier (e.g. "app-core")
    pub artifact_id: String,

    /// Absolute directory under which the module's files live
    pub base_dir: PathBuf,
}

impl Module {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        base_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            base_dir: base_dir.into(),
        }
    }

    /// Base directory as a string with forward slashes only
    pub fn normalized_base_dir(&self) -> String {
        normalize_separators(&self.base_dir.to_string_lossy())
    }

    /// `group:artifact`, used in log lines and listings
    pub fn coordinates(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }

    /// Make a relative base directory absolute against `root`
    pub fn resolved_against(mut self, root: &Path) -> Self {
        if self.base_dir.is_relative() {
            self.base_dir = root.join(&self.base_dir);
        }
        self
    }
}

/// Replace Windows separators with forward slashes
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Load a module manifest: a JSON array of module descriptors.
///
/// Relative base directories are resolved against the manifest's directory.
/// File order is preserved.
pub fn load_modules(path: &Path) -> Result<Vec<Module>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read module manifest {}", path.display()))?;
    let modules: Vec<Module> = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse module manifest {}", path.display()))?;

    let root = file_dir(path)?;
    Ok(modules
        .into_iter()
        .map(|m| m.resolved_against(&root))
        .collect())
}

/// Absolute directory containing `path`, even for a bare file name.
///
/// Base directories must be absolute: the matcher scores against them
/// character by character.
pub fn file_dir(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path)
        .with_context(|| format!("Failed to make {} absolute", path.display()))?;
    Ok(absolute
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or(absolute))
}
