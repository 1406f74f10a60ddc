//! Changed-file descriptors from a review change-set
//!
//! The shape mirrors the GitHub "pull request files" payload. Only `filename`
//! is required; everything else is carried along for output.

pub mod git;

pub use git::GitChanges;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Status of a file within a change-set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    Added,
    Removed,
    #[default]
    Modified,
    Renamed,
    Copied,
    Changed,
    Unchanged,
}

/// A file reported as changed by the change-set source
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChangedFile {
    /// Forward-slash path as delivered by the change-set source
    pub filename: String,

    #[serde(default)]
    pub status: ChangeStatus,

    #[serde(default)]
    pub additions: usize,

    #[serde(default)]
    pub deletions: usize,

    /// Unified diff hunk text, when the source provides it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<String>,
}

impl ChangedFile {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: ChangeStatus) -> Self {
        self.status = status;
        self
    }

    /// Removed files cannot be verified on disk
    pub fn is_removed(&self) -> bool {
        self.status == ChangeStatus::Removed
    }
}

/// Load a JSON array of changed-file descriptors
pub fn load_changed_files(path: &Path) -> Result<Vec<ChangedFile>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read changed files {}", path.display()))?;
    let files: Vec<ChangedFile> = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse changed files {}", path.display()))?;
    Ok(files)
}

impl AsRef<str> for ChangedFile {
    fn as_ref(&self) -> &str {
        &self.filename
    }
}
