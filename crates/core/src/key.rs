//! Component keys: `group:artifact:branch:relativePath`

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::path::Path;

use crate::error::KeyError;
use crate::module::{normalize_separators, Module};

/// Identifier the analysis service uses to address one file of one module
/// on one branch
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentKey(String);

/// The four fields of a component key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyParts<'a> {
    pub group_id: &'a str,
    pub artifact_id: &'a str,
    pub branch: &'a str,
    pub relative_path: &'a str,
}

impl ComponentKey {
    pub fn new(group_id: &str, artifact_id: &str, branch: &str, relative_path: &str) -> Self {
        Self(format!(
            "{}:{}:{}:{}",
            group_id, artifact_id, branch, relative_path
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into fields. The relative path keeps any further colons.
    pub fn parts(&self) -> Option<KeyParts<'_>> {
        let mut it = self.0.splitn(4, ':');
        Some(KeyParts {
            group_id: it.next()?,
            artifact_id: it.next()?,
            branch: it.next()?,
            relative_path: it.next()?,
        })
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ComponentKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ComponentKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Borrow<str> for ComponentKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Compose the component key for a file the matcher resolved under `module`.
///
/// `resolved` must contain the module's base directory; the matcher builds
/// it that way. Anything else is a [`KeyError`].
pub fn build_key(
    module: &Module,
    resolved: &Path,
    branch: &str,
) -> Result<ComponentKey, KeyError> {
    let base = module.normalized_base_dir();
    let full = normalize_separators(&resolved.to_string_lossy());

    let idx = full.find(&base).ok_or_else(|| KeyError::BaseDirNotInPath {
        base_dir: base.clone(),
        resolved: resolved.to_path_buf(),
    })?;

    let rest = &full[idx + base.len()..];
    let relative = rest.strip_prefix('/').unwrap_or(rest);
    if relative.is_empty() {
        return Err(KeyError::EmptyRelativePath {
            base_dir: base,
            resolved: resolved.to_path_buf(),
        });
    }

    Ok(ComponentKey::new(
        &module.group_id,
        &module.artifact_id,
        branch,
        relative,
    ))
}
