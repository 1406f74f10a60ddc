//! Optional pre-match file filter
//!
//! Off by default. When configured, files whose extension is not listed or
//! whose path matches an exclude glob never reach the matcher.

use anyhow::{Context, Result};
use glob::Pattern;
use std::path::Path;

use crate::config::FilterConfig;

/// Extension allow-list plus glob exclude list
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    extensions: Vec<String>,
    exclude: Vec<Pattern>,
}

impl FileFilter {
    /// A filter that accepts every path
    pub fn accept_all() -> Self {
        Self::default()
    }

    /// Build a filter from the `[filter]` config section
    pub fn from_config(config: &FilterConfig) -> Result<Self> {
        Self::new(&config.extensions, &config.exclude)
    }

    /// `extensions` are in the form `[".java", ".kt"]`
    pub fn new(extensions: &[String], exclude: &[String]) -> Result<Self> {
        let exclude = exclude
            .iter()
            .map(|p| Pattern::new(p).with_context(|| format!("Invalid exclude pattern '{}'", p)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            extensions: extensions.to_vec(),
            exclude,
        })
    }

    /// True when neither extensions nor excludes are configured
    pub fn is_disabled(&self) -> bool {
        self.extensions.is_empty() && self.exclude.is_empty()
    }

    pub fn accepts(&self, path: &str) -> bool {
        if !self.extensions.is_empty() && !has_extension(path, &self.extensions) {
            return false;
        }

        let relative = path.trim_start_matches('/');
        !self.exclude.iter().any(|p| p.matches(relative))
    }
}

fn has_extension(path: &str, extensions: &[String]) -> bool {
    let ext = match Path::new(path).extension().and_then(|e| e.to_str()) {
        Some(e) => e,
        None => return false,
    };
    let with_dot = format!(".{}", ext);
    extensions.iter().any(|e| *e == with_dot)
}
