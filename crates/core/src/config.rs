//! Configuration file parsing for .prkey.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::module::{file_dir, Module};

pub const CONFIG_FILE: &str = ".prkey.toml";

/// Main configuration structure for .prkey.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrkeyConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub filter: FilterConfig,

    /// Inline module descriptors, used when no manifest is passed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<Module>,

    #[serde(default)]
    pub github: GitHubConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Branch label written into every component key
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Default diff base for local git runs
    #[serde(default = "default_diff_base")]
    pub diff_base: String,

    /// Severity threshold for non-zero exit code
    #[serde(default = "default_fail_on")]
    pub fail_on: String,
}

/// Optional pre-match filter. Both lists empty means every file is matched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Extensions to keep, with leading dot (e.g. `[".java"]`)
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Glob patterns of paths to drop (e.g. `["**/generated/**"]`)
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// REST API root, override for GitHub Enterprise
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,

    /// Enable color output
    #[serde(default = "default_true")]
    pub color: bool,
}

// Default functions
fn default_branch() -> String {
    "main".to_string()
}

fn default_diff_base() -> String {
    "main".to_string()
}

fn default_fail_on() -> String {
    "never".to_string()
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_format() -> String {
    "terminal".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            branch: default_branch(),
            diff_base: default_diff_base(),
            fail_on: default_fail_on(),
        }
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            color: true,
        }
    }
}

impl PrkeyConfig {
    /// Load configuration from a file.
    ///
    /// Relative module base directories are resolved against the file's directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config: PrkeyConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        let root = file_dir(path)?;
        config.modules = config
            .modules
            .into_iter()
            .map(|m| m.resolved_against(&root))
            .collect();
        Ok(config)
    }

    /// Find and load .prkey.toml from the current directory or ancestors
    pub fn find_and_load(start_dir: &Path) -> Result<Self> {
        let mut current = start_dir;

        loop {
            let config_path = current.join(CONFIG_FILE);
            if config_path.exists() {
                return Self::from_file(&config_path);
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        // No config found, use defaults
        Ok(Self::default())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
