//! CLI commands

pub mod annotate;
pub mod init;
pub mod map;
pub mod resolve;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use prkey_core::{
    load_changed_files, load_modules, ChangedFile, ComponentIndex, FileFilter, GitChanges,
    IndexBuilder, Module, PrkeyConfig, TracingObserver,
};
use std::path::{Path, PathBuf};

use crate::github::{self, GitHubContext};
use crate::{Cli, OutputFormat};

/// Process exit status of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    /// Findings reached the `fail_on` threshold
    Findings,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Findings => 1,
        }
    }
}

/// Everything a command needs before building the index
pub struct RunContext {
    pub repo_root: PathBuf,
    pub config: PrkeyConfig,
    pub format: OutputFormat,
}

impl RunContext {
    pub fn load(path: Option<&Path>, cli: &Cli) -> Result<Self> {
        let start = path.unwrap_or_else(|| Path::new("."));
        let repo_root = std::fs::canonicalize(start).unwrap_or_else(|_| start.to_path_buf());
        let config = PrkeyConfig::find_and_load(&repo_root)?;
        let format = resolve_format(cli, &config);

        Ok(Self {
            repo_root,
            config,
            format,
        })
    }

    pub fn branch(&self, cli: &Cli) -> String {
        cli.branch
            .clone()
            .unwrap_or_else(|| self.config.general.branch.clone())
    }

    /// `--modules` manifest first, then `[[modules]]` from the config
    pub fn modules(&self, cli: &Cli) -> Result<Vec<Module>> {
        let modules = match cli.modules {
            Some(ref manifest) => load_modules(manifest)?,
            None => self.config.modules.clone(),
        };
        if modules.is_empty() {
            bail!("No modules configured: pass --modules or add [[modules]] to .prkey.toml");
        }
        Ok(modules)
    }

    /// `--only` replaces the configured extension list
    pub fn filter(&self, cli: &Cli) -> Result<FileFilter> {
        let mut filter_config = self.config.filter.clone();
        if let Some(ref only) = cli.only {
            filter_config.extensions = only.clone();
        }
        FileFilter::from_config(&filter_config)
    }

    /// Changed files from `--changes`, `--pr`, or the local git diff, in
    /// that order. Removed files are dropped.
    pub fn changed_files(&self, cli: &Cli) -> Result<Vec<ChangedFile>> {
        let files = if let Some(ref path) = cli.changes {
            load_changed_files(path)?
        } else if cli.pr.is_some() {
            let ctx = GitHubContext::from_env(&self.config.github.api_url, cli.pr).context(
                "GITHUB_TOKEN and GITHUB_REPOSITORY must be set to fetch pull request files",
            )?;
            github::fetch_pr_files(&ctx)?
        } else {
            let base = cli
                .base
                .clone()
                .unwrap_or_else(|| self.config.general.diff_base.clone());
            GitChanges::new(&self.repo_root)?.changed_files(&base, None)?
        };

        Ok(files.into_iter().filter(|f| !f.is_removed()).collect())
    }

    /// Build the component index for this run
    pub fn build_index(&self, cli: &Cli) -> Result<ComponentIndex> {
        let modules = self.modules(cli)?;
        let files = self.changed_files(cli)?;
        let branch = self.branch(cli);

        eprint!(
            "  Matching {} changed files against {} modules... ",
            files.len(),
            modules.len()
        );
        let index = IndexBuilder::new(branch, modules)
            .filter(self.filter(cli)?)
            .observer(TracingObserver)
            .build_parallel(&files)
            .context("Failed to build component index")?;
        eprintln!("{} ({} keys)", "done".green(), index.len());

        Ok(index)
    }
}

pub fn resolve_format(cli: &Cli, config: &PrkeyConfig) -> OutputFormat {
    if let Some(f) = cli.format {
        return f;
    }
    match config.output.format.as_str() {
        "json" => OutputFormat::Json,
        "github" => OutputFormat::Github,
        _ => OutputFormat::Terminal,
    }
}
