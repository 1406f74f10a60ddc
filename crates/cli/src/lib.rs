//! prkey CLI library — exposed for integration tests

pub mod commands;
pub mod github;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "prkey")]
#[command(about = "Map pull request files to build-module component keys", long_about = None)]
#[command(version = prkey_core::VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Module manifest (JSON array of {group_id, artifact_id, base_dir})
    #[arg(long, global = true)]
    pub modules: Option<PathBuf>,

    /// Changed files (JSON array with at least a "filename" field)
    #[arg(long, global = true, conflicts_with = "pr")]
    pub changes: Option<PathBuf>,

    /// Fetch changed files of this GitHub pull request
    #[arg(long, global = true)]
    pub pr: Option<u64>,

    /// Diff base for local git changes (default: from config)
    #[arg(long, global = true)]
    pub base: Option<String>,

    /// Branch label written into component keys
    #[arg(long, global = true)]
    pub branch: Option<String>,

    /// Only match files with these extensions (e.g. .java,.kt)
    #[arg(long, value_delimiter = ',', global = true)]
    pub only: Option<Vec<String>>,

    /// Output format
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Log every matching decision
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize .prkey.toml configuration
    Init {
        /// Path to initialize (default: current directory)
        path: Option<PathBuf>,
    },

    /// Build the component index and list key → path pairs (default command)
    Map {
        /// Repository root (default: current directory)
        path: Option<PathBuf>,
    },

    /// Look up a component key or a changed-file path
    Resolve {
        /// Component key or changed-file path
        query: String,
    },

    /// Attach analysis findings to changed files
    Annotate {
        /// Findings exported from the analysis service (JSON array)
        findings: PathBuf,

        /// Post findings as pull request review comments
        #[arg(long)]
        post: bool,

        /// Severity threshold for non-zero exit: blocker, critical, major, minor, info, never
        #[arg(long)]
        fail_on: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
    Github,
}
