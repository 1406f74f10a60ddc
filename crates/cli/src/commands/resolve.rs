//! Resolve command — single lookup in either direction

use anyhow::{bail, Result};
use serde::Serialize;

use super::{ExitStatus, RunContext};
use crate::{Cli, OutputFormat};

#[derive(Debug, Serialize)]
struct Resolved<'a> {
    key: &'a str,
    path: &'a str,
}

pub fn run(query: &str, cli: &Cli) -> Result<ExitStatus> {
    let ctx = RunContext::load(None, cli)?;
    let index = ctx.build_index(cli)?;

    let resolved = if let Some(path) = index.path_for_key(query) {
        Resolved { key: query, path }
    } else if let Some(key) = index.key_for_path(query) {
        Resolved {
            key: key.as_str(),
            path: query,
        }
    } else {
        bail!("'{}' is neither an indexed component key nor an indexed path", query);
    };

    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&resolved)?),
        _ => println!("{} -> {}", resolved.key, resolved.path),
    }

    Ok(ExitStatus::Success)
}
