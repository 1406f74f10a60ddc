//! Map command — list component keys for the changed files

use anyhow::Result;
use std::path::Path;
use std::time::Instant;

use super::{ExitStatus, RunContext};
use crate::output;
use crate::{Cli, OutputFormat};

pub fn run(path: Option<&Path>, cli: &Cli) -> Result<ExitStatus> {
    let start = Instant::now();
    let ctx = RunContext::load(path, cli)?;
    let index = ctx.build_index(cli)?;

    match ctx.format {
        OutputFormat::Json => output::json::print_index(&index)?,
        _ => output::terminal::print_index(&index, start),
    }

    Ok(ExitStatus::Success)
}
