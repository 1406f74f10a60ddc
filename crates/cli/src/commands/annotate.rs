//! Annotate command — attach component-keyed findings to changed files

use anyhow::{Context, Result};
use colored::Colorize;
use prkey_core::{attach_findings, load_findings, FindingSummary};
use std::path::Path;
use std::time::Instant;

use super::{ExitStatus, RunContext};
use crate::github::{self, GitHubContext};
use crate::output;
use crate::{Cli, OutputFormat};

pub fn run(
    findings_path: &Path,
    post: bool,
    fail_on: Option<&str>,
    cli: &Cli,
) -> Result<ExitStatus> {
    let start = Instant::now();
    let ctx = RunContext::load(None, cli)?;
    let index = ctx.build_index(cli)?;

    let findings = load_findings(findings_path)?;
    let (attached, unattached) = attach_findings(&index, findings);
    let summary = FindingSummary::from_findings(&attached, unattached.len());

    match ctx.format {
        OutputFormat::Json => output::json::print_findings(&attached, &unattached, &summary)?,
        OutputFormat::Github => {
            for finding in &attached {
                println!("{}", output::github::format_finding(finding));
            }
        }
        OutputFormat::Terminal => {
            output::terminal::print_findings(&attached, &summary, start);
        }
    }

    if post {
        let gh = GitHubContext::from_env(&ctx.config.github.api_url, cli.pr).context(
            "GITHUB_TOKEN, GITHUB_REPOSITORY and GITHUB_PR_NUMBER must be set to post comments",
        )?;
        let stats = github::post_review_comments(&attached, &gh)?;
        eprintln!(
            "  {} {} posted, {} without line, {} already present",
            "Comments:".bold(),
            stats.posted,
            stats.skipped_no_line,
            stats.skipped_duplicate
        );
    }

    let threshold = fail_on.unwrap_or(ctx.config.general.fail_on.as_str());
    if summary.exceeds_threshold(threshold) {
        return Ok(ExitStatus::Findings);
    }
    Ok(ExitStatus::Success)
}
