//! GitHub pull request integration.
//!
//! Fetches the changed files of a pull request and posts attached findings
//! as inline review comments via the GitHub REST API.
//!
//! Environment variables (all standard GitHub Actions variables):
//! - `GITHUB_TOKEN`      — Personal access token or `secrets.GITHUB_TOKEN`
//! - `GITHUB_REPOSITORY` — `owner/repo` (e.g. `acme/myapp`)
//! - `GITHUB_PR_NUMBER`  — Pull request number, unless `--pr` is given
//! - `GITHUB_SHA`        — HEAD commit being reviewed, needed for posting
//!
//! Usage in a workflow:
//! ```yaml
//! - run: prkey annotate findings.json --post --modules modules.json
//!   env:
//!     GITHUB_TOKEN: ${{ secrets.GITHUB_TOKEN }}
//!     GITHUB_PR_NUMBER: ${{ github.event.number }}
//! ```

use anyhow::{bail, Context, Result};
use prkey_core::{AttachedFinding, ChangedFile, Severity};
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Marker embedded in every comment body so we can detect existing prkey
/// comments on re-runs.
const MARKER_PREFIX: &str = "<!-- prkey:";

const PER_PAGE: usize = 100;

/// Context needed to call the GitHub API.
#[derive(Debug, Clone)]
pub struct GitHubContext {
    pub api_url: String,
    pub token: String,
    pub owner: String,
    pub repo: String,
    pub pr_number: u64,
    pub commit_sha: Option<String>,
}

impl GitHubContext {
    /// Build context from environment variables set by GitHub Actions.
    ///
    /// `pr_number` overrides `GITHUB_PR_NUMBER`. Returns `None` if a required
    /// variable is missing.
    pub fn from_env(api_url: &str, pr_number: Option<u64>) -> Option<Self> {
        let token = std::env::var("GITHUB_TOKEN").ok()?;
        let repository = std::env::var("GITHUB_REPOSITORY").ok()?;
        let pr_number = match pr_number {
            Some(n) => n,
            None => std::env::var("GITHUB_PR_NUMBER")
                .ok()?
                .trim()
                .parse()
                .ok()?,
        };
        let commit_sha = std::env::var("GITHUB_SHA")
            .or_else(|_| std::env::var("GITHUB_HEAD_SHA"))
            .ok();

        let (owner, repo) = repository.split_once('/')?;

        Some(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
            owner: owner.to_string(),
            repo: repo.to_string(),
            pr_number,
            commit_sha,
        })
    }

    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_url, self.owner, self.repo, path
        )
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }
}

// ── GitHub API types ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ExistingComment {
    body: String,
}

#[derive(Serialize)]
struct NewComment<'a> {
    body: String,
    commit_id: &'a str,
    path: &'a str,
    line: usize,
    side: &'static str,
}

/// Outcome of a posting run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostStats {
    pub posted: usize,
    /// File-level findings; review comments need a line
    pub skipped_no_line: usize,
    pub skipped_duplicate: usize,
}

// ── Public API ───────────────────────────────────────────────────────────────

/// Fetch every changed file of the pull request, following pagination.
pub fn fetch_pr_files(ctx: &GitHubContext) -> Result<Vec<ChangedFile>> {
    let client = client()?;
    let resource = format!("pulls/{}/files", ctx.pr_number);
    let files: Vec<ChangedFile> = get_all_pages(&client, ctx, &resource, "pull request files")?;

    tracing::debug!(count = files.len(), pr = ctx.pr_number, "fetched pull request files");
    Ok(files)
}

/// URL of one page of a paginated pull request resource
pub fn page_url(ctx: &GitHubContext, resource: &str, page: usize) -> String {
    ctx.api_url(&format!("{}?per_page={}&page={}", resource, PER_PAGE, page))
}

/// A short page ends the listing
pub fn is_last_page(len: usize) -> bool {
    len < PER_PAGE
}

/// Post attached findings as inline review comments.
///
/// Skips file-level findings and deduplicates against already-existing
/// prkey comments (identified by the `<!-- prkey:ID -->` marker).
pub fn post_review_comments(findings: &[AttachedFinding], ctx: &GitHubContext) -> Result<PostStats> {
    let commit_sha = ctx
        .commit_sha
        .as_deref()
        .context("GITHUB_SHA must be set to post review comments")?;
    let client = client()?;

    let existing = fetch_existing_comments(&client, ctx)?;
    let existing_ids: HashSet<String> = existing
        .iter()
        .filter_map(|c| extract_marker(&c.body))
        .collect();

    let mut stats = PostStats::default();

    for attached in findings {
        let Some(line) = attached.finding.line else {
            stats.skipped_no_line += 1;
            continue;
        };

        if existing_ids.contains(&marker_id(attached)) {
            stats.skipped_duplicate += 1;
            continue;
        }

        let comment = NewComment {
            body: format_comment_body(attached),
            commit_id: commit_sha,
            path: review_path(&attached.path),
            line,
            side: "RIGHT",
        };

        match post_comment(&client, ctx, &comment) {
            Ok(()) => stats.posted += 1,
            Err(e) => {
                // One bad comment does not fail the run
                tracing::warn!(
                    rule = %attached.finding.rule,
                    path = %attached.path,
                    line,
                    "failed to post comment: {e:#}"
                );
            }
        }
    }

    Ok(stats)
}

/// Render a finding as a review comment body with its dedup marker.
pub fn format_comment_body(attached: &AttachedFinding) -> String {
    let finding = &attached.finding;
    let severity_emoji = match finding.severity {
        Severity::Blocker | Severity::Critical => "🔴",
        Severity::Major | Severity::Minor => "🟡",
        Severity::Info => "🔵",
    };

    format!(
        "{} **{}** [{}]: {}\n\n{}{} -->",
        severity_emoji,
        finding.severity,
        finding.rule,
        finding.message,
        MARKER_PREFIX,
        marker_id(attached)
    )
}

/// Extract the marker ID from a comment body, if present.
pub fn extract_marker(body: &str) -> Option<String> {
    let start = body.find(MARKER_PREFIX)? + MARKER_PREFIX.len();
    let rest = &body[start..];
    let end = rest.find(" -->")?;
    Some(rest[..end].to_string())
}

/// Paths in review comments are repository-relative
pub fn review_path(path: &str) -> &str {
    path.trim_start_matches('/')
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn marker_id(attached: &AttachedFinding) -> String {
    let finding = &attached.finding;
    format!(
        "{}@{}:{}",
        finding.rule,
        finding.component,
        finding.line.unwrap_or(0)
    )
}

fn client() -> Result<Client> {
    Client::builder()
        .user_agent(concat!("prkey-cli/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}

fn fetch_existing_comments(client: &Client, ctx: &GitHubContext) -> Result<Vec<ExistingComment>> {
    let resource = format!("pulls/{}/comments", ctx.pr_number);
    get_all_pages(client, ctx, &resource, "existing PR comments")
}

fn get_all_pages<T: DeserializeOwned>(
    client: &Client,
    ctx: &GitHubContext,
    resource: &str,
    what: &str,
) -> Result<Vec<T>> {
    let mut items = Vec::new();

    for page in 1.. {
        let resp = ctx
            .authorized(client.get(page_url(ctx, resource, page)))
            .send()
            .with_context(|| format!("Failed to fetch {}", what))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().unwrap_or_default();
            bail!("GitHub API error {}: {}", status, text);
        }

        let batch: Vec<T> = resp
            .json()
            .with_context(|| format!("Failed to parse {}", what))?;
        let done = is_last_page(batch.len());
        items.extend(batch);
        if done {
            break;
        }
    }

    Ok(items)
}

fn post_comment(client: &Client, ctx: &GitHubContext, comment: &NewComment) -> Result<()> {
    let url = ctx.api_url(&format!("pulls/{}/comments", ctx.pr_number));

    let resp = ctx
        .authorized(client.post(&url))
        .json(comment)
        .send()
        .context("Failed to post PR comment")?;

    if !resp.status().is_success() {
        let status = resp.status();
        let text = resp.text().unwrap_or_default();
        bail!("GitHub API error {}: {}", status, text);
    }

    Ok(())
}
