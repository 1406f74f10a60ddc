//! GitHub Actions workflow command output format
//!
//! Produces `::error`, `::warning`, and `::notice` annotations for inline PR feedback.

use prkey_core::{AttachedFinding, Severity};

use crate::github::review_path;

/// Format an attached finding as a GitHub Actions workflow command.
///
/// See: https://docs.github.com/en/actions/using-workflows/workflow-commands-for-github-actions
pub fn format_finding(attached: &AttachedFinding) -> String {
    let finding = &attached.finding;
    let level = match finding.severity {
        Severity::Blocker | Severity::Critical => "error",
        Severity::Major | Severity::Minor => "warning",
        Severity::Info => "notice",
    };

    let location = match finding.line {
        Some(line) => format!("file={},line={}", review_path(&attached.path), line),
        None => format!("file={}", review_path(&attached.path)),
    };

    format!(
        "::{level} {location},title={rule}::{msg}",
        level = level,
        location = location,
        rule = finding.rule,
        msg = finding.message,
    )
}
