//! Analysis findings addressed by component key, and their mapping back to
//! changed-file paths

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::index::ComponentIndex;
use crate::key::ComponentKey;

/// Severity as reported by the quality-analysis service
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[serde(alias = "BLOCKER")]
    Blocker,
    #[serde(alias = "CRITICAL")]
    Critical,
    #[serde(alias = "MAJOR")]
    Major,
    #[serde(alias = "MINOR")]
    Minor,
    #[serde(alias = "INFO")]
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Blocker => write!(f, "blocker"),
            Severity::Critical => write!(f, "critical"),
            Severity::Major => write!(f, "major"),
            Severity::Minor => write!(f, "minor"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A single finding from the analysis service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Component key of the file the finding is on
    pub component: ComponentKey,

    /// 1-based line, absent for file-level findings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,

    pub severity: Severity,

    /// Rule identifier (e.g. "java:S1481")
    pub rule: String,

    pub message: String,
}

/// A finding placed on a changed-file path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachedFinding {
    pub path: String,
    #[serde(flatten)]
    pub finding: Finding,
}

/// Counts per severity over attached findings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingSummary {
    pub blocker: usize,
    pub critical: usize,
    pub major: usize,
    pub minor: usize,
    pub info: usize,
    pub unattached: usize,
}

impl FindingSummary {
    pub fn from_findings(attached: &[AttachedFinding], unattached: usize) -> Self {
        let mut summary = Self {
            unattached,
            ..Default::default()
        };
        for a in attached {
            match a.finding.severity {
                Severity::Blocker => summary.blocker += 1,
                Severity::Critical => summary.critical += 1,
                Severity::Major => summary.major += 1,
                Severity::Minor => summary.minor += 1,
                Severity::Info => summary.info += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.blocker + self.critical + self.major + self.minor + self.info
    }

    /// Check whether attached findings reach the configured severity.
    ///
    /// `"never"` always passes; unknown values behave like `"blocker"`.
    pub fn exceeds_threshold(&self, fail_on: &str) -> bool {
        let threshold = match fail_on {
            "never" => return false,
            "critical" => Severity::Critical,
            "major" => Severity::Major,
            "minor" => Severity::Minor,
            "info" => Severity::Info,
            _ => Severity::Blocker,
        };
        self.count_at_least(threshold) > 0
    }

    fn count_at_least(&self, threshold: Severity) -> usize {
        [
            (Severity::Blocker, self.blocker),
            (Severity::Critical, self.critical),
            (Severity::Major, self.major),
            (Severity::Minor, self.minor),
            (Severity::Info, self.info),
        ]
        .iter()
        .filter(|(s, _)| *s <= threshold)
        .map(|(_, n)| n)
        .sum()
    }
}

/// Map findings back to changed-file paths.
///
/// Returns `(attached, unattached)`; a finding is unattached when its
/// component key is not in the index. Input order is preserved.
pub fn attach_findings(
    index: &ComponentIndex,
    findings: Vec<Finding>,
) -> (Vec<AttachedFinding>, Vec<Finding>) {
    let mut attached = Vec::new();
    let mut unattached = Vec::new();

    for finding in findings {
        match index.path_for_key(finding.component.as_str()) {
            Some(path) => attached.push(AttachedFinding {
                path: path.to_string(),
                finding,
            }),
            None => unattached.push(finding),
        }
    }

    (attached, unattached)
}

/// Load a JSON array of findings exported from the analysis service
pub fn load_findings(path: &Path) -> Result<Vec<Finding>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read findings {}", path.display()))?;
    let findings: Vec<Finding> = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse findings {}", path.display()))?;
    Ok(findings)
}
