//! JSON output formatting

use anyhow::Result;
use prkey_core::{AttachedFinding, ComponentIndex, Finding, FindingSummary};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct JsonFindings<'a> {
    pub findings: &'a [AttachedFinding],
    pub unattached: &'a [Finding],
    pub summary: &'a FindingSummary,
}

pub fn print_index(index: &ComponentIndex) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&index.summary())?);
    Ok(())
}

pub fn print_findings(
    findings: &[AttachedFinding],
    unattached: &[Finding],
    summary: &FindingSummary,
) -> Result<()> {
    let out = JsonFindings {
        findings,
        unattached,
        summary,
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
