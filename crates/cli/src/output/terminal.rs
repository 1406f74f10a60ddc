//! Terminal output formatting

use colored::Colorize;
use prkey_core::{AttachedFinding, ComponentIndex, DuplicateKind, FindingSummary, Severity};
use std::time::Instant;

pub fn format_finding(attached: &AttachedFinding) -> String {
    let finding = &attached.finding;
    let icon = match finding.severity {
        Severity::Blocker | Severity::Critical => "❌",
        Severity::Major | Severity::Minor => "⚠️ ",
        Severity::Info => "ℹ️ ",
    };

    match finding.line {
        Some(line) => format!(
            "  {} {} [{}] {}:{}",
            icon, finding.message, finding.rule, attached.path, line
        ),
        None => format!(
            "  {} {} [{}] {}",
            icon, finding.message, finding.rule, attached.path
        ),
    }
}

pub fn print_index(index: &ComponentIndex, start: Instant) {
    println!();
    if index.is_empty() {
        println!("  {}", "No changed file matched a module.".dimmed());
    }
    for (key, path) in index.iter() {
        println!("  {} {} {}", path, "→".dimmed(), key.as_str().cyan());
    }

    for rejected in index.rejected() {
        let reason = match rejected.kind {
            DuplicateKind::Key => format!("{} already maps to {}", rejected.key, rejected.existing),
            DuplicateKind::Path => format!("path already has key {}", rejected.existing),
        };
        println!("  {} {} ({})", "skipped".yellow(), rejected.path, reason);
    }

    println!();
    println!(
        "  {} keys on branch {} ({:.1}s)",
        index.len().to_string().bold(),
        index.branch().bold(),
        start.elapsed().as_secs_f64()
    );
}

pub fn print_findings(attached: &[AttachedFinding], summary: &FindingSummary, start: Instant) {
    println!();
    for finding in attached {
        println!("{}", format_finding(finding));
    }

    println!();
    println!(
        "  {} findings attached ({} blocker, {} critical, {} major, {} minor, {} info)",
        summary.total().to_string().bold(),
        summary.blocker,
        summary.critical,
        summary.major,
        summary.minor,
        summary.info
    );
    if summary.unattached > 0 {
        println!(
            "  {}",
            format!(
                "{} findings on files outside the change-set",
                summary.unattached
            )
            .dimmed()
        );
    }
    println!("  Time: {:.1}s", start.elapsed().as_secs_f64());
}
