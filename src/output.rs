//! CLI output formatting for every command.
//!
//! Output is **notice-centric**: every line leads with `<notice>/<language>`
//! so a run reads as an inventory of what happened to each document.
//!
//! # Output Format
//!
//! ## Archive (`--process-all`)
//!
//! ```text
//! 🔄 Processing all notices for versioning...
//! 📦 app1/it: archived v1.1
//! ℹ️  app1/en: v1.0 already archived
//! ⚠️  app2/fr: no latest.md, skipped
//! ⚠️  app3: no metadata.json, skipped
//! ❌ app4/de: <error>
//! ✅ Version processing complete (1 archived, 1 error)
//! ```
//!
//! ## Status (`--check-status`)
//!
//! ```text
//! 🔍 Checking translation statuses...
//! ⚠️  app1/en: Outdated (v1.0 < v1.1)
//! ✅ app2/en: Up to date (v2.0)
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! app1 → notices/app1/index.html
//!     /notices/app1/en/
//!     /notices/app1/it/
//!     /notices/app1/it/v1.0/
//!
//! Generated 1 notice, 3 document pages, 2 assets → dist
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::archive::{ArchiveReport, Outcome, SkipReason};
use crate::catalog::StatusEntry;
use crate::generate::GenerateSummary;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 notice`, `2 notices`.
fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

// ============================================================================
// Archive output
// ============================================================================

pub fn format_archive_report(report: &ArchiveReport) -> Vec<String> {
    let mut lines = vec!["🔄 Processing all notices for versioning...".to_string()];

    for notice in &report.skipped_notices {
        lines.push(format!("⚠️  {notice}: no metadata.json, skipped"));
    }

    for item in &report.outcomes {
        let subject = format!("{}/{}", item.notice, item.language);
        lines.push(match &item.outcome {
            Outcome::Archived { version } => format!("📦 {subject}: archived v{version}"),
            Outcome::AlreadyArchived { version } => {
                format!("ℹ️  {subject}: v{version} already archived")
            }
            Outcome::Skipped(SkipReason::NoLatestDocument) => {
                format!("⚠️  {subject}: no latest.md, skipped")
            }
            Outcome::Skipped(SkipReason::NoVersion) => {
                format!("⚠️  {subject}: no version in front matter, skipped")
            }
        });
    }

    for item in &report.errors {
        let subject = match &item.language {
            Some(language) => format!("{}/{}", item.notice, language),
            None => item.notice.clone(),
        };
        lines.push(format!("❌ {subject}: {}", item.error));
    }

    let mut summary = format!(
        "✅ Version processing complete ({} archived",
        report.archived_count()
    );
    if report.has_errors() {
        summary.push_str(&format!(", {}", plural(report.errors.len(), "error")));
    }
    summary.push(')');
    lines.push(summary);
    lines
}

pub fn print_archive_report(report: &ArchiveReport) {
    for line in format_archive_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Status output
// ============================================================================

/// One line per translation, in report order.
pub fn format_status_report(entries: &[StatusEntry]) -> Vec<String> {
    let mut lines = vec!["🔍 Checking translation statuses...".to_string()];
    for entry in entries {
        let status = &entry.status;
        let subject = format!("{}/{}", entry.notice, entry.language);
        if status.is_outdated {
            lines.push(format!(
                "⚠️  {subject}: Outdated (v{} < v{})",
                status.translation_version, status.canonical_version
            ));
        } else {
            lines.push(format!(
                "✅ {subject}: Up to date (v{})",
                status.translation_version
            ));
        }
    }
    lines
}

pub fn print_status_report(entries: &[StatusEntry]) {
    for line in format_status_report(entries) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate output
// ============================================================================

/// Generated files grouped by notice, followed by a one-line total.
pub fn format_generate_output(summary: &GenerateSummary) -> Vec<String> {
    let mut lines = vec!["Home \u{2192} index.html".to_string()];

    for notice in &summary.notices {
        lines.push(format!("{notice} \u{2192} notices/{notice}/index.html"));
        let prefix = format!("/notices/{notice}/");
        for url in summary.document_urls.iter().filter(|u| u.starts_with(&prefix)) {
            lines.push(format!("{}{}", indent(1), url));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}, {} \u{2192} {}",
        plural(summary.notices.len(), "notice"),
        plural(summary.document_urls.len(), "document page"),
        plural(summary.assets_copied, "asset"),
        summary.output_dir.display()
    ));
    lines
}

pub fn print_generate_output(summary: &GenerateSummary) {
    for line in format_generate_output(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
