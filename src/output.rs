//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Each content type
//! leads with its name and where its content came from (`cms` or
//! `fallback`); file paths and error details follow as indented context
//! lines. Editors read `check` output as a content inventory first and a
//! problem list second.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Settings
//!     Source: cms
//! Homepage
//!     Source: fallback (not-found)
//!     Reason: not found: content/pages/home.yml
//! Services (3 items)
//!     Source: cms
//!     Substituted: cloud-infrastructure (validation)
//!     Skipped: broken.md (parse-error)
//!
//! 1 fallback, 1 substitution, 1 skipped file
//! ```
//!
//! ## Build
//!
//! ```text
//! Wrote dist/content.json
//!     3 services, 1 case study, 2 insights, 1 persona, 1 resource
//! ```
//!
//! ## Search
//!
//! ```text
//! 2 results for "cloud"
//! 001 Cloud Infrastructure [service]
//!     /services/cloud-infrastructure
//!     Cloud platforms with automation from day one.
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::search::SearchHit;
use crate::site::{KindReport, Manifest};
use crate::types::ContentKind;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

/// `1 service`, `3 services`, `1 case study`, `2 case studies`.
fn count_noun(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, plural)
    }
}

fn heading(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Homepage => "Homepage",
        ContentKind::About => "About",
        ContentKind::Settings => "Settings",
        ContentKind::Service => "Services",
        ContentKind::CaseStudy => "Case studies",
        ContentKind::Insight => "Insights",
        ContentKind::Persona => "Personas",
        ContentKind::Resource => "Resources",
    }
}

/// Public route of a collection item.
fn route(kind: ContentKind, slug: &str) -> String {
    let section = match kind {
        ContentKind::Service => "services",
        ContentKind::CaseStudy => "case-studies",
        ContentKind::Insight => "insights",
        ContentKind::Persona => "personas",
        ContentKind::Resource => "resources",
        ContentKind::Homepage | ContentKind::About | ContentKind::Settings => return "/".to_string(),
    };
    format!("/{}/{}", section, slug)
}

// ============================================================================
// check
// ============================================================================

/// Format the per-type load report.
pub fn format_check_report(reports: &[KindReport]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut fallbacks = 0;
    let mut substitutions = 0;
    let mut skipped = 0;

    for report in reports {
        if report.kind.is_collection() {
            lines.push(format!(
                "{} ({})",
                heading(report.kind),
                count_noun(report.items, "item", "items")
            ));
        } else {
            lines.push(heading(report.kind).to_string());
        }

        match report.provenance.reason() {
            None => lines.push(format!("{}Source: cms", indent(1))),
            Some(reason) => {
                fallbacks += 1;
                lines.push(format!("{}Source: fallback ({})", indent(1), reason.label()));
                lines.push(format!("{}Reason: {}", indent(1), reason));
            }
        }

        for (slug, reason) in &report.substituted {
            substitutions += 1;
            lines.push(format!("{}Substituted: {} ({})", indent(1), slug, reason.label()));
            lines.push(format!("{}{}", indent(2), reason));
        }

        for (path, reason) in &report.skipped {
            skipped += 1;
            let name = path
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            lines.push(format!("{}Skipped: {} ({})", indent(1), name, reason.label()));
        }
    }

    lines.push(String::new());
    if fallbacks + substitutions + skipped == 0 {
        lines.push("All content loaded from the CMS".to_string());
    } else {
        lines.push(format!(
            "{}, {}, {}",
            count_noun(fallbacks, "fallback", "fallbacks"),
            count_noun(substitutions, "substitution", "substitutions"),
            count_noun(skipped, "skipped file", "skipped files")
        ));
    }
    lines
}

/// Print the load report to stdout.
pub fn print_check_report(reports: &[KindReport]) {
    for line in format_check_report(reports) {
        println!("{}", line);
    }
}

// ============================================================================
// build
// ============================================================================

/// Format the summary printed after `content.json` is written.
pub fn format_build_summary(manifest: &Manifest, written: &Path) -> Vec<String> {
    vec![
        format!("Wrote {}", written.display()),
        format!(
            "{}{}, {}, {}, {}, {}",
            indent(1),
            count_noun(manifest.services.len(), "service", "services"),
            count_noun(manifest.case_studies.len(), "case study", "case studies"),
            count_noun(manifest.insights.len(), "insight", "insights"),
            count_noun(manifest.personas.len(), "persona", "personas"),
            count_noun(manifest.resources.len(), "resource", "resources"),
        ),
    ]
}

/// Print the build summary to stdout.
pub fn print_build_summary(manifest: &Manifest, written: &Path) {
    for line in format_build_summary(manifest, written) {
        println!("{}", line);
    }
}

// ============================================================================
// search
// ============================================================================

/// Format search hits: index, title, kind, then route and excerpt.
pub fn format_search_hits(query: &str, hits: &[SearchHit]) -> Vec<String> {
    let mut lines = vec![format!(
        "{} for \"{}\"",
        count_noun(hits.len(), "result", "results"),
        query.trim()
    )];
    for (i, hit) in hits.iter().enumerate() {
        lines.push(format!("{} {} [{}]", format_index(i + 1), hit.title, hit.kind));
        lines.push(format!("{}{}", indent(1), route(hit.kind, &hit.slug)));
        let excerpt = truncate_desc(hit.excerpt.trim(), 72);
        if !excerpt.is_empty() {
            lines.push(format!("{}{}", indent(1), excerpt));
        }
    }
    lines
}

/// Print search hits to stdout.
pub fn print_search_hits(query: &str, hits: &[SearchHit]) {
    for line in format_search_hits(query, hits) {
        println!("{}", line);
    }
}
