//! CLI output formatting for both pipeline stages.
//!
//! Output is **information-centric, not file-centric**: pages are listed by
//! the directory group and kind they will be indexed under, with their
//! source file as an indented context line. That makes the scan output read
//! as a preview of the page index.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Pages
//! /
//!     001 page Home [tab: 1 Home]
//!         Source: index.md
//!     002 sourcefile point.hpp
//!         Source: point.hpp/index.md
//! /point.hpp/
//!     001 class point
//!         Source: point.hpp/point/index.md
//!
//! Not indexed
//!     widget.md: layout `widget` has no index table
//!
//! Skipped
//!     broken.md: missing required field `layout`
//! ```
//!
//! ## Generate
//!
//! ```text
//! pageIndex: 3 directories, 5 tables
//! tabIndex: 2 tabs
//! titleIndex: 12 titles
//! Wrote _site/assets/scripts/indices.js
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure —
//! no I/O, no side effects.

use crate::generate::GenerateReport;
use crate::scan::Manifest;
use crate::types::{self, PageRecord};
use crate::urls;
use std::collections::BTreeMap;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Header line for one page: position, kind and title, plus its tab.
fn page_line(index: usize, page: &PageRecord) -> String {
    let kind = page
        .kind()
        .map(|k| k.as_str())
        .unwrap_or_else(|| page.layout.as_str());
    match &page.tab {
        Some(tab) => format!("{} {} {} [tab: {}]", format_index(index), kind, page.title, tab),
        None => format!("{} {} {}", format_index(index), kind, page.title),
    }
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format scan stage output: indexed pages by directory group, then pages
/// that will not be indexed, then malformed records.
pub fn format_scan_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = Vec::new();
    let (records, skipped) = types::validate_records(&manifest.pages);
    let sources: BTreeMap<&str, &str> = manifest
        .pages
        .iter()
        .filter_map(|p| Some((p.url.as_deref()?, p.source.as_deref()?)))
        .collect();

    let mut groups: BTreeMap<String, Vec<&PageRecord>> = BTreeMap::new();
    let mut unindexed = Vec::new();
    for record in &records {
        if record.kind().is_some() {
            groups
                .entry(urls::directory_of(&record.url))
                .or_default()
                .push(record);
        } else {
            unindexed.push(record);
        }
    }

    lines.push("Pages".to_string());
    for (directory, pages) in &groups {
        lines.push(directory.clone());
        for (i, page) in pages.iter().enumerate() {
            lines.push(format!("{}{}", indent(1), page_line(i + 1, page)));
            if let Some(source) = sources.get(page.url.as_str()) {
                lines.push(format!("{}Source: {}", indent(2), source));
            }
        }
    }

    if !unindexed.is_empty() {
        lines.push(String::new());
        lines.push("Not indexed".to_string());
        for page in unindexed {
            let origin = sources.get(page.url.as_str()).copied().unwrap_or(&page.url);
            let reason = match page.layout {
                types::Layout::Library => "library page has no known library-type".to_string(),
                _ => format!("layout `{}` has no index table", page.layout.as_str()),
            };
            lines.push(format!("{}{}: {}", indent(1), origin, reason));
        }
    }

    if !skipped.is_empty() {
        lines.push(String::new());
        lines.push("Skipped".to_string());
        for err in &skipped {
            lines.push(format!("{}{}", indent(1), err));
        }
    }

    lines
}

pub fn print_scan_output(manifest: &Manifest) {
    for line in format_scan_output(manifest) {
        println!("{}", line);
    }
}

/// Closing line of the `check` command.
pub fn format_check_summary(manifest: &Manifest) -> String {
    let (_, skipped) = types::validate_records(&manifest.pages);
    if skipped.is_empty() {
        "==> Docs are valid".to_string()
    } else {
        format!(
            "==> Docs have {}",
            plural(skipped.len(), "malformed page record", "malformed page records")
        )
    }
}

// ============================================================================
// Stage 2: Generate output
// ============================================================================

/// Format generate stage output: one line per table, then skipped records
/// and the artifact path.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let globals = &report.globals;
    let mut lines = vec![
        format!(
            "{}: {}, {}",
            globals.page_index,
            plural(report.directories, "directory", "directories"),
            plural(report.tables, "table", "tables"),
        ),
        format!("{}: {}", globals.tab_index, plural(report.tabs, "tab", "tabs")),
        format!(
            "{}: {}",
            globals.title_index,
            plural(report.titles, "title", "titles")
        ),
    ];

    if !report.skipped.is_empty() {
        lines.push(format!(
            "Skipped {}",
            plural(report.skipped.len(), "malformed record", "malformed records")
        ));
        for err in &report.skipped {
            lines.push(format!("{}{}", indent(1), err));
        }
    }

    lines.push(format!("Wrote {}", report.artifact.display()));
    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}
