//! Shared test utilities for the site-indices test suite.
//!
//! Provides record constructors, fixture writers, and fragment extractors.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let pages = vec![record("/a/b", "B", "class"), record("/a/c", "A", "class")];
//! let index = page_index::build(&pages, &LinkContext::default());
//! assert_eq!(link_texts(&index["/a/"][&IndexKind::Class]), vec!["A", "B"]);
//! ```

use std::path::Path;

use crate::scan::Manifest;
use crate::types::{Layout, PageRecord, RawPage};

// =========================================================================
// Record constructors
// =========================================================================

/// A raw record with the three required fields set.
pub fn raw(url: &str, title: &str, layout: &str) -> RawPage {
    RawPage {
        url: Some(url.to_string()),
        title: Some(title.to_string()),
        layout: Some(layout.to_string()),
        ..RawPage::default()
    }
}

/// A validated record with only the required fields set.
pub fn record(url: &str, title: &str, layout: &str) -> PageRecord {
    PageRecord {
        url: url.to_string(),
        title: title.to_string(),
        layout: Layout::parse(layout),
        library_type: None,
        brief: None,
        description: None,
        annotation: Vec::new(),
        tab: None,
        is_ctor: false,
        is_dtor: false,
    }
}

// =========================================================================
// Fixture setup
// =========================================================================

/// Write a page with the given front matter under `root`, creating parent
/// directories.
pub fn write_page(root: &Path, relative: &str, front_matter: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, format!("---\n{front_matter}\n---\n\nBody.\n")).unwrap();
}

// =========================================================================
// Lookups — panic with a clear message on miss
// =========================================================================

/// Find a raw page by URL. Panics if not found.
pub fn find_raw<'a>(manifest: &'a Manifest, url: &str) -> &'a RawPage {
    manifest
        .pages
        .iter()
        .find(|p| p.url.as_deref() == Some(url))
        .unwrap_or_else(|| {
            let urls: Vec<Option<&str>> = manifest.pages.iter().map(|p| p.url.as_deref()).collect();
            panic!("page '{url}' not found. Available: {urls:?}")
        })
}

// =========================================================================
// Fragment extractors
// =========================================================================

/// Text of every `<a>` element in a fragment, in document order, with
/// nested tags removed.
pub fn link_texts(html: &str) -> Vec<String> {
    let mut texts = Vec::new();
    let mut rest = html;
    while let Some(start) = rest.find("<a ") {
        let after = &rest[start..];
        let Some(open_end) = after.find('>') else {
            break;
        };
        let Some(close) = after.find("</a>") else {
            break;
        };
        texts.push(strip_tags(&after[open_end + 1..close]));
        rest = &after[close + 4..];
    }
    texts
}

fn strip_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    result
}
