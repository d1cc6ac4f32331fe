//! Page metadata extraction and resolution.
//!
//! Page metadata lives in the YAML front matter of each documentation page.
//! Pages written by the API documentation generator come in two shapes:
//!
//! ```yaml
//! # flat
//! layout: class
//! title: point
//! brief: A 2D point
//! ```
//!
//! ```yaml
//! # nested: everything but layout and title moved under `hyde`
//! layout: class
//! title: point
//! hyde:
//!   brief: A 2D point
//!   annotation: [deprecated]
//! ```
//!
//! Both are accepted. Each field is looked up at top level first, then in the
//! `hyde` sub-table.
//!
//! ## Placeholders
//!
//! The generator stubs out undocumented fields with tag values such as
//! `__MISSING__`. Those are not documentation; [`resolve`] treats them the
//! same as an absent value so the rendered index falls back to
//! [`NO_DETAILS`] instead of printing the tag.

use crate::types::{PageRecord, RawPage, Tab};
use serde_yaml::{Mapping, Value};

/// Markdown rendered when a page has neither a brief nor a description.
pub const NO_DETAILS: &str = "_No details given_";

const PLACEHOLDERS: &[&str] = &["__MISSING__", "__OPTIONAL__", "__DEPRECATED__", "__INLINED__"];

const NESTED_KEY: &str = "hyde";

/// Whether `value` is a generator placeholder rather than real content.
pub fn is_placeholder(value: &str) -> bool {
    PLACEHOLDERS.contains(&value.trim())
}

/// Resolve a metadata field from multiple sources.
///
/// Takes a list of optional values in priority order and returns the first
/// one that is present, non-empty and not a placeholder.
///
/// ```text
/// text: resolve(&[brief, description])
/// ```
pub fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty() && !is_placeholder(s))
                .map(String::from)
        })
        .next()
}

/// The Markdown shown in a page's description cell: brief, then description,
/// then [`NO_DETAILS`].
pub fn summary(page: &PageRecord) -> &str {
    page.brief
        .as_deref()
        .or(page.description.as_deref())
        .unwrap_or(NO_DETAILS)
}

/// Build a [`RawPage`] from parsed front matter.
///
/// `url` is the page's derived URL; a `permalink` key in the front matter
/// overrides it. `source` is recorded for diagnostics.
pub fn raw_page(front: &Mapping, url: String, source: String) -> RawPage {
    let permalink = scalar(front, "permalink").map(|p| {
        if p.starts_with('/') {
            p
        } else {
            format!("/{p}")
        }
    });

    RawPage {
        url: Some(permalink.unwrap_or(url)),
        title: scalar(front, "title"),
        layout: scalar(front, "layout"),
        library_type: scalar(front, "library-type"),
        brief: scalar(front, "brief"),
        description: scalar(front, "description"),
        annotation: list(front, "annotation"),
        tab: tab(front),
        is_ctor: flag(front, "is_ctor"),
        is_dtor: flag(front, "is_dtor"),
        source: Some(source),
    }
}

/// Look up `key` at top level, then under the nested `hyde` table.
fn lookup<'a>(front: &'a Mapping, key: &str) -> Option<&'a Value> {
    front
        .get(key)
        .filter(|v| !v.is_null())
        .or_else(|| {
            front
                .get(NESTED_KEY)
                .and_then(Value::as_mapping)
                .and_then(|nested| nested.get(key))
                .filter(|v| !v.is_null())
        })
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn scalar(front: &Mapping, key: &str) -> Option<String> {
    lookup(front, key).and_then(scalar_to_string)
}

/// `tab` keeps numbers as numbers so the strip sorts them by value. `false`
/// is no tab at all.
fn tab(front: &Mapping) -> Option<Tab> {
    match lookup(front, "tab")? {
        Value::Number(n) => n.as_f64().map(Tab::Number),
        Value::Bool(false) => None,
        other => scalar_to_string(other).map(Tab::Text),
    }
}

fn list(front: &Mapping, key: &str) -> Vec<String> {
    match lookup(front, key) {
        Some(Value::Sequence(items)) => items.iter().filter_map(scalar_to_string).collect(),
        Some(other) => scalar_to_string(other).into_iter().collect(),
        None => Vec::new(),
    }
}

fn flag(front: &Mapping, key: &str) -> bool {
    match lookup(front, key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}
