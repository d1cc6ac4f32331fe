//! Page URLs: derivation from source paths, directory keys, and link
//! prefixing.
//!
//! URLs follow Jekyll's default page permalinks:
//!
//! ```text
//! index.md               → /
//! point.hpp/index.md     → /point.hpp/
//! point.hpp/point/x.md   → /point.hpp/point/x.html
//! ```

use std::path::{Component, Path};

/// Directory group of a page URL.
///
/// Drops the last path segment (ignoring a trailing `/`) and appends `/`:
///
/// - `"/a/b"` → `"/a/"`
/// - `"/a/b/"` → `"/a/"`
/// - `"/x.html"` → `"/"`
/// - `"/"` → `"/"`
pub fn directory_of(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(pos) => format!("{}/", &trimmed[..pos]),
        None => "/".to_string(),
    }
}

/// Derive a page URL from its path relative to the docs root.
pub fn url_for_source(relative: &Path) -> String {
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    let Some((file, dirs)) = parts.split_last() else {
        return "/".to_string();
    };

    let mut url = String::from("/");
    for dir in dirs {
        url.push_str(dir);
        url.push('/');
    }

    let stem = Path::new(file)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    if stem != "index" {
        url.push_str(&stem);
        url.push_str(".html");
    }
    url
}

/// Link prefixes configured for the site.
///
/// `baseurl` is the site's mount point (Jekyll's `site.baseurl`), used for
/// table links and tab links. `base_path` is prepended verbatim to the
/// compact page and engineering-index rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkContext {
    pub baseurl: String,
    pub base_path: String,
}

impl LinkContext {
    /// `url` under the site's `baseurl`, with exactly one `/` at the seam.
    pub fn relative_url(&self, url: &str) -> String {
        let base = self.baseurl.trim_end_matches('/');
        if url.starts_with('/') {
            format!("{base}{url}")
        } else {
            format!("{base}/{url}")
        }
    }

    /// `url` prefixed by the configured base path.
    pub fn base_path_url(&self, url: &str) -> String {
        format!("{}{}", self.base_path, url)
    }
}
