//! Documentation tree scanning and manifest generation.
//!
//! Stage 1 of the pipeline. Walks the docs directory, reads the YAML front
//! matter of every page and produces a [`Manifest`] the generate stage
//! consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! docs/                              # Docs root
//! ├── config.toml                    # Index configuration (optional)
//! ├── index.md                       # → /
//! ├── guide.md                       # → /guide.html
//! ├── point.hpp/
//! │   ├── index.md                   # → /point.hpp/          (library/sourcefile)
//! │   └── point/
//! │       ├── index.md               # → /point.hpp/point/    (class)
//! │       └── m_size.md              # → /point.hpp/point/m_size.html (method)
//! └── _site/                         # Excluded (build output)
//! ```
//!
//! ## Pages
//!
//! Only files that start with a `---` delimited front matter block are pages.
//! Other files (plain Markdown, includes, assets) are skipped silently, the
//! way Jekyll treats them as static files.
//!
//! Files whose front matter is not valid YAML are skipped with a warning. They
//! never fail the scan.
//!
//! ## Ordering
//!
//! Entries are visited in file-name order, so the manifest — and every index
//! built from it — is the same on every run.

use crate::config::{self, ScanConfig, SiteConfig};
use crate::metadata;
use crate::types::RawPage;
use crate::urls;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Manifest output from the scan stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub pages: Vec<RawPage>,
    pub config: SiteConfig,
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    // Load site config (uses defaults if config.toml doesn't exist)
    let config = config::load_config(root)?;
    let pages = scan_pages(root, &config.scan)?;

    tracing::info!(
        root = %root.display(),
        page_count = pages.len(),
        "Scan completed"
    );

    Ok(Manifest { pages, config })
}

/// Read every page under `root` into a raw record.
pub fn scan_pages(root: &Path, settings: &ScanConfig) -> Result<Vec<RawPage>, ScanError> {
    let mut pages = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_excluded(e, settings));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() || !has_page_extension(entry.path(), settings) {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let source = relative.to_string_lossy().replace('\\', "/");

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %source, error = %e, "Failed to read page, skipping");
                continue;
            }
        };

        let Some((yaml, _body)) = split_front_matter(&content) else {
            tracing::debug!(path = %source, "No front matter, not a page");
            continue;
        };

        match parse_front_matter(yaml) {
            Ok(front) => {
                let url = urls::url_for_source(relative);
                pages.push(metadata::raw_page(&front, url, source));
            }
            Err(e) => {
                tracing::warn!(path = %source, error = %e, "Failed to parse front matter, skipping");
            }
        }
    }

    Ok(pages)
}

fn is_excluded(entry: &DirEntry, settings: &ScanConfig) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || settings.exclude.iter().any(|ex| *ex == name)
}

fn has_page_extension(path: &Path, settings: &ScanConfig) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy();
            settings
                .extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(&ext))
        })
        .unwrap_or(false)
}

/// Split a page into its front matter and body.
///
/// The front matter is the text between an opening `---` line at the very
/// start of the file and the next `---` (or `...`) line. Returns `None` when
/// the file does not open with a front matter block or the block is never
/// closed.
pub fn split_front_matter(content: &str) -> Option<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let rest = content.strip_prefix("---")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let marker = line.trim_end_matches(['\r', '\n']);
        if marker == "---" || marker == "..." {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Parse front matter YAML into a mapping. An empty block is an empty
/// mapping; a block that is not a mapping is an error.
pub fn parse_front_matter(yaml: &str) -> Result<Mapping, serde_yaml::Error> {
    if yaml.trim().is_empty() {
        return Ok(Mapping::new());
    }
    match serde_yaml::from_str::<Value>(yaml)? {
        Value::Mapping(front) => Ok(front),
        Value::Null => Ok(Mapping::new()),
        other => {
            // Re-parse as a mapping to get serde_yaml's own type error.
            serde_yaml::from_value::<Mapping>(other)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{find_raw, write_page};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn split_front_matter_basic() {
        let (yaml, body) = split_front_matter("---\ntitle: A\n---\nBody\n").unwrap();
        assert_eq!(yaml, "title: A\n");
        assert_eq!(body, "Body\n");
    }

    #[test]
    fn split_front_matter_crlf_and_bom() {
        let (yaml, body) =
            split_front_matter("\u{feff}---\r\ntitle: A\r\n---\r\nBody").unwrap();
        assert_eq!(yaml, "title: A\r\n");
        assert_eq!(body, "Body");
    }

    #[test]
    fn split_front_matter_empty_block() {
        let (yaml, body) = split_front_matter("---\n---\n").unwrap();
        assert_eq!(yaml, "");
        assert_eq!(body, "");
    }

    #[test]
    fn split_front_matter_dot_terminator() {
        let (yaml, _) = split_front_matter("---\ntitle: A\n...\n").unwrap();
        assert_eq!(yaml, "title: A\n");
    }

    #[test]
    fn split_front_matter_requires_opening_line() {
        assert!(split_front_matter("# Title\n---\n").is_none());
        assert!(split_front_matter("----\ntitle: A\n---\n").is_none());
        assert!(split_front_matter("---\ntitle: A\n").is_none());
    }

    #[test]
    fn parse_front_matter_rejects_non_mapping() {
        assert!(parse_front_matter("- a\n- b\n").is_err());
        assert!(parse_front_matter("title: [unclosed").is_err());
        assert!(parse_front_matter("").unwrap().is_empty());
        assert!(parse_front_matter("~").unwrap().is_empty());
    }

    #[test]
    fn scan_reads_pages_in_file_name_order() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "index.md", "layout: page\ntitle: Home\ntab: 1 Home");
        write_page(tmp.path(), "b/index.md", "layout: directory\ntitle: b");
        write_page(tmp.path(), "a/index.md", "layout: directory\ntitle: a");
        write_page(tmp.path(), "a/x.md", "layout: class\ntitle: x\nbrief: An x");

        let manifest = scan(tmp.path()).unwrap();
        let urls: Vec<&str> = manifest
            .pages
            .iter()
            .map(|p| p.url.as_deref().unwrap())
            .collect();
        assert_eq!(urls, vec!["/a/", "/a/x.html", "/b/", "/"]);

        let x = find_raw(&manifest, "/a/x.html");
        assert_eq!(x.brief.as_deref(), Some("An x"));
        assert_eq!(x.source.as_deref(), Some("a/x.md"));
        assert_eq!(manifest.config, SiteConfig::default());
    }

    #[test]
    fn scan_skips_files_without_front_matter() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("README.md"), "# Just markdown\n").unwrap();
        write_page(tmp.path(), "page.md", "layout: page\ntitle: Page");

        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.pages.len(), 1);
    }

    #[test]
    fn scan_skips_malformed_front_matter() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "bad.md", "title: [unclosed");
        write_page(tmp.path(), "good.md", "layout: page\ntitle: Good");

        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.pages.len(), 1);
        assert_eq!(manifest.pages[0].title.as_deref(), Some("Good"));
    }

    #[test]
    fn scan_prunes_excluded_and_hidden_directories() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "_site/copy.md", "layout: page\ntitle: Copy");
        write_page(tmp.path(), ".git/x.md", "layout: page\ntitle: Hidden");
        write_page(tmp.path(), "drafts/wip.md", "layout: page\ntitle: WIP");
        write_page(tmp.path(), "real.md", "layout: page\ntitle: Real");
        fs::write(
            tmp.path().join("config.toml"),
            "[scan]\nexclude = [\"_site\", \"drafts\"]\n",
        )
        .unwrap();

        let manifest = scan(tmp.path()).unwrap();
        let titles: Vec<&str> = manifest
            .pages
            .iter()
            .map(|p| p.title.as_deref().unwrap())
            .collect();
        assert_eq!(titles, vec!["Real"]);
    }

    #[test]
    fn scan_honors_extensions() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "a.md", "layout: page\ntitle: A");
        write_page(tmp.path(), "b.txt", "layout: page\ntitle: B");
        write_page(tmp.path(), "c.HTML", "layout: page\ntitle: C");

        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.pages.len(), 2);
    }

    #[test]
    fn scan_fails_on_invalid_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[site]\nbaseurl = \"docs/\"\n").unwrap();
        assert!(matches!(scan(tmp.path()), Err(ScanError::Config(_))));
    }

    #[test]
    fn manifest_round_trips_through_json() {
        let tmp = TempDir::new().unwrap();
        write_page(
            tmp.path(),
            "lib/index.md",
            "layout: library\ntitle: lib\nhyde:\n  library-type: library\n  annotation: [a, b]",
        );
        let manifest = scan(tmp.path()).unwrap();
        let json = serde_json::to_string_pretty(&manifest).unwrap();
        assert!(json.contains("\"library-type\": \"library\""));
        let back: Manifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, manifest);
    }
}
