//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the docs root and is optional: stock defaults are used for every key it
//! does not set.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! baseurl = ""              # Site mount point, prepended to table and tab links
//! base_path = ""            # Prepended verbatim to page / eng_index rows
//!
//! [output]
//! file = "assets/scripts/indices.js"  # Artifact path inside the output directory
//! format = "script"         # "script" (bare JavaScript) or "html" (<script> element)
//!
//! [globals]
//! page_index = "pageIndex"  # Browser global receiving directory → kind → fragment
//! tab_index = "tabIndex"    # Browser global receiving the tab strip
//! title_index = "titleIndex" # Browser global receiving url → title
//!
//! [scan]
//! extensions = ["md", "markdown", "html"]
//! exclude = ["_site", "_includes", "_layouts", "node_modules"]
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! [site]
//! baseurl = "/docs"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::urls::LinkContext;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Link prefixes.
    pub site: LinksConfig,
    /// Where and how the artifact is written.
    pub output: OutputConfig,
    /// Names of the browser globals the tables are bound to.
    pub globals: GlobalsConfig,
    /// Which files the scanner reads.
    pub scan: ScanConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, prefix) in [
            ("site.baseurl", &self.site.baseurl),
            ("site.base_path", &self.site.base_path),
        ] {
            if !prefix.is_empty() && (!prefix.starts_with('/') || prefix.ends_with('/')) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be empty or start with '/' and not end with '/'"
                )));
            }
        }
        for (key, name) in [
            ("globals.page_index", &self.globals.page_index),
            ("globals.tab_index", &self.globals.tab_index),
            ("globals.title_index", &self.globals.title_index),
        ] {
            if !is_js_identifier(name) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a JavaScript identifier, got {name:?}"
                )));
            }
        }
        if self.output.file.trim().is_empty() || Path::new(&self.output.file).is_absolute() {
            return Err(ConfigError::Validation(
                "output.file must be a non-empty relative path".into(),
            ));
        }
        if self.scan.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "scan.extensions must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Link prefixes for the index builders.
    pub fn links(&self) -> LinkContext {
        LinkContext {
            baseurl: self.site.baseurl.clone(),
            base_path: self.site.base_path.clone(),
        }
    }
}

/// `[A-Za-z_$][A-Za-z0-9_$]*`
fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Link prefix settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinksConfig {
    /// Site mount point (e.g. `"/docs"`), Jekyll's `site.baseurl`.
    pub baseurl: String,
    /// Prefix for compact page rows.
    pub base_path: String,
}

/// Artifact flavour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Bare JavaScript, loaded with `<script src=…>`.
    #[default]
    Script,
    /// A `<script>` element, for inclusion into page templates.
    Html,
}

/// Artifact settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Path of the artifact, relative to the output directory.
    pub file: String,
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: "assets/scripts/indices.js".to_string(),
            format: OutputFormat::Script,
        }
    }
}

/// Names of the browser globals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalsConfig {
    pub page_index: String,
    pub tab_index: String,
    pub title_index: String,
}

impl Default for GlobalsConfig {
    fn default() -> Self {
        Self {
            page_index: "pageIndex".to_string(),
            tab_index: "tabIndex".to_string(),
            title_index: "titleIndex".to_string(),
        }
    }
}

/// Scanner settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// File extensions (without the dot) that may carry front matter.
    pub extensions: Vec<String>,
    /// Directory names that are never descended into. Dot-directories are
    /// always skipped.
    pub exclude: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["md".into(), "markdown".into(), "html".into()],
            exclude: vec![
                "_site".into(),
                "_includes".into(),
                "_layouts".into(),
                "node_modules".into(),
            ],
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    let config = resolve_config(base, overlay)?;
    tracing::debug!(root = %root.display(), "Loaded site config");
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Site Indices Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file in the root of the documentation tree.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Links
# ---------------------------------------------------------------------------
[site]
# Mount point of the site (Jekyll's site.baseurl). Prepended to the links in
# index tables and in the tab strip. Empty, or starts with "/" without a
# trailing "/".
baseurl = ""

# Prepended verbatim to the links of compact page and engineering-index rows.
base_path = ""

# ---------------------------------------------------------------------------
# Artifact
# ---------------------------------------------------------------------------
[output]
# Path of the generated file, relative to the output directory.
file = "assets/scripts/indices.js"

# "script": bare JavaScript, load it with <script src="...">.
# "html":   a complete <script> element, for template includes.
format = "script"

# ---------------------------------------------------------------------------
# Browser globals
# ---------------------------------------------------------------------------
[globals]
# directory -> kind -> HTML fragment
page_index = "pageIndex"
# HTML fragment: the ordered tab strip
tab_index = "tabIndex"
# url -> title
title_index = "titleIndex"

# ---------------------------------------------------------------------------
# Scanning
# ---------------------------------------------------------------------------
[scan]
# Extensions of files that may carry YAML front matter.
extensions = ["md", "markdown", "html"]

# Directory names that are never scanned. Dot-directories are always skipped.
exclude = ["_site", "_includes", "_layouts", "node_modules"]
"##
}
