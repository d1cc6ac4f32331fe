//! Index artifact generation.
//!
//! Stage 2 of the pipeline. Takes the scan manifest, validates its records,
//! runs the three index builders and writes a single JavaScript artifact
//! that binds the results to browser globals:
//!
//! ```text
//! window.pageIndex = { "/point.hpp/": { "class": "<h3>Classes</h3>…" } };
//! window.tabIndex = "<a class=\"page-link\" href=\"/\">Home</a>";
//! window.titleIndex = { "/point.hpp/": "point.hpp" };
//! ```
//!
//! Values are emitted as JSON. `</` is escaped as `<\/` so the same text is
//! safe inside an inline `<script>` element, which is what the `html` output
//! format produces.
//!
//! The core ([`build_indices`], [`render_script`]) does no I/O. Binding the
//! tables to globals is left to the emitted script; nothing here holds them
//! as shared state.

use crate::config::{GlobalsConfig, OutputFormat, SiteConfig};
use crate::page_index::{self, PageIndex};
use crate::scan::Manifest;
use crate::tab_index;
use crate::title_index::{self, TitleIndex};
use crate::types::{self, RawPage, RecordError};
use maud::{PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The three lookup tables, plus the records that could not be indexed.
#[derive(Debug, Clone, PartialEq)]
pub struct Indices {
    pub page_index: PageIndex,
    pub tab_index: String,
    pub title_index: TitleIndex,
    /// Number of links in the tab strip.
    pub tabs: usize,
    pub skipped: Vec<RecordError>,
}

/// Summary of a generate run, for CLI output.
#[derive(Debug)]
pub struct GenerateReport {
    pub artifact: PathBuf,
    /// Global names the tables were bound to.
    pub globals: GlobalsConfig,
    pub directories: usize,
    pub tables: usize,
    pub tabs: usize,
    pub titles: usize,
    pub skipped: Vec<RecordError>,
}

/// Validate `raw` and build every index.
///
/// Never fails: a malformed record is reported with a warning, kept in
/// [`Indices::skipped`], and left out of all three tables.
pub fn build_indices(raw: &[RawPage], config: &SiteConfig) -> Indices {
    let (records, skipped) = types::validate_records(raw);
    for err in &skipped {
        tracing::warn!(error = %err, "Skipping malformed page record");
    }

    let links = config.links();
    let indices = Indices {
        page_index: page_index::build(&records, &links),
        tab_index: tab_index::build(&records, &links),
        title_index: title_index::build(&records),
        tabs: records.iter().filter(|r| r.tab.is_some()).count(),
        skipped,
    };

    tracing::debug!(
        records = records.len(),
        skipped = indices.skipped.len(),
        directories = indices.page_index.len(),
        "Built indices"
    );
    indices
}

/// Render the script that binds the tables to `window.<name>`.
pub fn render_script(indices: &Indices, globals: &GlobalsConfig) -> Result<String, GenerateError> {
    let page_index = script_json(&serde_json::to_string_pretty(&indices.page_index)?);
    let tab_index = script_json(&serde_json::to_string(&indices.tab_index)?);
    let title_index = script_json(&serde_json::to_string_pretty(&indices.title_index)?);

    Ok(format!(
        "window.{} = {};\n\nwindow.{} = {};\n\nwindow.{} = {};\n",
        globals.page_index,
        page_index,
        globals.tab_index,
        tab_index,
        globals.title_index,
        title_index,
    ))
}

/// Render the artifact in the configured format.
pub fn render_artifact(indices: &Indices, config: &SiteConfig) -> Result<String, GenerateError> {
    let script = render_script(indices, &config.globals)?;
    Ok(match config.output.format {
        OutputFormat::Script => script,
        OutputFormat::Html => html! { script { (PreEscaped(script)) } }.into_string(),
    })
}

/// Keep a JSON literal from closing an enclosing `<script>` element.
fn script_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

/// Read the scan manifest, build the indices and write the artifact into
/// `output_dir`.
pub fn generate(manifest_path: &Path, output_dir: &Path) -> Result<GenerateReport, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;
    generate_from_manifest(&manifest, output_dir)
}

/// [`generate`] for an in-memory manifest.
pub fn generate_from_manifest(
    manifest: &Manifest,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let indices = build_indices(&manifest.pages, &manifest.config);
    let artifact = render_artifact(&indices, &manifest.config)?;

    let artifact_path = output_dir.join(&manifest.config.output.file);
    if let Some(parent) = artifact_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&artifact_path, artifact)?;
    tracing::info!(path = %artifact_path.display(), "Wrote index artifact");

    Ok(GenerateReport {
        artifact: artifact_path,
        globals: manifest.config.globals.clone(),
        directories: indices.page_index.len(),
        tables: indices.page_index.values().map(|d| d.len()).sum(),
        tabs: indices.tabs,
        titles: indices.title_index.len(),
        skipped: indices.skipped,
    })
}
