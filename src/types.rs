//! Page records and the kinds they are indexed under.
//!
//! Records arrive as [`RawPage`] — every field optional, exactly as found in
//! front matter or in the scan manifest — and are validated into
//! [`PageRecord`] before any index is built. Validation only checks the three
//! required fields; everything else degrades to a documented fallback.

use crate::metadata;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// A record that could not be validated. Never fatal: the record is skipped
/// and the rest of the index is still built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("{origin}: missing required field `{field}`")]
    MissingField { field: &'static str, origin: String },
}

/// Unvalidated page metadata, as serialized in the scan manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(
        default,
        rename = "library-type",
        skip_serializing_if = "Option::is_none"
    )]
    pub library_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brief: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub annotation: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab: Option<Tab>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_ctor: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_dtor: bool,
    /// Path of the file the record was read from, relative to the docs root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<OneOrMany> = Option::deserialize(deserializer)?;
    Ok(match value {
        None => Vec::new(),
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
    })
}

/// A page's `tab` value: the tab strip's label and sort key.
///
/// Front matter may give a number (`tab: 2`) or text (`tab: 1 Home`).
/// Numbers compare by value and sort before text; text compares as strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tab {
    Number(f64),
    Text(String),
}

impl Tab {
    fn is_placeholder(&self) -> bool {
        match self {
            Tab::Number(_) => false,
            Tab::Text(text) => metadata::is_placeholder(text),
        }
    }
}

impl From<&str> for Tab {
    fn from(text: &str) -> Self {
        Tab::Text(text.to_string())
    }
}

impl From<f64> for Tab {
    fn from(n: f64) -> Self {
        Tab::Number(n)
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tab::Number(n) => write!(f, "{n}"),
            Tab::Text(text) => f.write_str(text),
        }
    }
}

impl Ord for Tab {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Tab::Number(a), Tab::Number(b)) => a.total_cmp(b),
            (Tab::Number(_), Tab::Text(_)) => Ordering::Less,
            (Tab::Text(_), Tab::Number(_)) => Ordering::Greater,
            (Tab::Text(a), Tab::Text(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Tab {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Tab {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Tab {}

/// Documentation-entity category of a page; selects its rendering rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    Directory,
    Library,
    Class,
    Function,
    Method,
    Enumeration,
    Page,
    EngIndex,
    /// Any other layout tag. Kept so the page still has a title, but it
    /// never lands in the page index.
    Other(String),
}

impl Layout {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "directory" => Layout::Directory,
            "library" => Layout::Library,
            "class" => Layout::Class,
            "function" => Layout::Function,
            "method" => Layout::Method,
            "enumeration" => Layout::Enumeration,
            "page" => Layout::Page,
            "eng_index" => Layout::EngIndex,
            other => Layout::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Layout::Directory => "directory",
            Layout::Library => "library",
            Layout::Class => "class",
            Layout::Function => "function",
            Layout::Method => "method",
            Layout::Enumeration => "enumeration",
            Layout::Page => "page",
            Layout::EngIndex => "eng_index",
            Layout::Other(tag) => tag,
        }
    }
}

/// Sub-tag of `library` pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryType {
    SourceFile,
    Library,
    Other(String),
}

impl LibraryType {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "sourcefile" => LibraryType::SourceFile,
            "library" => LibraryType::Library,
            other => LibraryType::Other(other.to_string()),
        }
    }
}

/// Key of one rendered table inside a directory group.
///
/// Variants are declared in the lexicographic order of their serialized
/// names, so the derived `Ord` keeps JSON output sorted the same way a
/// string-keyed map would.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    Class,
    Directory,
    EngIndex,
    Enumeration,
    Function,
    Library,
    Method,
    Page,
    #[serde(rename = "sourcefile")]
    SourceFile,
}

impl IndexKind {
    pub fn as_str(self) -> &'static str {
        match self {
            IndexKind::Class => "class",
            IndexKind::Directory => "directory",
            IndexKind::EngIndex => "eng_index",
            IndexKind::Enumeration => "enumeration",
            IndexKind::Function => "function",
            IndexKind::Library => "library",
            IndexKind::Method => "method",
            IndexKind::Page => "page",
            IndexKind::SourceFile => "sourcefile",
        }
    }
}

/// A validated page-description record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    pub url: String,
    pub title: String,
    pub layout: Layout,
    pub library_type: Option<LibraryType>,
    /// Markdown summary. Placeholder values have already been dropped.
    pub brief: Option<String>,
    pub description: Option<String>,
    pub annotation: Vec<String>,
    /// Present, even when empty, unless the value is a placeholder.
    pub tab: Option<Tab>,
    pub is_ctor: bool,
    pub is_dtor: bool,
}

impl PageRecord {
    /// The table this record is rendered into, if any.
    ///
    /// `library` pages are split by their library type; an unknown layout or
    /// library type yields `None`.
    pub fn kind(&self) -> Option<IndexKind> {
        match &self.layout {
            Layout::Directory => Some(IndexKind::Directory),
            Layout::Library => match self.library_type {
                Some(LibraryType::SourceFile) => Some(IndexKind::SourceFile),
                Some(LibraryType::Library) => Some(IndexKind::Library),
                Some(LibraryType::Other(_)) | None => None,
            },
            Layout::Class => Some(IndexKind::Class),
            Layout::Function => Some(IndexKind::Function),
            Layout::Method => Some(IndexKind::Method),
            Layout::Enumeration => Some(IndexKind::Enumeration),
            Layout::Page => Some(IndexKind::Page),
            Layout::EngIndex => Some(IndexKind::EngIndex),
            Layout::Other(_) => None,
        }
    }
}

impl TryFrom<&RawPage> for PageRecord {
    type Error = RecordError;

    fn try_from(raw: &RawPage) -> Result<Self, Self::Error> {
        let origin = || {
            raw.source
                .clone()
                .or_else(|| raw.url.clone())
                .unwrap_or_else(|| "<unknown>".to_string())
        };
        let required = |value: &Option<String>, field: &'static str| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .ok_or_else(|| RecordError::MissingField {
                    field,
                    origin: origin(),
                })
        };

        let url = required(&raw.url, "url")?;
        let title = required(&raw.title, "title")?;
        let layout = required(&raw.layout, "layout")?;

        Ok(PageRecord {
            url,
            title,
            layout: Layout::parse(&layout),
            library_type: metadata::resolve(&[raw.library_type.as_deref()])
                .map(|t| LibraryType::parse(&t)),
            brief: metadata::resolve(&[raw.brief.as_deref()]),
            description: metadata::resolve(&[raw.description.as_deref()]),
            annotation: raw
                .annotation
                .iter()
                .filter_map(|a| metadata::resolve(&[Some(a.as_str())]))
                .collect(),
            tab: raw.tab.clone().filter(|tab| !tab.is_placeholder()),
            is_ctor: raw.is_ctor,
            is_dtor: raw.is_dtor,
        })
    }
}

/// Validate every raw record, keeping input order.
///
/// Malformed records are returned separately so callers can report them;
/// they never abort validation of the others.
pub fn validate_records(raw: &[RawPage]) -> (Vec<PageRecord>, Vec<RecordError>) {
    let mut records = Vec::with_capacity(raw.len());
    let mut skipped = Vec::new();
    for page in raw {
        match PageRecord::try_from(page) {
            Ok(record) => records.push(record),
            Err(e) => skipped.push(e),
        }
    }
    (records, skipped)
}
