//! # Site Indices
//!
//! Build-time generator for the client-side navigation indices of a
//! documentation site. Every page of the site describes itself in YAML front
//! matter (its layout, title, brief, annotations…); this crate turns that
//! flat collection into three lookup tables the site's browser scripts use
//! to draw directory listings, the tab strip and page titles.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      docs/          →  manifest.json   (front matter → page records)
//! 2. Generate  manifest.json  →  indices.js      (page records → three tables)
//! ```
//!
//! The manifest is human-readable JSON, so what the scanner saw can be
//! inspected before anything is rendered. The generate stage is a pure
//! function of the manifest: the same manifest always produces a
//! byte-identical artifact.
//!
//! # The Three Tables
//!
//! | Global | Built by | Shape |
//! |--------|----------|-------|
//! | `pageIndex` | [`page_index::build`] | directory → kind → HTML fragment |
//! | `tabIndex` | [`tab_index::build`] | one HTML fragment (ordered links) |
//! | `titleIndex` | [`title_index::build`] | url → title |
//!
//! Global names are configurable (see [`config`]).
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1 — walks the docs tree, reads front matter, produces the manifest |
//! | [`generate`] | Stage 2 — validates records, builds the tables, writes the artifact |
//! | [`page_index`] | Directory/kind grouping and per-kind table rendering |
//! | [`tab_index`] | Tab strip |
//! | [`title_index`] | URL → title lookup |
//! | [`render`] | Shared fragment helpers: Markdown, description cells, annotations |
//! | [`types`] | Raw and validated page records, layouts, index kinds |
//! | [`metadata`] | Front-matter field lookup, placeholder filtering, fallbacks |
//! | [`urls`] | Page URLs, directory keys, link prefixing |
//! | [`config`] | `config.toml` loading, validation and merging |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Closed Set of Kinds
//!
//! Each layout with a rendering rule maps to one [`types::IndexKind`] and
//! each kind to exactly one renderer in [`page_index`]. Pages with any other
//! layout are kept (they still have titles) but add no rows. Adding a table
//! means adding a variant, and the compiler points at every `match` that
//! needs it.
//!
//! ## Permissive Input
//!
//! Only `url`, `title` and `layout` are required. A record missing one of them
//! is skipped with a warning; it never fails the build. Every optional field
//! has a fallback, so rendering itself cannot fail.
//!
//! ## Maud for Fragments
//!
//! Fragments are generated with [Maud](https://maud.lambda.xyz/): titles are
//! escaped by default and malformed markup is a compile error.

pub mod config;
pub mod generate;
pub mod metadata;
pub mod output;
pub mod page_index;
pub mod render;
pub mod scan;
pub mod tab_index;
pub mod title_index;
pub mod types;
pub mod urls;

#[cfg(test)]
pub(crate) mod test_helpers;
