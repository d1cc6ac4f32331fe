//! Shared HTML rendering helpers for index fragments.
//!
//! Fragments are built with [maud](https://maud.lambda.xyz/), so titles and
//! annotations are escaped automatically. Briefs and descriptions are
//! Markdown and go through `pulldown-cmark` first; the resulting HTML is
//! inserted as-is, which matches what a Jekyll `markdownify` filter does.

use crate::metadata;
use crate::types::PageRecord;
use maud::{Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};

/// Render a Markdown string to HTML.
pub fn markdownify(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

/// Render a single line of Markdown without the wrapping paragraph.
pub fn markdownify_inline(markdown: &str) -> String {
    let block = markdownify(markdown);
    let trimmed = block.trim_end();
    match trimmed
        .strip_prefix("<p>")
        .and_then(|s| s.strip_suffix("</p>"))
    {
        Some(inner) if !inner.contains("<p>") => inner.to_string(),
        _ => trimmed.to_string(),
    }
}

/// The description cell body: rendered summary plus the annotation suffix.
pub fn description_cell(page: &PageRecord) -> Markup {
    html! {
        (PreEscaped(markdownify(metadata::summary(page))))
        (annotation(&page.annotation))
    }
}

/// `(a, b)` in an annotation span, or nothing for an empty list.
pub fn annotation(items: &[String]) -> Markup {
    html! {
        @if !items.is_empty() {
            span.annotation { "(" (items.join(", ")) ")" }
        }
    }
}
