//! Tab strip: one link per page that declares a `tab`.

use crate::types::{PageRecord, Tab};
use crate::urls::LinkContext;
use maud::html;

/// Render the tab strip.
///
/// Pages without a `tab` are ignored; an empty `tab` still counts. The rest
/// are ordered by their tab value (stable, so ties keep input order) and
/// rendered as `<a class="page-link">` anchors whose text is the tab value.
pub fn build(pages: &[PageRecord], links: &LinkContext) -> String {
    let mut tabbed: Vec<(&Tab, &PageRecord)> = pages
        .iter()
        .filter_map(|p| p.tab.as_ref().map(|tab| (tab, p)))
        .collect();
    tabbed.sort_by(|a, b| a.0.cmp(b.0));

    html! {
        @for (tab, page) in &tabbed {
            a.page-link href=(links.relative_url(&page.url)) { (tab.to_string()) }
        }
    }
    .into_string()
}
