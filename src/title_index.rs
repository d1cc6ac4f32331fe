//! Flat `url → title` lookup.

use crate::types::PageRecord;
use std::collections::BTreeMap;

pub type TitleIndex = BTreeMap<String, String>;

/// One entry per page. Duplicate URLs: the last record wins.
pub fn build(pages: &[PageRecord]) -> TitleIndex {
    let mut index = TitleIndex::new();
    for page in pages {
        index.insert(page.url.clone(), page.title.clone());
    }
    index
}
