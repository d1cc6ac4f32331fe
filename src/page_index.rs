//! Directory/kind index of every documented page.
//!
//! Pages are grouped by the directory part of their URL, then by the kind of
//! entity they document. Each `(directory, kind)` cell is rendered into one
//! HTML fragment:
//!
//! ```text
//! "/point.hpp/"  → { "class": "<h3>Classes</h3><table …>…</table>",
//!                    "function": "<h3>Functions</h3>…" }
//! "/point.hpp/point/" → { "method": "<h3>Member Functions</h3>…" }
//! ```
//!
//! Both levels are `BTreeMap`s, so iteration and serialization order is the
//! lexicographic order of directory strings and kind names. Output is a pure
//! function of the input records.

use crate::render;
use crate::types::{IndexKind, PageRecord};
use crate::urls::{self, LinkContext};
use maud::{Markup, PreEscaped, html};
use std::collections::BTreeMap;

/// Rendered fragments of one directory, keyed by kind.
pub type DirectoryIndex = BTreeMap<IndexKind, String>;

/// `directory → kind → fragment`.
pub type PageIndex = BTreeMap<String, DirectoryIndex>;

/// How entry names are styled in an associated table.
#[derive(Clone, Copy)]
enum NameStyle {
    Plain,
    Code,
}

/// Build the page index.
///
/// Every page lands in exactly one directory group. Pages whose layout (or
/// library type) has no rendering rule still create their directory group
/// but add no rows to it.
pub fn build(pages: &[PageRecord], links: &LinkContext) -> PageIndex {
    let mut groups: BTreeMap<String, BTreeMap<IndexKind, Vec<&PageRecord>>> = BTreeMap::new();

    for page in pages {
        let directory = groups.entry(urls::directory_of(&page.url)).or_default();
        match page.kind() {
            Some(kind) => directory.entry(kind).or_default().push(page),
            None => tracing::trace!(
                url = %page.url,
                layout = page.layout.as_str(),
                "No index table for layout, skipping"
            ),
        }
    }

    groups
        .into_iter()
        .map(|(directory, kinds)| {
            let rendered = kinds
                .into_iter()
                .map(|(kind, entries)| (kind, render_group(kind, entries, links).into_string()))
                .collect();
            (directory, rendered)
        })
        .collect()
}

/// Render one `(directory, kind)` cell.
fn render_group(kind: IndexKind, mut entries: Vec<&PageRecord>, links: &LinkContext) -> Markup {
    // Method and engineering-index rows keep input order.
    if !matches!(kind, IndexKind::Method | IndexKind::EngIndex) {
        entries.sort_by(|a, b| a.title.cmp(&b.title));
    }

    match kind {
        IndexKind::Directory => associated_table("Directories", &entries, NameStyle::Code, links),
        IndexKind::SourceFile => associated_table("Sources", &entries, NameStyle::Code, links),
        IndexKind::Library => associated_table("Subcomponents", &entries, NameStyle::Plain, links),
        IndexKind::Class => associated_table("Classes", &entries, NameStyle::Plain, links),
        IndexKind::Function => associated_table("Functions", &entries, NameStyle::Plain, links),
        IndexKind::Enumeration => {
            associated_table("Enumerations", &entries, NameStyle::Plain, links)
        }
        IndexKind::Method => member_table(&entries, links),
        IndexKind::Page => compact_rows(&entries, "fa-book", links),
        IndexKind::EngIndex => compact_rows(&entries, "fa-folder", links),
    }
}

/// Two-column name/brief table used by most kinds.
fn associated_table(
    heading: &str,
    entries: &[&PageRecord],
    style: NameStyle,
    links: &LinkContext,
) -> Markup {
    html! {
        h3 { (heading) }
        table.associated-table {
            @for page in entries {
                tr {
                    td.name {
                        div {
                            a href=(links.relative_url(&page.url)) {
                                @match style {
                                    NameStyle::Code => { code { (page.title) } }
                                    NameStyle::Plain => { (page.title) }
                                }
                            }
                        }
                    }
                    td.brief { (render::description_cell(page)) }
                }
            }
        }
    }
}

/// Member function table: constructors, then destructors, then everything
/// else, each section in input order.
fn member_table(entries: &[&PageRecord], links: &LinkContext) -> Markup {
    html! {
        h3 { "Member Functions" }
        table.definition-table {
            @for page in entries.iter().filter(|p| p.is_ctor) {
                tr {
                    td.decl colspan="2" {
                        a href=(links.relative_url(&page.url)) { "(constructor)" }
                    }
                }
            }
            @for page in entries.iter().filter(|p| p.is_dtor) {
                tr {
                    td.decl colspan="2" {
                        a href=(links.relative_url(&page.url)) { "(destructor)" }
                    }
                }
            }
            @for page in entries.iter().filter(|p| !p.is_ctor && !p.is_dtor) {
                tr {
                    td.decl {
                        div { a href=(links.relative_url(&page.url)) { (page.title) } }
                    }
                    td.defn { (render::description_cell(page)) }
                }
            }
        }
    }
}

/// Icon + link rows, spliced by the client into an existing table.
fn compact_rows(entries: &[&PageRecord], icon: &str, links: &LinkContext) -> Markup {
    html! {
        @for page in entries {
            tr {
                td { i class={ "fa " (icon) } {} }
                td {
                    a href=(links.base_path_url(&page.url)) {
                        (PreEscaped(render::markdownify_inline(&page.title)))
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{link_texts, record};
    use pretty_assertions::assert_eq;

    fn fragment<'a>(index: &'a PageIndex, dir: &str, kind: IndexKind) -> &'a str {
        index
            .get(dir)
            .and_then(|d| d.get(&kind))
            .unwrap_or_else(|| panic!("no {kind:?} cell in {dir}. Index: {index:?}"))
    }

    #[test]
    fn classes_are_grouped_by_directory_and_sorted_by_title() {
        let pages = vec![record("/a/b", "B", "class"), record("/a/c", "A", "class")];
        let index = build(&pages, &LinkContext::default());

        assert_eq!(index.keys().collect::<Vec<_>>(), vec!["/a/"]);
        let html = fragment(&index, "/a/", IndexKind::Class);
        assert!(html.starts_with("<h3>Classes</h3><table class=\"associated-table\">"));
        assert_eq!(link_texts(html), vec!["A", "B"]);
    }

    #[test]
    fn directories_and_kinds_are_ordered() {
        let pages = vec![
            record("/z/f", "f", "function"),
            record("/a/m", "m", "method"),
            record("/a/c", "c", "class"),
            record("/a/e", "e", "enumeration"),
        ];
        let index = build(&pages, &LinkContext::default());
        assert_eq!(index.keys().collect::<Vec<_>>(), vec!["/a/", "/z/"]);
        let kinds: Vec<IndexKind> = index["/a/"].keys().copied().collect();
        assert_eq!(
            kinds,
            vec![IndexKind::Class, IndexKind::Enumeration, IndexKind::Method]
        );
    }

    #[test]
    fn sorted_kinds_use_title_order() {
        for layout in ["class", "function", "enumeration", "directory", "page"] {
            let pages = vec![
                record("/d/3", "gamma", layout),
                record("/d/1", "alpha", layout),
                record("/d/2", "beta", layout),
            ];
            let index = build(&pages, &LinkContext::default());
            let kind = pages[0].kind().unwrap();
            assert_eq!(
                link_texts(fragment(&index, "/d/", kind)),
                vec!["alpha", "beta", "gamma"],
                "layout {layout}"
            );
        }
    }

    #[test]
    fn library_groups_use_title_order() {
        use crate::types::LibraryType;

        let library = |url: &str, title: &str, library_type: LibraryType| {
            let mut page = record(url, title, "library");
            page.library_type = Some(library_type);
            page
        };
        let pages = vec![
            library("/lib/z.hpp/", "z.hpp", LibraryType::SourceFile),
            library("/lib/net/", "net", LibraryType::Library),
            library("/lib/a.hpp/", "a.hpp", LibraryType::SourceFile),
            library("/lib/core/", "core", LibraryType::Library),
            library("/lib/m.hpp/", "m.hpp", LibraryType::SourceFile),
            library("/lib/io/", "io", LibraryType::Library),
        ];
        let index = build(&pages, &LinkContext::default());

        assert_eq!(
            link_texts(fragment(&index, "/lib/", IndexKind::SourceFile)),
            vec!["a.hpp", "m.hpp", "z.hpp"]
        );
        assert_eq!(
            link_texts(fragment(&index, "/lib/", IndexKind::Library)),
            vec!["core", "io", "net"]
        );
    }

    #[test]
    fn equal_titles_keep_input_order() {
        let pages = vec![record("/d/2", "same", "class"), record("/d/1", "same", "class")];
        let index = build(&pages, &LinkContext::default());
        let html = fragment(&index, "/d/", IndexKind::Class);
        assert!(html.find("/d/2").unwrap() < html.find("/d/1").unwrap());
    }

    #[test]
    fn directory_names_are_code_styled() {
        let pages = vec![record("/a/sub/", "sub", "directory")];
        let index = build(&pages, &LinkContext::default());
        let html = fragment(&index, "/a/", IndexKind::Directory);
        assert!(html.starts_with("<h3>Directories</h3>"));
        assert!(html.contains("<a href=\"/a/sub/\"><code>sub</code></a>"));
    }

    #[test]
    fn library_pages_split_by_library_type() {
        let mut source = record("/lib/point.hpp/", "point.hpp", "library");
        source.library_type = Some(crate::types::LibraryType::SourceFile);
        let mut sub = record("/lib/geometry/", "geometry", "library");
        sub.library_type = Some(crate::types::LibraryType::Library);
        let mut odd = record("/lib/odd/", "odd", "library");
        odd.library_type = Some(crate::types::LibraryType::Other("module".into()));

        let index = build(&[source, sub, odd], &LinkContext::default());
        let lib = &index["/lib/"];
        assert_eq!(
            lib.keys().copied().collect::<Vec<_>>(),
            vec![IndexKind::Library, IndexKind::SourceFile]
        );
        let sources = &lib[&IndexKind::SourceFile];
        assert!(sources.starts_with("<h3>Sources</h3>"));
        assert!(sources.contains("<code>point.hpp</code>"));
        let subs = &lib[&IndexKind::Library];
        assert!(subs.starts_with("<h3>Subcomponents</h3>"));
        assert!(subs.contains(">geometry</a>"));
        assert!(!subs.contains("odd"));
    }

    #[test]
    fn methods_render_constructors_then_destructors_then_rest() {
        let mut dtor = record("/c/dtor", "~c", "method");
        dtor.is_dtor = true;
        let mut ctor = record("/c/ctor", "zzz", "method");
        ctor.is_ctor = true;
        let pages = vec![
            record("/c/size", "size", "method"),
            dtor,
            record("/c/at", "at", "method"),
            ctor,
        ];
        let index = build(&pages, &LinkContext::default());
        let html = fragment(&index, "/c/", IndexKind::Method);

        assert!(html.starts_with("<h3>Member Functions</h3><table class=\"definition-table\">"));
        assert_eq!(
            link_texts(html),
            vec!["(constructor)", "(destructor)", "size", "at"]
        );
        assert!(html.contains("<td class=\"decl\" colspan=\"2\"><a href=\"/c/ctor\">"));
        assert!(html.contains("<td class=\"defn\">"));
    }

    #[test]
    fn constructor_sections_keep_input_order() {
        let mut first = record("/c/b", "b", "method");
        first.is_ctor = true;
        let mut second = record("/c/a", "a", "method");
        second.is_ctor = true;
        let index = build(&[first, second], &LinkContext::default());
        let html = fragment(&index, "/c/", IndexKind::Method);
        assert!(html.find("/c/b").unwrap() < html.find("/c/a").unwrap());
    }

    #[test]
    fn page_rows_use_base_path_and_markdown_titles() {
        let links = LinkContext {
            baseurl: "/ignored".into(),
            base_path: "/site".into(),
        };
        let pages = vec![
            record("/guide/b.html", "Second *guide*", "page"),
            record("/guide/a.html", "First", "page"),
        ];
        let index = build(&pages, &links);
        let html = fragment(&index, "/guide/", IndexKind::Page);
        assert!(html.starts_with("<tr><td><i class=\"fa fa-book\"></i></td>"));
        assert!(html.contains("<a href=\"/site/guide/b.html\">Second <em>guide</em></a>"));
        assert!(html.find("First").unwrap() < html.find("Second").unwrap());
    }

    #[test]
    fn eng_index_rows_keep_input_order() {
        let pages = vec![record("/eng/z/", "Zeta", "eng_index"), record("/eng/a/", "Alpha", "eng_index")];
        let index = build(&pages, &LinkContext::default());
        let html = fragment(&index, "/eng/", IndexKind::EngIndex);
        assert!(html.contains("fa fa-folder"));
        assert_eq!(link_texts(html), vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn unknown_layout_adds_no_rows() {
        let pages = vec![record("/w/x", "X", "widget"), record("/a/b", "B", "class")];
        let index = build(&pages, &LinkContext::default());
        assert!(index["/w/"].is_empty());
        assert_eq!(index["/a/"].len(), 1);
        assert!(!index.values().flat_map(|d| d.values()).any(|html| html.contains("X")));
    }

    #[test]
    fn table_links_use_baseurl() {
        let links = LinkContext {
            baseurl: "/docs".into(),
            base_path: String::new(),
        };
        let index = build(&[record("/a/b/", "b", "class")], &links);
        assert!(fragment(&index, "/a/", IndexKind::Class).contains("href=\"/docs/a/b/\""));
    }

    #[test]
    fn titles_are_escaped_in_tables() {
        let index = build(&[record("/a/v", "vector<T>", "class")], &LinkContext::default());
        let html = fragment(&index, "/a/", IndexKind::Class);
        assert!(html.contains("vector&lt;T&gt;"));
        assert!(!html.contains("vector<T>"));
    }

    #[test]
    fn build_is_idempotent() {
        let mut m = record("/c/m", "m", "method");
        m.annotation = vec!["const".into()];
        let pages = vec![
            record("/a/b", "B", "class"),
            m,
            record("/p/x.html", "X", "page"),
        ];
        let links = LinkContext::default();
        assert_eq!(build(&pages, &links), build(&pages, &links));
    }
}
