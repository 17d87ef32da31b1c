//! Markup-anchor extractor for rendered instruction index pages.
//!
//! Three page layouts are in circulation and a page does not announce which
//! one it uses, so all three heuristics run and their results are unioned:
//!
//! - legacy index pages carry the name in `<a title="...">`;
//! - current index pages put it in the link text inside lists, tables and
//!   sections;
//! - per-instruction detail pages only have it in a heading.

use super::html::{self, Page, Scope};
use super::Extractor;
use crate::canon::Ordering;
use crate::validate::{self, Convention};

/// Containers whose links are taken as instruction entries.
const ANCHOR_CONTAINERS: &[&str] = &["main", "section", "article", "ul", "ol", "table"];

/// Containers whose `h1`/`h2` headings are taken as instruction names.
const HEADING_CONTAINERS: &[&str] = &["main", "article"];

pub struct MarkupExtractor;

impl Extractor for MarkupExtractor {
    fn extract(&self, doc: &str) -> Vec<String> {
        let mut found = Vec::new();
        Page::parse(doc).walk(&mut |node, scope| match html::tag(node) {
            Some("a") => {
                if let Some(title) = html::attr(node, "title") {
                    accept(&mut found, &title);
                }
                if scope.within(ANCHOR_CONTAINERS) {
                    accept(&mut found, &html::inner_text(node));
                }
            }
            Some(name) if is_name_heading(name, scope) => {
                accept(&mut found, &html::inner_text(node));
            }
            _ => {}
        });
        found
    }

    fn convention(&self) -> Convention {
        Convention::Upper
    }

    fn ordering(&self) -> Ordering {
        Ordering::CaseInsensitive
    }
}

fn is_name_heading(name: &str, scope: &Scope) -> bool {
    match name {
        "h1" | "h2" => scope.within(HEADING_CONTAINERS),
        "h3" => true,
        _ => false,
    }
}

fn accept(found: &mut Vec<String>, raw: &str) {
    let name = validate::clean(raw);
    if validate::is_valid_name(&name) {
        found.push(name);
    }
}
