//! Free-text extractor for documentation prose.
//!
//! Kernel-style architecture introductions list mnemonics inline, grouped
//! under headers like "Arithmetic Operation Instructions". Every upper-case
//! run is a candidate; section words and numbers are dropped.

use super::html::{self, Page};
use super::Extractor;
use crate::canon::Ordering;
use crate::denylist;
use crate::validate::{self, Convention};
use markup5ever_rcdom::NodeData;
use regex::Regex;
use std::sync::LazyLock;

static RE_CO_MNEMONIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z][A-Z0-9.]+)\(([A-Z0-9.]+)\)").unwrap());

static RE_UPPER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][A-Z0-9.]{1,}\b").unwrap());

/// Headings that may delimit a section.
const SECTION_HEADINGS: &[&str] = &["h2", "h3", "h4"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Seeking,
    Inside,
    Done,
}

pub struct ProseExtractor {
    /// Heading text that marks the instruction list section.
    pub section_title: &'static str,
    /// Section number that marks it when the title is localized.
    pub section_number: &'static str,
}

impl Default for ProseExtractor {
    fn default() -> Self {
        ProseExtractor {
            section_title: "List of Instructions",
            section_number: "1.2.2",
        }
    }
}

impl Extractor for ProseExtractor {
    fn extract(&self, doc: &str) -> Vec<String> {
        let text = if html::looks_like_html(doc) {
            let page = Page::parse(doc);
            self.scope(&page).unwrap_or_else(|| page.text_content())
        } else {
            doc.to_string()
        };
        upper_tokens(&text)
    }

    fn convention(&self) -> Convention {
        Convention::Upper
    }

    fn ordering(&self) -> Ordering {
        Ordering::FirstSeen
    }
}

impl ProseExtractor {
    /// Text of the instruction list section, from its heading up to the next
    /// heading of the section levels. `None` if no heading matches.
    fn scope(&self, page: &Page) -> Option<String> {
        let mut state = Section::Seeking;
        let mut parts = Vec::new();

        page.walk(&mut |node, scope| match (state, &node.data) {
            (Section::Seeking, _) => {
                if html::tag(node).is_some_and(|t| SECTION_HEADINGS.contains(&t))
                    && self.is_section_heading(&validate::clean(&html::inner_text(node)))
                {
                    state = Section::Inside;
                }
            }
            (Section::Inside, NodeData::Element { .. }) => {
                if html::tag(node).is_some_and(|t| SECTION_HEADINGS.contains(&t)) {
                    state = Section::Done;
                }
            }
            // The matched heading's own text
            (Section::Inside, NodeData::Text { .. }) if scope.within(SECTION_HEADINGS) => {}
            (Section::Inside, NodeData::Text { contents }) => {
                let contents = contents.borrow();
                let trimmed = contents.trim();
                if !trimmed.is_empty() {
                    parts.push(trimmed.to_string());
                }
            }
            _ => {}
        });

        (state != Section::Seeking).then(|| parts.join("\n"))
    }

    fn is_section_heading(&self, text: &str) -> bool {
        text.contains(self.section_title) || text.starts_with(self.section_number)
    }
}

/// Upper-case runs of `blob`, with `TOKEN(OTHER)` read as two tokens.
pub fn upper_tokens(blob: &str) -> Vec<String> {
    let blob = RE_CO_MNEMONIC.replace_all(blob, "$1 $2");
    RE_UPPER_TOKEN
        .find_iter(&blob)
        .map(|m| m.as_str())
        .filter(|t| !t.chars().all(|c| c.is_ascii_digit()))
        .filter(|t| !denylist::is_section_word(t))
        .filter(|t| validate::is_valid_name(t))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(doc: &str) -> Vec<String> {
        ProseExtractor::default().extract(doc)
    }

    #[test]
    fn plain_text_tokens() {
        let doc = "Arithmetic Operation Instructions:\n\n    ADD.W SUB.W ADDI.W ADD.D SUB.D\n";
        assert_eq!(extract(doc), ["ADD.W", "SUB.W", "ADDI.W", "ADD.D", "SUB.D"]);
    }

    #[test]
    fn co_mnemonic_expanded() {
        assert_eq!(extract("TLBP(TLBSRCH) TLBRD"), ["TLBP", "TLBSRCH", "TLBRD"]);
    }

    #[test]
    fn section_words_dropped() {
        assert_eq!(extract("LOAD STORE LD.B BARRIER DBAR"), ["LD.B", "DBAR"]);
    }

    #[test]
    fn html_scoped_to_instruction_section() {
        let doc = "<h2>1.1 Registers</h2><p>GPR FPR</p>\
                   <h3>1.2.2 List of Instructions</h3><p>BEQ BNE</p><ul><li>JIRL</li></ul>\
                   <h3>1.3 Virtual Memory</h3><p>DMW TLB</p>";
        assert_eq!(extract(doc), ["BEQ", "BNE", "JIRL"]);
    }

    #[test]
    fn html_without_section_uses_whole_text() {
        let doc = "<h2>Overview</h2><p>BEQ &amp; BNE</p>";
        assert_eq!(extract(doc), ["BEQ", "BNE"]);
    }

    #[test]
    fn section_ends_at_next_heading_without_end_tags() {
        let doc = "<h3>List of Instructions</h3><p>LD.W ST.W<h4>Notes<p>MOVGR2FR.W";
        assert_eq!(extract(doc), ["LD.W", "ST.W"]);
    }
}
