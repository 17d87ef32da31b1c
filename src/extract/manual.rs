//! Reference-manual extractor for PDF text dumps.
//!
//! Instruction reference chapters open every entry with a heading line such as
//! `ADD — Add` or `VADDPD — Add Packed Double-Precision Floating-Point Values`.
//! Only those heading lines are trusted; the body text is ignored.

use super::Extractor;
use crate::canon::Ordering;
use crate::validate::{self, Convention};
use regex::Regex;
use std::sync::LazyLock;

// TOKEN, optional (CO-TOKEN), then hyphen / en dash / em dash between blanks.
static RE_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^([A-Z]{2,}[A-Z0-9.+/_-]*)(?:\(([A-Z][A-Z0-9.+/_-]*)\))?[ \t]+[-\x{2013}\x{2014}][ \t]+",
    )
    .unwrap()
});

pub struct ManualExtractor;

impl Extractor for ManualExtractor {
    fn extract(&self, doc: &str) -> Vec<String> {
        let mut found = Vec::new();
        for caps in RE_HEADING.captures_iter(doc) {
            for token in caps.iter().skip(1).flatten() {
                if let Some(name) = accept(token.as_str()) {
                    found.push(name);
                }
            }
        }
        found
    }

    fn convention(&self) -> Convention {
        Convention::Upper
    }

    fn ordering(&self) -> Ordering {
        Ordering::FirstSeen
    }
}

fn accept(token: &str) -> Option<String> {
    let token = token.trim().trim_end_matches('/');
    let letters = token.chars().filter(|c| c.is_ascii_alphabetic()).count();
    if letters < 2 || token.to_uppercase() != token || !validate::is_valid_name(token) {
        return None;
    }
    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(doc: &str) -> Vec<String> {
        ManualExtractor.extract(doc)
    }

    #[test]
    fn heading_lines_with_dash_variants() {
        let doc = "ADD \u{2014} Add\n\
                   VADDPD \u{2013} Add Packed Double-Precision Floating-Point Values\n\
                   PF2ID - Packed Floating-Point to Integer\n";
        assert_eq!(extract(doc), ["ADD", "VADDPD", "PF2ID"]);
    }

    #[test]
    fn body_text_ignored() {
        let doc = "The ADD instruction \u{2014} adds\n  SUB \u{2014} indented\nADD\u{2014}no spaces\n";
        assert!(extract(doc).is_empty());
    }

    #[test]
    fn punctuation_in_tokens() {
        let doc = "SHA1RNDS4 \u{2014} Perform Four Rounds\nCMPS/CMPSB/CMPSW/ \u{2014} Compare\n";
        assert_eq!(extract(doc), ["SHA1RNDS4", "CMPS/CMPSB/CMPSW"]);
    }

    #[test]
    fn co_mnemonic_in_parentheses() {
        let doc = "TLBP(TLBSRCH) \u{2014} Probe TLB\n";
        assert_eq!(extract(doc), ["TLBP", "TLBSRCH"]);
    }

    #[test]
    fn single_letter_and_lowercase_rejected() {
        let doc = "A \u{2014} Appendix\nAdd \u{2014} prose\n";
        assert!(extract(doc).is_empty());
    }
}
