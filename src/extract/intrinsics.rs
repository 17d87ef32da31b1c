//! Instruction-field extractor for intrinsics guide pages.
//!
//! Each intrinsic page names its machine instruction in a field such as
//! `Instruction: vadd.b vr, vr, vr`. The mnemonic is kept as written.

use super::html::{self, Page};
use super::Extractor;
use crate::canon::Ordering;
use crate::validate::{self, Convention};
use regex::Regex;
use std::sync::LazyLock;

static RE_INSTRUCTION_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i:instruction):\s*([a-z0-9_.]+)").unwrap());

pub struct IntrinsicsExtractor;

impl Extractor for IntrinsicsExtractor {
    fn extract(&self, doc: &str) -> Vec<String> {
        // Field label and value are often split across inline elements
        let text = if html::looks_like_html(doc) {
            Page::parse(doc).text_content()
        } else {
            doc.to_string()
        };
        RE_INSTRUCTION_FIELD
            .captures_iter(&text)
            .map(|caps| caps[1].to_string())
            .filter(|token| validate::is_lower_mnemonic(token))
            .collect()
    }

    fn convention(&self) -> Convention {
        Convention::Lower
    }

    fn ordering(&self) -> Ordering {
        Ordering::FirstSeen
    }
}

/// Links of an index page that point into `subdir/`, sorted and deduplicated.
///
/// The guide's index links every intrinsic page relative to the site root
/// (`lsx/integer_computation/`, `/lasx/shuffling/`).
pub fn page_links(index: &str, subdir: &str) -> Vec<String> {
    let prefix = format!("{}/", subdir.trim_matches('/'));
    let mut links: Vec<String> = Page::parse(index)
        .links()
        .into_iter()
        .map(|href| href.trim_start_matches('/').to_string())
        .filter(|href| href.starts_with(&prefix))
        .collect();
    links.sort();
    links.dedup();
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instruction_fields() {
        let page = "__m128i __lsx_vadd_b (__m128i a, __m128i b)\n\
                    #include <lsxintrin.h>\n\
                    Instruction: vadd.b vr, vr, vr\n\
                    CPU Flags: LSX\n\
                    INSTRUCTION:vsub.h vr, vr, vr\n";
        assert_eq!(IntrinsicsExtractor.extract(page), ["vadd.b", "vsub.h"]);
    }

    #[test]
    fn token_stays_lowercase() {
        // The label is case-insensitive, the mnemonic is not.
        assert!(IntrinsicsExtractor.extract("Instruction: VADD.B").is_empty());
    }

    #[test]
    fn html_page_with_markup_around_field() {
        let page = "<p><strong>Instruction:</strong> xvextrins.w xr, xr, imm</p>\
                    <p>Instruction: <code>xvpickve.d</code></p>";
        assert_eq!(IntrinsicsExtractor.extract(page), ["xvextrins.w", "xvpickve.d"]);
    }

    #[test]
    fn index_links_under_subdir() {
        let index = r#"<a href="/lsx/misc/">Misc</a><a href="lasx/misc/">M</a>
                       <a href="lsx/bitwise/">B</a><a href="/lsx/misc/">again</a><a>none</a>"#;
        assert_eq!(page_links(index, "lsx"), ["lsx/bitwise/", "lsx/misc/"]);
        assert_eq!(page_links(index, "/lasx/"), ["lasx/misc/"]);
    }
}
