//! Template materialization: splice a payload into the last fenced region.
//!
//! Location is separated from splicing: [`locate`] classifies the template
//! once into a [`Region`], and [`Region::splice`] applies it per payload. The
//! three outcomes are:
//!
//! - **Missing**: fewer than two fence markers; a fenced block is appended.
//! - **WellFormed**: the body between the opening marker's line and the
//!   closing marker is replaced; everything else is kept verbatim.
//! - **Malformed**: no newline between the last two markers; the marker pair
//!   is replaced by a fresh fenced block, dropping any language tag.

use crate::error::InputError;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const FENCE: &str = "```";

/// Default template file, looked up in the working directory.
pub const DEFAULT_TEMPLATE: &str = "template.md";

/// Designated substitution region of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Missing,
    WellFormed {
        open: usize,
        body_start: usize,
        close: usize,
    },
    Malformed {
        open: usize,
        close: usize,
    },
}

/// Classify the last fenced region of `text`.
pub fn locate(text: &str) -> Region {
    let markers: Vec<usize> = text.match_indices(FENCE).map(|(i, _)| i).collect();
    let [.., open, close] = markers.as_slice() else {
        return Region::Missing;
    };
    let (open, close) = (*open, *close);
    match text[open..close].find('\n') {
        Some(nl) => Region::WellFormed {
            open,
            body_start: open + nl + 1,
            close,
        },
        None => Region::Malformed { open, close },
    }
}

impl Region {
    /// Splice `payload` into `text`, which must be the text this region was
    /// located in.
    pub fn splice(self, text: &str, payload: &str) -> String {
        match self {
            Region::Missing => {
                let head = text.trim_end();
                if head.is_empty() {
                    format!("{FENCE}\n{payload}\n{FENCE}\n")
                } else {
                    format!("{head}\n\n{FENCE}\n{payload}\n{FENCE}\n")
                }
            }
            Region::WellFormed {
                body_start, close, ..
            } => {
                let mut out = String::with_capacity(text.len() + payload.len());
                out.push_str(&text[..body_start]);
                out.push_str(payload);
                out.push_str(&text[close..]);
                out
            }
            Region::Malformed { open, close } => {
                format!(
                    "{}{FENCE}\n{payload}\n{FENCE}{}",
                    &text[..open],
                    &text[close + FENCE.len()..]
                )
            }
        }
    }
}

/// Replace the body of the last fenced region of `text` with `payload`.
pub fn materialize(text: &str, payload: &str) -> String {
    locate(text).splice(text, payload)
}

/// Body of the designated region without its line terminator, if the region
/// is well-formed.
pub fn fenced_body(text: &str) -> Option<&str> {
    match locate(text) {
        Region::WellFormed {
            body_start, close, ..
        } => {
            let body = &text[body_start..close];
            Some(body.strip_suffix('\n').unwrap_or(body))
        }
        _ => None,
    }
}

/// A template read once and applied to many payloads.
#[derive(Debug, Clone)]
pub struct Template {
    text: String,
    region: Region,
}

impl Template {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let region = locate(&text);
        Template { text, region }
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(InputError::MissingTemplate(path.to_path_buf()).into());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read template {}", path.display()))?;
        Ok(Self::new(text))
    }

    /// Load `path`, or [`DEFAULT_TEMPLATE`] when none is given.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let path = path.map_or_else(|| PathBuf::from(DEFAULT_TEMPLATE), Path::to_path_buf);
        Self::load(&path)
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn render(&self, payload: &str) -> String {
        self.region.splice(&self.text, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DOC: &str = "# Title\n\n```ts\nexample()\n```\n\nUsage:\n\n```text\nPLACEHOLDER\n```\n\nfooter\n";

    #[test]
    fn locate_outcomes() {
        assert_eq!(locate("no fences"), Region::Missing);
        assert_eq!(locate("one ``` only"), Region::Missing);
        assert!(matches!(locate("```a```"), Region::Malformed { open: 0, close: 4 }));
        assert!(matches!(locate(DOC), Region::WellFormed { .. }));
    }

    #[test]
    fn replaces_last_region_only() {
        let out = materialize(DOC, "VADDPD");
        assert_eq!(
            out,
            "# Title\n\n```ts\nexample()\n```\n\nUsage:\n\n```text\nVADDPD```\n\nfooter\n"
        );
    }

    #[test]
    fn round_trip_single_fence() {
        let tpl = "Intro\n```\nold body\n```\n";
        let out = materialize(tpl, "VADDPD");
        assert_eq!(fenced_body(&out), Some("VADDPD"));
        assert!(out.starts_with("Intro\n```\n"));
    }

    #[test]
    fn appends_when_missing() {
        let out = materialize("# Heading\n\nSome text.\n\n\n", "ADD");
        assert_eq!(out, "# Heading\n\nSome text.\n\n```\nADD\n```\n");
        assert_eq!(fenced_body(&out), Some("ADD"));
        assert!(out.ends_with("```\nADD\n```\n"));
    }

    #[test]
    fn appends_to_empty_template() {
        assert_eq!(materialize("", "ADD"), "```\nADD\n```\n");
    }

    #[test]
    fn single_marker_counts_as_missing() {
        let out = materialize("see ``` here", "ADD");
        assert_eq!(out, "see ``` here\n\n```\nADD\n```\n");
    }

    #[test]
    fn malformed_region_replaced_whole() {
        let out = materialize("before ```lang body``` after", "LDR");
        assert_eq!(out, "before ```\nLDR\n``` after");
    }

    #[test]
    fn payload_kept_verbatim() {
        let out = materialize("```\nx\n```", "BLX (immediate)");
        assert_eq!(out, "```\nBLX (immediate)```");
    }

    #[test]
    fn template_reuses_region() {
        let tpl = Template::new(DOC);
        assert!(matches!(tpl.region(), Region::WellFormed { .. }));
        assert_eq!(tpl.render("ADD"), materialize(DOC, "ADD"));
    }

    #[test]
    fn load_missing_template() {
        let err = Template::load(Path::new("/nonexistent/template.md")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<InputError>(),
            Some(InputError::MissingTemplate(_))
        ));
    }

    proptest! {
        #[test]
        fn second_materialize_touches_only_last_region(
            prefix in "[a-z \n]{0,20}",
            first in "[A-Z]{1,8}",
            second in "[A-Z]{1,8}",
        ) {
            let tpl = format!("{prefix}```c\nkept\n```\n\n```\nbody\n```\ntail\n");
            let once = materialize(&tpl, &first);
            let twice = materialize(&once, &second);
            let earlier = format!("{prefix}```c\nkept\n```\n\n```\n");
            prop_assert!(twice.starts_with(&earlier));
            prop_assert!(twice.ends_with("```\ntail\n"));
            prop_assert_eq!(fenced_body(&twice), Some(second.as_str()));
        }

        #[test]
        fn round_trip_payload(payload in "[A-Z][A-Z0-9]{0,10}") {
            let out = materialize("Doc\n```asm\nPLACEHOLDER\n```\n", &payload);
            prop_assert_eq!(fenced_body(&out), Some(payload.as_str()));
        }
    }
}
