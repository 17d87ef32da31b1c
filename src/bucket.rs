//! Buckets: the output directories artifacts are grouped into.
//!
//! A bucket comes either from a `LABEL=FILE` binding on the command line or
//! from an instruction-class token such as `INSN_CLASS_D_AND_ZFA`.

use crate::error::InputError;
use std::path::PathBuf;

/// Naming scheme of instruction-class tokens for one architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassScheme {
    pub prefix: &'static str,
    /// Prepended to the bucket identifier.
    pub tag: &'static str,
    /// First letters of a class body reserved for vendor extensions.
    pub vendor_marker: &'static str,
}

/// Class tokens of the binutils RISC-V opcode tables.
pub const RISCV: ClassScheme = ClassScheme {
    prefix: "INSN_CLASS_",
    tag: "riscv",
    vendor_marker: "X",
};

/// Infixes joining several extensions in one class token.
const COMPOUND_INFIXES: &[&str] = &["_AND_", "_OR_"];

impl ClassScheme {
    fn body<'a>(&self, token: &'a str) -> Option<&'a str> {
        token.strip_prefix(self.prefix).filter(|body| {
            !body.is_empty()
                && body
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        })
    }

    pub fn is_class_token(&self, token: &str) -> bool {
        self.body(token).is_some()
    }

    /// Bucket identifier of a class token.
    ///
    /// Compound classes ("D and Zfa", "Smctr or Ssctr") go to the bucket of
    /// their left-most extension.
    pub fn bucket(&self, class: &str) -> Option<String> {
        let mut body = self.body(class)?;
        for infix in COMPOUND_INFIXES {
            if let Some(idx) = body.find(infix) {
                body = &body[..idx];
            }
        }
        Some(format!("{}_{}", self.tag, body.to_lowercase()))
    }

    pub fn is_vendor(&self, class: &str) -> bool {
        self.body(class)
            .is_some_and(|body| body.starts_with(self.vendor_marker))
    }
}

/// A `LABEL=FILE` pair binding a bucket to its name-list file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketBinding {
    pub label: String,
    pub list: PathBuf,
}

impl BucketBinding {
    pub fn parse(spec: &str) -> Result<Self, InputError> {
        let malformed = |reason| InputError::MalformedBinding {
            spec: spec.to_string(),
            reason,
        };
        let (label, list) = spec.split_once('=').ok_or_else(|| malformed("missing `=`"))?;
        let (label, list) = (label.trim(), list.trim());
        if label.is_empty() {
            return Err(malformed("empty label"));
        }
        if list.is_empty() {
            return Err(malformed("empty file path"));
        }
        if label == "." || label == ".." || label.contains(['/', '\\']) {
            return Err(malformed("label must be a single directory name"));
        }
        Ok(BucketBinding {
            label: label.to_string(),
            list: PathBuf::from(list),
        })
    }
}
