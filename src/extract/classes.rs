//! Class-listing extractor for pre-tokenized `CLASS: mnem mnem ...` lines.

use super::Extractor;
use crate::bucket::{self, ClassScheme};
use crate::canon::Ordering;
use crate::validate::{self, Convention};

pub struct ClassListing {
    pub scheme: ClassScheme,
}

impl ClassListing {
    pub fn riscv() -> Self {
        ClassListing {
            scheme: bucket::RISCV,
        }
    }

    /// `(class, mnemonic)` pairs in listing order.
    ///
    /// Lines that do not start with a class token are skipped, as are
    /// tokens that are not lower-case mnemonics.
    pub fn pairs(&self, doc: &str) -> Vec<(String, String)> {
        let mut out = Vec::new();
        for line in doc.lines() {
            let line = line.replace(':', " ");
            let mut tokens = line.split_whitespace();
            let Some(class) = tokens.next() else {
                continue;
            };
            if !self.scheme.is_class_token(class) {
                continue;
            }
            for token in tokens.filter(|t| validate::is_lower_mnemonic(t)) {
                out.push((class.to_string(), token.to_string()));
            }
        }
        out
    }
}

impl Extractor for ClassListing {
    fn extract(&self, doc: &str) -> Vec<String> {
        self.pairs(doc).into_iter().map(|(_, m)| m).collect()
    }

    fn convention(&self) -> Convention {
        Convention::Lower
    }

    fn ordering(&self) -> Ordering {
        Ordering::FirstSeen
    }
}
