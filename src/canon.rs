//! Canonicalization: from raw candidates to a definitive name list.
//!
//! Steps, in order: clean, drop denylisted chrome, split comma-joined aliases,
//! dedup keeping first-seen order, then optionally sort.

use crate::denylist;
use crate::extract::Extractor;
use crate::namelist::NameList;
use crate::validate::{self, Convention};
use regex::Regex;
use std::sync::LazyLock;

static RE_COMPOUND_SEP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*,\s*").unwrap());

/// Final presentation order of a name list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordering {
    /// Order of first appearance in the source.
    FirstSeen,
    /// Upper-cased value first, original value as tie-break. Used for
    /// sources whose extraction order means nothing (unioned HTML sets).
    CaseInsensitive,
}

#[derive(Debug, Clone)]
pub struct Canonicalizer {
    pub convention: Convention,
    pub ordering: Ordering,
    pub denylist: &'static [&'static str],
}

impl Canonicalizer {
    pub fn new(convention: Convention, ordering: Ordering) -> Self {
        Canonicalizer {
            convention,
            ordering,
            denylist: denylist::NAVIGATION,
        }
    }

    /// Canonicalizer matching an extractor's conventions.
    pub fn for_extractor(extractor: &dyn Extractor) -> Self {
        Self::new(extractor.convention(), extractor.ordering())
    }

    pub fn canonicalize<I, S>(&self, candidates: I) -> NameList
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = NameList::new();
        for candidate in candidates {
            let name = validate::clean(candidate.as_ref());
            if name.is_empty() || self.denylist.contains(&name.as_str()) {
                continue;
            }
            for part in self.split_compound(&name) {
                list.push(part);
            }
        }
        if self.ordering == Ordering::CaseInsensitive {
            list.sort_case_insensitive();
        }
        list
    }

    /// Split `"BL, BLX"` into its aliases when every alias validates on its
    /// own; otherwise keep the name whole.
    pub fn split_compound(&self, name: &str) -> Vec<String> {
        let parts: Vec<String> = RE_COMPOUND_SEP
            .split(name)
            .map(validate::clean)
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() > 1 && parts.iter().all(|p| self.convention.accepts(p)) {
            parts
        } else {
            vec![name.to_string()]
        }
    }
}
