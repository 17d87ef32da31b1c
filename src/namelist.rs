//! Ordered, deduplicated name lists and their on-disk text form.

use crate::error::InputError;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Names in first-seen order, each present once.
#[derive(Debug, Clone, Default)]
pub struct NameList {
    names: Vec<String>,
    seen: HashSet<String>,
}

impl NameList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `name` unless already present. Returns whether it was added.
    pub fn push(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.seen.contains(&name) {
            return false;
        }
        self.seen.insert(name.clone());
        self.names.push(name);
        true
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn sort_case_insensitive(&mut self) {
        self.names.sort_by_cached_key(|n| (n.to_uppercase(), n.clone()));
    }

    /// Parse a newline-delimited list: trim, skip blanks and repeats.
    pub fn from_text(text: &str) -> Self {
        let mut list = NameList::new();
        for line in text.lines() {
            let name = line.trim();
            if !name.is_empty() {
                list.push(name);
            }
        }
        list
    }

    /// Read a name-list file written by `extract` (or by hand).
    pub fn read(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(InputError::MissingNameList(path.to_path_buf()).into());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read name list {}", path.display()))?;
        Ok(Self::from_text(&text))
    }
}

impl<'a> IntoIterator for &'a NameList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for NameList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = NameList::new();
        for name in iter {
            list.push(name);
        }
        list
    }
}

/// Concatenate lists in order, keeping the first occurrence of each name.
pub fn merge(lists: impl IntoIterator<Item = NameList>) -> NameList {
    lists.into_iter().flat_map(|l| l.names).collect()
}
