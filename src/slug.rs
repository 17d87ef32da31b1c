//! Filename slugs for generated artifacts.
//!
//! The artifact keeps the original mnemonic in its body; only the filename is
//! normalized, so the mapping is allowed to be lossy.

/// Substituted when a name has no usable characters at all.
pub const FALLBACK: &str = "instr";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugStyle {
    /// `BLX (immediate)` → `blx-immediate`
    Hyphenated,
    /// `vadd.vv` → `vadd_vv`, for lower-case dotted mnemonics.
    Mnemonic,
}

impl SlugStyle {
    pub fn apply(self, name: &str) -> String {
        match self {
            SlugStyle::Hyphenated => slug(name),
            SlugStyle::Mnemonic => mnemonic_slug(name),
        }
    }

    /// Separator used before a disambiguating counter.
    pub fn separator(self) -> char {
        match self {
            SlugStyle::Hyphenated => '-',
            SlugStyle::Mnemonic => '_',
        }
    }
}

/// Lower-case, collapse every run outside `[a-z0-9]` to a single `-`, trim `-`.
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else {
            pending_dash = true;
        }
    }
    if out.is_empty() {
        FALLBACK.to_string()
    } else {
        out
    }
}

/// Lower-case, anything outside `[a-z0-9_]` (notably `.`) becomes `_`.
pub fn mnemonic_slug(name: &str) -> String {
    let out: String = name
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if out.is_empty() {
        FALLBACK.to_string()
    } else {
        out
    }
}
