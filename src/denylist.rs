//! Fixed word tables used to prune false positives after permissive matching.
//!
//! Bump [`VERSION`] whenever a table changes so that regenerated name lists can
//! be traced back to the policy that produced them.

pub const VERSION: u32 = 1;

/// Navigation and page-chrome labels that survive the upper-case check on
/// rendered documentation sites.
pub const NAVIGATION: &[&str] = &["Contents", "Back to top", "Home", "Previous", "Next"];

/// Section headers of free-text instruction overviews. Compared
/// case-insensitively against upper-case runs.
pub const SECTION_WORDS: &[&str] = &[
    "List",
    "Instructions",
    "Overview",
    "Arithmetic",
    "Bit",
    "Branch",
    "Load",
    "Store",
    "Atomic",
    "Barrier",
    "Special",
    "Privileged",
    "For",
    "Only",
];

pub fn is_section_word(token: &str) -> bool {
    SECTION_WORDS.iter().any(|w| w.eq_ignore_ascii_case(token))
}
