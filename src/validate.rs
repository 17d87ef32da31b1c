//! Token validation: decides whether a string plausibly names an instruction.
//!
//! Two regimes exist because sources disagree on case: architecture manuals
//! spell mnemonics in upper case (`VADDPD`, `BL, BLX`), RISC-V and LoongArch
//! intrinsics guides in lower case with dots (`vadd.vv`, `vadd.b`).

use regex::Regex;
use std::sync::LazyLock;

/// Longest string still considered a mnemonic.
pub const MAX_NAME_LEN: usize = 100;

// Balanced operand-form qualifier such as "(immediate)".
static RE_QUALIFIER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^()]*\)").unwrap());

static RE_CORE_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9\s,()/+\-_]").unwrap());

static RE_LOWER_MNEMONIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_.]+$").unwrap());

/// Case convention of a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convention {
    Upper,
    Lower,
}

impl Convention {
    pub fn accepts(self, s: &str) -> bool {
        match self {
            Convention::Upper => is_valid_name(s),
            Convention::Lower => is_lower_mnemonic(s),
        }
    }
}

/// Collapse whitespace runs to single spaces and trim.
pub fn clean(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Upper-case regime.
///
/// Permissive on purpose: digits, spaces, `, ( ) / + - _` and parenthesized
/// qualifiers are ignored, and whatever letters remain must already be upper
/// case. Prose fails because mixed-case words survive the stripping.
pub fn is_valid_name(s: &str) -> bool {
    let s = clean(s);
    if s.is_empty() || s.chars().count() > MAX_NAME_LEN {
        return false;
    }
    let unqualified = RE_QUALIFIER.replace_all(&s, "");
    let core = RE_CORE_NOISE.replace_all(&unqualified, "");
    !core.is_empty() && core.to_uppercase() == core
}

/// Lower-case regime: letters, digits, `_` and `.` only.
pub fn is_lower_mnemonic(s: &str) -> bool {
    s.len() <= MAX_NAME_LEN && RE_LOWER_MNEMONIC.is_match(s)
}
