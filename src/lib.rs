//! Instruction-set documentation scaffolding.
//!
//! Reference documents come in many shapes. Each shape has an [`extract::Extractor`]
//! that pulls candidate mnemonics out of it; the [`canon::Canonicalizer`] turns
//! candidates into a definitive [`namelist::NameList`]; [`generate`] then writes
//! one templated file per name into bucket directories.

pub mod bucket;
pub mod canon;
pub mod denylist;
pub mod error;
pub mod extract;
pub mod generate;
pub mod namelist;
pub mod render;
pub mod slug;
pub mod source;
pub mod template;
pub mod validate;
