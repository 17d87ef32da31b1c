//! Source extractors: one per document shape, dispatched by [`SourceShape`].

pub mod classes;
pub mod html;
pub mod intrinsics;
pub mod manual;
pub mod markup;
pub mod prose;

use crate::canon::Ordering;
use crate::error::InputError;
use crate::validate::Convention;
use std::str::FromStr;

/// Turns one raw document into validated candidate names, in document order.
pub trait Extractor {
    fn extract(&self, doc: &str) -> Vec<String>;
    fn convention(&self) -> Convention;
    fn ordering(&self) -> Ordering;
}

/// Shape of a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceShape {
    /// Rendered HTML instruction index (ARM developer documentation).
    Markup,
    /// Reference manual flattened to text (Intel SDM, AMD APM).
    Manual,
    /// Free documentation prose (kernel LoongArch introduction).
    Prose,
    /// Per-instruction intrinsics guide pages.
    Intrinsics,
    /// Pre-tokenized `CLASS: mnem mnem ...` listings (binutils RISC-V opcodes).
    Classes,
}

impl FromStr for SourceShape {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "markup" | "html" => Ok(SourceShape::Markup),
            "manual" | "pdf" => Ok(SourceShape::Manual),
            "prose" | "kernel" => Ok(SourceShape::Prose),
            "intrinsics" => Ok(SourceShape::Intrinsics),
            "classes" | "riscv" => Ok(SourceShape::Classes),
            _ => Err(InputError::UnknownShape(s.to_string())),
        }
    }
}

/// Create the extractor for a source shape.
pub fn create_extractor(shape: SourceShape) -> Box<dyn Extractor> {
    match shape {
        SourceShape::Markup => Box::new(markup::MarkupExtractor),
        SourceShape::Manual => Box::new(manual::ManualExtractor),
        SourceShape::Prose => Box::new(prose::ProseExtractor::default()),
        SourceShape::Intrinsics => Box::new(intrinsics::IntrinsicsExtractor),
        SourceShape::Classes => Box::new(classes::ClassListing::riscv()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_aliases() {
        assert_eq!("html".parse::<SourceShape>().unwrap(), SourceShape::Markup);
        assert_eq!("pdf".parse::<SourceShape>().unwrap(), SourceShape::Manual);
        assert_eq!("kernel".parse::<SourceShape>().unwrap(), SourceShape::Prose);
        assert_eq!("riscv".parse::<SourceShape>().unwrap(), SourceShape::Classes);
        assert!("xml".parse::<SourceShape>().is_err());
    }

    #[test]
    fn conventions_follow_shape() {
        assert_eq!(
            create_extractor(SourceShape::Markup).convention(),
            Convention::Upper
        );
        assert_eq!(
            create_extractor(SourceShape::Intrinsics).convention(),
            Convention::Lower
        );
        assert_eq!(
            create_extractor(SourceShape::Markup).ordering(),
            Ordering::CaseInsensitive
        );
        assert_eq!(
            create_extractor(SourceShape::Manual).ordering(),
            Ordering::FirstSeen
        );
    }
}
