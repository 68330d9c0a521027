//! Layout errors.

use std::fmt;

use crate::{BlockKind, LayoutRule, LayoutRulesFamily, ParameterKind};

/// A layout request that the selected target cannot satisfy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// The rule family has no packing rules for this kind of block
    /// (GLSL texture buffers, HLSL specialization constants, ...).
    UnsupportedBlock {
        family: LayoutRulesFamily,
        block: BlockKind,
    },
    /// The rule family has no binding class for this kind of object
    /// (HLSL images, HLSL combined texture-samplers, ...).
    UnsupportedObject {
        family: LayoutRulesFamily,
        kind: ParameterKind,
    },
    /// A size, offset or slot count does not fit in 64 bits (very large or
    /// deeply nested arrays).
    SizeOverflow { rule: LayoutRule },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::UnsupportedBlock { family, block } => write!(
                f,
                "{} layout rules do not support {} blocks",
                family.name(),
                block.name()
            ),
            LayoutError::UnsupportedObject { family, kind } => write!(
                f,
                "{} layout rules cannot bind a {} parameter",
                family.name(),
                kind.name()
            ),
            LayoutError::SizeOverflow { rule } => write!(
                f,
                "type is too large to lay out under {} rules",
                rule.name()
            ),
        }
    }
}

impl std::error::Error for LayoutError {}
