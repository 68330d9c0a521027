//! Rule families and code-generation targets.

use std::fmt;
use std::str::FromStr;

use shade_types::ParameterBlockKind;

use crate::LayoutRule;

/// What a set of packing rules is being selected for.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockKind {
    ConstantBuffer,
    TextureBuffer,
    VaryingInput,
    VaryingOutput,
    SpecializationConstant,
    ShaderStorageBuffer,
}

impl BlockKind {
    pub const fn name(self) -> &'static str {
        match self {
            BlockKind::ConstantBuffer => "constant buffer",
            BlockKind::TextureBuffer => "texture buffer",
            BlockKind::VaryingInput => "varying input",
            BlockKind::VaryingOutput => "varying output",
            BlockKind::SpecializationConstant => "specialization constant",
            BlockKind::ShaderStorageBuffer => "shader storage buffer",
        }
    }
}

impl From<ParameterBlockKind> for BlockKind {
    fn from(kind: ParameterBlockKind) -> Self {
        match kind {
            ParameterBlockKind::ConstantBuffer => BlockKind::ConstantBuffer,
            ParameterBlockKind::TextureBuffer => BlockKind::TextureBuffer,
            ParameterBlockKind::ShaderStorageBuffer => BlockKind::ShaderStorageBuffer,
            ParameterBlockKind::VaryingInput => BlockKind::VaryingInput,
            ParameterBlockKind::VaryingOutput => BlockKind::VaryingOutput,
        }
    }
}

/// Target-specific selection of packing rules for each block kind.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutRulesFamily {
    Hlsl,
    Glsl,
}

impl LayoutRulesFamily {
    pub const fn name(self) -> &'static str {
        match self {
            LayoutRulesFamily::Hlsl => "HLSL",
            LayoutRulesFamily::Glsl => "GLSL",
        }
    }

    /// The rules used for the contents of a block, or `None` when the
    /// target has no such construct.
    pub const fn rules_for(self, block: BlockKind) -> Option<LayoutRule> {
        match (self, block) {
            (LayoutRulesFamily::Hlsl, BlockKind::ConstantBuffer) => {
                Some(LayoutRule::HlslConstantBuffer)
            }
            (LayoutRulesFamily::Hlsl, BlockKind::VaryingInput) => {
                Some(LayoutRule::HlslVaryingInput)
            }
            (LayoutRulesFamily::Hlsl, BlockKind::VaryingOutput) => {
                Some(LayoutRule::HlslVaryingOutput)
            }
            (
                LayoutRulesFamily::Hlsl,
                BlockKind::TextureBuffer
                | BlockKind::SpecializationConstant
                | BlockKind::ShaderStorageBuffer,
            ) => None,

            (LayoutRulesFamily::Glsl, BlockKind::ConstantBuffer) => Some(LayoutRule::Std140),
            (LayoutRulesFamily::Glsl, BlockKind::ShaderStorageBuffer) => Some(LayoutRule::Std430),
            (LayoutRulesFamily::Glsl, BlockKind::VaryingInput) => {
                Some(LayoutRule::GlslVaryingInput)
            }
            (LayoutRulesFamily::Glsl, BlockKind::VaryingOutput) => {
                Some(LayoutRule::GlslVaryingOutput)
            }
            (LayoutRulesFamily::Glsl, BlockKind::SpecializationConstant) => {
                Some(LayoutRule::GlslSpecializationConstant)
            }
            (LayoutRulesFamily::Glsl, BlockKind::TextureBuffer) => None,
        }
    }

    /// Constant-buffer rules exist for every family.
    pub const fn constant_buffer_rules(self) -> LayoutRule {
        match self {
            LayoutRulesFamily::Hlsl => LayoutRule::HlslConstantBuffer,
            LayoutRulesFamily::Glsl => LayoutRule::Std140,
        }
    }

    /// The family whose conventions a target's output follows.
    pub const fn for_target(target: CodeGenTarget) -> Option<Self> {
        match target {
            CodeGenTarget::Hlsl | CodeGenTarget::DxBytecode | CodeGenTarget::DxBytecodeAssembly => {
                Some(LayoutRulesFamily::Hlsl)
            }
            CodeGenTarget::Glsl | CodeGenTarget::Spirv | CodeGenTarget::SpirvAssembly => {
                Some(LayoutRulesFamily::Glsl)
            }
            CodeGenTarget::Unknown | CodeGenTarget::ReflectionJson => None,
        }
    }
}

impl fmt::Display for LayoutRulesFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Output format requested from the compiler.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum CodeGenTarget {
    #[default]
    Unknown,
    Hlsl,
    DxBytecode,
    DxBytecodeAssembly,
    Glsl,
    Spirv,
    SpirvAssembly,
    ReflectionJson,
}

impl CodeGenTarget {
    pub const ALL: [CodeGenTarget; 8] = [
        CodeGenTarget::Unknown,
        CodeGenTarget::Hlsl,
        CodeGenTarget::DxBytecode,
        CodeGenTarget::DxBytecodeAssembly,
        CodeGenTarget::Glsl,
        CodeGenTarget::Spirv,
        CodeGenTarget::SpirvAssembly,
        CodeGenTarget::ReflectionJson,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            CodeGenTarget::Unknown => "unknown",
            CodeGenTarget::Hlsl => "hlsl",
            CodeGenTarget::DxBytecode => "dxbc",
            CodeGenTarget::DxBytecodeAssembly => "dxbc-asm",
            CodeGenTarget::Glsl => "glsl",
            CodeGenTarget::Spirv => "spirv",
            CodeGenTarget::SpirvAssembly => "spirv-asm",
            CodeGenTarget::ReflectionJson => "reflection-json",
        }
    }
}

impl fmt::Display for CodeGenTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A target name that is not recognised.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseTargetError {
    pub name: String,
}

impl fmt::Display for ParseTargetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown code generation target `{}`", self.name)
    }
}

impl std::error::Error for ParseTargetError {}

impl FromStr for CodeGenTarget {
    type Err = ParseTargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        CodeGenTarget::ALL
            .into_iter()
            .find(|target| target.name() == wanted)
            .ok_or_else(|| ParseTargetError { name: s.to_owned() })
    }
}
