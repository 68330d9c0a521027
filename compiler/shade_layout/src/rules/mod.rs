//! Layout rule strategies.
//!
//! Each [`LayoutRule`] is a stateless strategy value. Its behaviour is the
//! common C-like default (4-byte scalars, no struct padding) adjusted by the
//! deltas of its packing convention:
//!
//! | Rule | Vectors | Struct/array floor | Fields |
//! |---|---|---|---|
//! | `HlslConstantBuffer` | `count * elem` | 16 | may not straddle a 16-byte register |
//! | `Std140` | power-of-two alignment | 16 | |
//! | `Std430` | power-of-two alignment | none | |
//! | `HlslStructuredBuffer` | `count * elem` | none | |
//! | varyings | 1 slot | n/a | n/a |
//! | `GlslSpecializationConstant` | 1 slot per element | n/a | n/a |
//!
//! Object layout (one binding slot per opaque object) is chosen by the
//! rule's [`LayoutRulesFamily`].

mod family;

pub use family::{BlockKind, CodeGenTarget, LayoutRulesFamily, ParseTargetError};

use shade_types::{Access, ResourceShape, ScalarType, StructuredBufferKind};

use crate::info::{round_to_alignment, round_up_to_power_of_two};
use crate::{LayoutError, ResourceKind, SimpleLayoutInfo, UniformLayoutInfo};

/// Size of an HLSL constant-buffer register.
const HLSL_REGISTER_SIZE: u64 = 16;

/// Minimum alignment of arrays and structs in constant buffers.
const CONSTANT_BUFFER_AGGREGATE_ALIGNMENT: u64 = 16;

/// Opaque object classes, as seen by object layout.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ParameterKind {
    ConstantBuffer,
    TextureUniformBuffer,
    ShaderStorageBuffer,
    StructuredBuffer,
    MutableStructuredBuffer,
    SampledBuffer,
    MutableSampledBuffer,
    RawBuffer,
    MutableRawBuffer,
    Texture,
    MutableTexture,
    Image,
    MutableImage,
    TextureSampler,
    MutableTextureSampler,
    SamplerState,
    InputRenderTarget,
}

impl ParameterKind {
    pub const fn name(self) -> &'static str {
        match self {
            ParameterKind::ConstantBuffer => "constant buffer",
            ParameterKind::TextureUniformBuffer => "texture buffer",
            ParameterKind::ShaderStorageBuffer => "shader storage buffer",
            ParameterKind::StructuredBuffer => "structured buffer",
            ParameterKind::MutableStructuredBuffer => "read-write structured buffer",
            ParameterKind::SampledBuffer => "typed buffer",
            ParameterKind::MutableSampledBuffer => "read-write typed buffer",
            ParameterKind::RawBuffer => "byte-address buffer",
            ParameterKind::MutableRawBuffer => "read-write byte-address buffer",
            ParameterKind::Texture => "texture",
            ParameterKind::MutableTexture => "read-write texture",
            ParameterKind::Image => "image",
            ParameterKind::MutableImage => "read-write image",
            ParameterKind::TextureSampler => "texture-sampler",
            ParameterKind::MutableTextureSampler => "read-write texture-sampler",
            ParameterKind::SamplerState => "sampler state",
            ParameterKind::InputRenderTarget => "input attachment",
        }
    }

    /// Classify an opaque resource by its shape and access mode.
    pub const fn for_resource(shape: ResourceShape, access: Access) -> Self {
        let writable = access.is_writable();
        match shape {
            ResourceShape::Texture { .. } if writable => ParameterKind::MutableTexture,
            ResourceShape::Texture { .. } => ParameterKind::Texture,
            ResourceShape::TextureSampler { .. } if writable => {
                ParameterKind::MutableTextureSampler
            }
            ResourceShape::TextureSampler { .. } => ParameterKind::TextureSampler,
            ResourceShape::Image { .. } if writable => ParameterKind::MutableImage,
            ResourceShape::Image { .. } => ParameterKind::Image,
            ResourceShape::SamplerState => ParameterKind::SamplerState,
            ResourceShape::SampledBuffer { .. } if writable => ParameterKind::MutableSampledBuffer,
            ResourceShape::SampledBuffer { .. } => ParameterKind::SampledBuffer,
            ResourceShape::RawBuffer | ResourceShape::UntypedBuffer if writable => {
                ParameterKind::MutableRawBuffer
            }
            ResourceShape::RawBuffer | ResourceShape::UntypedBuffer => ParameterKind::RawBuffer,
            ResourceShape::InputAttachment => ParameterKind::InputRenderTarget,
        }
    }

    pub const fn for_structured_buffer(kind: StructuredBufferKind) -> Self {
        if kind.is_writable() {
            ParameterKind::MutableStructuredBuffer
        } else {
            ParameterKind::StructuredBuffer
        }
    }
}

/// A concrete set of packing rules.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutRule {
    Std140,
    Std430,
    HlslConstantBuffer,
    HlslStructuredBuffer,
    GlslVaryingInput,
    GlslVaryingOutput,
    HlslVaryingInput,
    HlslVaryingOutput,
    GlslSpecializationConstant,
}

/// How a rule packs data, independent of its family.
#[derive(Copy, Clone)]
enum Packing {
    /// Default C-like rules.
    Plain,
    /// `std430`: plain plus power-of-two vectors.
    Std430,
    /// `std140`: constant-buffer aggregates plus power-of-two vectors.
    Std140,
    /// HLSL `cbuffer`: constant-buffer aggregates plus register straddling.
    HlslConstantBuffer,
    /// One slot of the given kind per scalar or vector.
    Varying(ResourceKind),
    /// One slot per scalar element.
    SpecializationConstant,
}

impl LayoutRule {
    pub const fn name(self) -> &'static str {
        match self {
            LayoutRule::Std140 => "std140",
            LayoutRule::Std430 => "std430",
            LayoutRule::HlslConstantBuffer => "HLSL constant buffer",
            LayoutRule::HlslStructuredBuffer => "HLSL structured buffer",
            LayoutRule::GlslVaryingInput => "GLSL varying input",
            LayoutRule::GlslVaryingOutput => "GLSL varying output",
            LayoutRule::HlslVaryingInput => "HLSL varying input",
            LayoutRule::HlslVaryingOutput => "HLSL varying output",
            LayoutRule::GlslSpecializationConstant => "GLSL specialization constant",
        }
    }

    pub const fn family(self) -> LayoutRulesFamily {
        match self {
            LayoutRule::Std140
            | LayoutRule::Std430
            | LayoutRule::GlslVaryingInput
            | LayoutRule::GlslVaryingOutput
            | LayoutRule::GlslSpecializationConstant => LayoutRulesFamily::Glsl,
            LayoutRule::HlslConstantBuffer
            | LayoutRule::HlslStructuredBuffer
            | LayoutRule::HlslVaryingInput
            | LayoutRule::HlslVaryingOutput => LayoutRulesFamily::Hlsl,
        }
    }

    const fn packing(self) -> Packing {
        match self {
            LayoutRule::HlslStructuredBuffer => Packing::Plain,
            LayoutRule::Std430 => Packing::Std430,
            LayoutRule::Std140 => Packing::Std140,
            LayoutRule::HlslConstantBuffer => Packing::HlslConstantBuffer,
            LayoutRule::GlslVaryingInput | LayoutRule::HlslVaryingInput => {
                Packing::Varying(ResourceKind::VertexInput)
            }
            LayoutRule::GlslVaryingOutput | LayoutRule::HlslVaryingOutput => {
                Packing::Varying(ResourceKind::FragmentOutput)
            }
            LayoutRule::GlslSpecializationConstant => Packing::SpecializationConstant,
        }
    }

    /// Whether arrays and structs are padded to 16 bytes.
    const fn pads_aggregates(self) -> bool {
        matches!(
            self.packing(),
            Packing::Std140 | Packing::HlslConstantBuffer
        )
    }

    // === Simple layout rules ===

    /// Layout of a single scalar value.
    pub const fn scalar_layout(self, scalar: ScalarType) -> SimpleLayoutInfo {
        if matches!(scalar, ScalarType::Void) {
            return SimpleLayoutInfo::VOID;
        }

        match self.packing() {
            Packing::Varying(kind) => SimpleLayoutInfo::slots(kind, 1),
            Packing::SpecializationConstant => {
                SimpleLayoutInfo::slots(ResourceKind::SpecializationConstant, 1)
            }
            Packing::Plain | Packing::Std430 | Packing::Std140 | Packing::HlslConstantBuffer => {
                match scalar {
                    ScalarType::Void => SimpleLayoutInfo::VOID,
                    // `bool` is widened to a 32-bit value on every target.
                    ScalarType::Bool
                    | ScalarType::Int32
                    | ScalarType::UInt32
                    | ScalarType::Float32 => SimpleLayoutInfo::uniform(4, 4),
                    ScalarType::Int64 | ScalarType::UInt64 | ScalarType::Float64 => {
                        SimpleLayoutInfo::uniform(8, 8)
                    }
                    ScalarType::Float16 => SimpleLayoutInfo::uniform(2, 2),
                }
            }
        }
    }

    /// Layout of a `count`-element vector of `elem`.
    pub fn vector_layout(
        self,
        elem: SimpleLayoutInfo,
        count: u32,
    ) -> Result<SimpleLayoutInfo, LayoutError> {
        let count = u64::from(count);
        let info = match self.packing() {
            Packing::Varying(kind) => SimpleLayoutInfo::slots(kind, 1),
            Packing::SpecializationConstant => {
                SimpleLayoutInfo::slots(ResourceKind::SpecializationConstant, count)
            }
            Packing::Std140 | Packing::Std430 if elem.kind.is_uniform() => {
                // Aligned to the next power of two up from the size, so a
                // scalar can still pack right after a `float3`.
                let size = self.checked(elem.size.checked_mul(count))?;
                let alignment = self.checked(round_up_to_power_of_two(size))?;
                SimpleLayoutInfo::uniform(size, alignment)
            }
            Packing::Plain | Packing::Std430 | Packing::Std140 | Packing::HlslConstantBuffer => {
                let size = self.checked(elem.size.checked_mul(count))?;
                SimpleLayoutInfo::new(elem.kind, size, elem.alignment)
            }
        };
        Ok(info)
    }

    /// Layout of a `rows` x `cols` matrix: an array of `rows` row vectors.
    pub fn matrix_layout(
        self,
        elem: SimpleLayoutInfo,
        rows: u32,
        cols: u32,
    ) -> Result<SimpleLayoutInfo, LayoutError> {
        self.array_layout(self.vector_layout(elem, cols)?, u64::from(rows))
    }

    /// Layout of `count` elements; the result carries the element stride.
    pub fn array_layout(
        self,
        mut elem: SimpleLayoutInfo,
        count: u64,
    ) -> Result<SimpleLayoutInfo, LayoutError> {
        if self.pads_aggregates() && elem.kind.is_uniform() {
            elem.alignment = elem.alignment.max(CONSTANT_BUFFER_AGGREGATE_ALIGNMENT);
            elem.size = self.checked(round_to_alignment(elem.size, elem.alignment))?;
        }

        let stride = elem.size;
        Ok(SimpleLayoutInfo {
            kind: elem.kind,
            size: self.checked(stride.checked_mul(count))?,
            alignment: elem.alignment,
            stride: Some(stride),
        })
    }

    // === Struct layout ===

    /// Start laying out a struct: empty, with the rule's alignment floor.
    pub const fn begin_struct(self) -> UniformLayoutInfo {
        if self.pads_aggregates() {
            UniformLayoutInfo::new(0, CONSTANT_BUFFER_AGGREGATE_ALIGNMENT)
        } else {
            UniformLayoutInfo::new(0, 1)
        }
    }

    /// Append a field, returning the updated struct and the field's offset.
    ///
    /// Zero-size fields take the current size as their offset and leave the
    /// struct untouched.
    pub fn add_field(
        self,
        mut acc: UniformLayoutInfo,
        field: UniformLayoutInfo,
    ) -> Result<(UniformLayoutInfo, u64), LayoutError> {
        if field.size == 0 {
            return Ok((acc, acc.size));
        }

        acc.alignment = acc.alignment.max(field.alignment);
        let mut offset = self.checked(round_to_alignment(acc.size, field.alignment))?;
        let mut end = self.checked(offset.checked_add(field.size))?;

        if matches!(self.packing(), Packing::HlslConstantBuffer) {
            // A field may not straddle a register. Its last byte decides, so
            // a field ending exactly on a boundary stays where it is.
            if offset / HLSL_REGISTER_SIZE != (end - 1) / HLSL_REGISTER_SIZE {
                offset = self.checked(round_to_alignment(offset, HLSL_REGISTER_SIZE))?;
                end = self.checked(offset.checked_add(field.size))?;
            }
        }

        acc.size = end;
        Ok((acc, offset))
    }

    /// Finish a struct: round its size up to its alignment.
    pub fn end_struct(self, acc: UniformLayoutInfo) -> Result<UniformLayoutInfo, LayoutError> {
        let size = self.checked(round_to_alignment(acc.size, acc.alignment))?;
        Ok(UniformLayoutInfo::new(size, acc.alignment))
    }

    /// Turn a failed size computation into an overflow error.
    pub(crate) fn checked(self, value: Option<u64>) -> Result<u64, LayoutError> {
        value.ok_or_else(|| {
            tracing::debug!(rule = self.name(), "layout size overflows 64 bits");
            LayoutError::SizeOverflow { rule: self }
        })
    }

    // === Object layout ===

    /// Binding footprint of an opaque object.
    pub fn object_layout(self, kind: ParameterKind) -> Result<SimpleLayoutInfo, LayoutError> {
        let family = self.family();
        let resource = match family {
            // Every Vulkan object is a descriptor-table slot.
            LayoutRulesFamily::Glsl => Some(ResourceKind::DescriptorTableSlot),
            LayoutRulesFamily::Hlsl => hlsl_register_class(kind),
        };

        match resource {
            Some(resource) => Ok(SimpleLayoutInfo::slots(resource, 1)),
            None => {
                tracing::debug!(%family, kind = kind.name(), "object kind has no binding class");
                Err(LayoutError::UnsupportedObject { family, kind })
            }
        }
    }
}

/// HLSL register class (`b`, `t`, `u`, `s`) for an object.
const fn hlsl_register_class(kind: ParameterKind) -> Option<ResourceKind> {
    match kind {
        ParameterKind::ConstantBuffer => Some(ResourceKind::ConstantBuffer),
        ParameterKind::TextureUniformBuffer
        | ParameterKind::StructuredBuffer
        | ParameterKind::SampledBuffer
        | ParameterKind::RawBuffer
        | ParameterKind::Texture => Some(ResourceKind::ShaderResource),
        ParameterKind::MutableStructuredBuffer
        | ParameterKind::MutableSampledBuffer
        | ParameterKind::MutableRawBuffer
        | ParameterKind::MutableTexture => Some(ResourceKind::UnorderedAccess),
        ParameterKind::SamplerState => Some(ResourceKind::SamplerState),
        ParameterKind::ShaderStorageBuffer
        | ParameterKind::Image
        | ParameterKind::MutableImage
        | ParameterKind::TextureSampler
        | ParameterKind::MutableTextureSampler
        | ParameterKind::InputRenderTarget => None,
    }
}
