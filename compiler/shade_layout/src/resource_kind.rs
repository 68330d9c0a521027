//! Resource kinds: the independent spaces a piece of data can occupy.
//!
//! Usage in one kind never affects offsets in another. `Uniform` is the
//! only kind measured in bytes and subject to alignment; every other kind
//! counts opaque slots that only add.

use std::fmt;

/// A resource space.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    /// No storage footprint.
    None,
    /// Bytes of ordinary uniform data.
    Uniform,
    /// HLSL `t` register.
    ShaderResource,
    /// HLSL `u` register.
    UnorderedAccess,
    /// HLSL `s` register.
    SamplerState,
    /// Vulkan descriptor-set binding.
    DescriptorTableSlot,
    /// Vertex-shader input location.
    VertexInput,
    /// Fragment-shader output location.
    FragmentOutput,
    /// Vulkan specialization-constant id.
    SpecializationConstant,
    /// HLSL `b` register.
    ConstantBuffer,
}

impl ResourceKind {
    /// Every kind, in declaration order.
    pub const ALL: [ResourceKind; 10] = [
        ResourceKind::None,
        ResourceKind::Uniform,
        ResourceKind::ShaderResource,
        ResourceKind::UnorderedAccess,
        ResourceKind::SamplerState,
        ResourceKind::DescriptorTableSlot,
        ResourceKind::VertexInput,
        ResourceKind::FragmentOutput,
        ResourceKind::SpecializationConstant,
        ResourceKind::ConstantBuffer,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ResourceKind::None => "none",
            ResourceKind::Uniform => "uniform",
            ResourceKind::ShaderResource => "shader resource",
            ResourceKind::UnorderedAccess => "unordered access",
            ResourceKind::SamplerState => "sampler state",
            ResourceKind::DescriptorTableSlot => "descriptor table slot",
            ResourceKind::VertexInput => "vertex input",
            ResourceKind::FragmentOutput => "fragment output",
            ResourceKind::SpecializationConstant => "specialization constant",
            ResourceKind::ConstantBuffer => "constant buffer",
        }
    }

    /// True for kinds that are counted in binding slots rather than bytes.
    #[inline]
    pub const fn is_resource_kind(self) -> bool {
        !matches!(self, ResourceKind::None | ResourceKind::Uniform)
    }

    #[inline]
    pub const fn is_uniform(self) -> bool {
        matches!(self, ResourceKind::Uniform)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
