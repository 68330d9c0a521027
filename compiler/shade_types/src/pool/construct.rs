//! Type construction helpers for the Pool.

use shade_ir::Name;

use crate::{
    Access, FieldDecl, Idx, InternalMarker, ParameterBlockKind, Pool, ResourceShape, ScalarType,
    StructDecl, StructuredBufferKind, TextureDim, TypeKind,
};

impl Pool {
    // === Arithmetic types ===

    /// The pre-interned scalar type.
    #[inline]
    pub fn scalar(&self, scalar: ScalarType) -> Idx {
        scalar.idx()
    }

    /// Create a vector type such as `float3`.
    pub fn vector(&mut self, elem: Idx, count: u32) -> Idx {
        self.intern(TypeKind::Vector { elem, count })
    }

    /// Create a `rows` x `cols` matrix type such as `float4x4`.
    pub fn matrix(&mut self, elem: Idx, rows: u32, cols: u32) -> Idx {
        self.intern(TypeKind::Matrix { elem, rows, cols })
    }

    // === Aggregates ===

    /// Create a fixed-length array type `elem[len]`.
    pub fn array(&mut self, elem: Idx, len: u32) -> Idx {
        self.intern(TypeKind::Array {
            elem,
            len: Some(len),
        })
    }

    /// Create an unsized array type `elem[]`.
    pub fn unsized_array(&mut self, elem: Idx) -> Idx {
        self.intern(TypeKind::Array { elem, len: None })
    }

    /// Declare a struct. Every call creates a distinct type, even for
    /// identical field lists.
    pub fn declare_struct(&mut self, name: Name, fields: &[(Name, Idx)]) -> Idx {
        let fields = fields
            .iter()
            .map(|&(name, ty)| FieldDecl { name, ty })
            .collect();
        self.push_struct(StructDecl { name, fields })
    }

    /// Create a named alias for `target`.
    pub fn alias(&mut self, name: Name, target: Idx) -> Idx {
        self.intern(TypeKind::Alias { name, target })
    }

    // === Opaque resources ===

    fn resource(&mut self, shape: ResourceShape, access: Access) -> Idx {
        self.intern(TypeKind::Resource { shape, access })
    }

    /// `Texture2D<elem>` (read) or `RWTexture2D<elem>` (read-write).
    pub fn texture(&mut self, dim: TextureDim, elem: Idx, access: Access) -> Idx {
        self.resource(ResourceShape::Texture { dim, elem }, access)
    }

    /// GLSL combined texture-sampler such as `sampler2D`.
    pub fn texture_sampler(&mut self, dim: TextureDim, elem: Idx, access: Access) -> Idx {
        self.resource(ResourceShape::TextureSampler { dim, elem }, access)
    }

    /// GLSL storage image such as `image2D`.
    pub fn image(&mut self, dim: TextureDim, elem: Idx, access: Access) -> Idx {
        self.resource(ResourceShape::Image { dim, elem }, access)
    }

    /// `SamplerState`.
    pub fn sampler_state(&mut self) -> Idx {
        self.resource(ResourceShape::SamplerState, Access::Read)
    }

    /// `Buffer<elem>` / `RWBuffer<elem>`.
    pub fn sampled_buffer(&mut self, elem: Idx, access: Access) -> Idx {
        self.resource(ResourceShape::SampledBuffer { elem }, access)
    }

    /// `ByteAddressBuffer` / `RWByteAddressBuffer`.
    pub fn raw_buffer(&mut self, access: Access) -> Idx {
        self.resource(ResourceShape::RawBuffer, access)
    }

    /// GLSL `subpassInput`.
    pub fn input_attachment(&mut self) -> Idx {
        self.resource(ResourceShape::InputAttachment, Access::Read)
    }

    /// A user-declared buffer resource without an element type.
    pub fn untyped_buffer(&mut self, access: Access) -> Idx {
        self.resource(ResourceShape::UntypedBuffer, access)
    }

    // === Buffers with contents ===

    /// `StructuredBuffer<elem>` and its read-write, append and consume forms.
    pub fn structured_buffer(&mut self, kind: StructuredBufferKind, elem: Idx) -> Idx {
        self.intern(TypeKind::StructuredBuffer { kind, elem })
    }

    /// A parameter block such as `ConstantBuffer<elem>`.
    pub fn parameter_block(&mut self, kind: ParameterBlockKind, elem: Idx) -> Idx {
        self.intern(TypeKind::ParameterBlock { kind, elem })
    }

    /// `ConstantBuffer<elem>`.
    pub fn constant_buffer(&mut self, elem: Idx) -> Idx {
        self.parameter_block(ParameterBlockKind::ConstantBuffer, elem)
    }

    // === Checker internals ===

    /// A compiler-internal marker type.
    pub fn internal(&mut self, marker: InternalMarker) -> Idx {
        self.intern(TypeKind::Internal(marker))
    }
}
