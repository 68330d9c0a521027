//! Type node variants.
//!
//! A closed set of shapes: everything the layout engine has to dispatch on
//! is a variant here, so a missing case is a compile error rather than a
//! runtime surprise.

use shade_ir::Name;

use crate::Idx;

/// Base scalar types.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ScalarType {
    Void,
    Bool,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float16,
    Float32,
    Float64,
}

impl ScalarType {
    /// Every scalar type, in pre-interned index order.
    pub const ALL: [ScalarType; 9] = [
        ScalarType::Void,
        ScalarType::Bool,
        ScalarType::Int32,
        ScalarType::UInt32,
        ScalarType::Int64,
        ScalarType::UInt64,
        ScalarType::Float16,
        ScalarType::Float32,
        ScalarType::Float64,
    ];

    /// The fixed pool index of this scalar.
    pub const fn idx(self) -> Idx {
        match self {
            ScalarType::Void => Idx::VOID,
            ScalarType::Bool => Idx::BOOL,
            ScalarType::Int32 => Idx::INT,
            ScalarType::UInt32 => Idx::UINT,
            ScalarType::Int64 => Idx::INT64,
            ScalarType::UInt64 => Idx::UINT64,
            ScalarType::Float16 => Idx::HALF,
            ScalarType::Float32 => Idx::FLOAT,
            ScalarType::Float64 => Idx::DOUBLE,
        }
    }

    /// HLSL spelling.
    pub const fn name(self) -> &'static str {
        match self {
            ScalarType::Void => "void",
            ScalarType::Bool => "bool",
            ScalarType::Int32 => "int",
            ScalarType::UInt32 => "uint",
            ScalarType::Int64 => "int64_t",
            ScalarType::UInt64 => "uint64_t",
            ScalarType::Float16 => "half",
            ScalarType::Float32 => "float",
            ScalarType::Float64 => "double",
        }
    }
}

/// Whether a resource may be written by the shader.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Access {
    #[default]
    Read,
    ReadWrite,
}

impl Access {
    #[inline]
    pub const fn is_writable(self) -> bool {
        matches!(self, Access::ReadWrite)
    }
}

/// Dimensionality of a texture-like resource.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum TextureDim {
    D1,
    D2,
    D3,
    Cube,
}

impl TextureDim {
    pub const fn suffix(self) -> &'static str {
        match self {
            TextureDim::D1 => "1D",
            TextureDim::D2 => "2D",
            TextureDim::D3 => "3D",
            TextureDim::Cube => "Cube",
        }
    }
}

/// Opaque resource handles.
///
/// None of these occupy uniform bytes; each takes one binding slot whose
/// class depends on the target and on [`Access`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ResourceShape {
    /// HLSL `Texture2D<T>` / `RWTexture2D<T>`.
    Texture { dim: TextureDim, elem: Idx },
    /// GLSL combined texture-sampler (`sampler2D`).
    TextureSampler { dim: TextureDim, elem: Idx },
    /// GLSL storage image (`image2D`).
    Image { dim: TextureDim, elem: Idx },
    /// `SamplerState` / `sampler`.
    SamplerState,
    /// Typed buffer: HLSL `Buffer<T>` / `RWBuffer<T>`.
    SampledBuffer { elem: Idx },
    /// `ByteAddressBuffer` / `RWByteAddressBuffer`.
    RawBuffer,
    /// GLSL `subpassInput`.
    InputAttachment,
    /// User-declared buffer resource with no element type.
    UntypedBuffer,
}

/// Flavours of HLSL structured buffer.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum StructuredBufferKind {
    Structured,
    RwStructured,
    Append,
    Consume,
}

impl StructuredBufferKind {
    /// Append and consume buffers are written through a counter, so they
    /// bind like read-write buffers.
    pub const fn is_writable(self) -> bool {
        !matches!(self, StructuredBufferKind::Structured)
    }

    pub const fn name(self) -> &'static str {
        match self {
            StructuredBufferKind::Structured => "StructuredBuffer",
            StructuredBufferKind::RwStructured => "RWStructuredBuffer",
            StructuredBufferKind::Append => "AppendStructuredBuffer",
            StructuredBufferKind::Consume => "ConsumeStructuredBuffer",
        }
    }
}

/// Language constructs that group fields behind a single binding.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ParameterBlockKind {
    /// `cbuffer` / `ConstantBuffer<T>` / GLSL `uniform` block.
    ConstantBuffer,
    /// `tbuffer` / `TextureBuffer<T>`.
    TextureBuffer,
    /// GLSL `buffer` block.
    ShaderStorageBuffer,
    /// GLSL `in` block.
    VaryingInput,
    /// GLSL `out` block.
    VaryingOutput,
}

impl ParameterBlockKind {
    pub const fn name(self) -> &'static str {
        match self {
            ParameterBlockKind::ConstantBuffer => "ConstantBuffer",
            ParameterBlockKind::TextureBuffer => "TextureBuffer",
            ParameterBlockKind::ShaderStorageBuffer => "ShaderStorageBuffer",
            ParameterBlockKind::VaryingInput => "in",
            ParameterBlockKind::VaryingOutput => "out",
        }
    }
}

/// Compiler-internal types that appear during checking but never name the
/// type of a shader parameter.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum InternalMarker {
    /// Unresolved reference to an overloaded function.
    OverloadGroup,
    /// Type of a `{ ... }` initializer before coercion.
    InitializerList,
    /// Type of a function value.
    Function,
    /// Reference to a generic declaration without arguments.
    GenericDeclRef,
    /// Type of an expression that names a type.
    TypeType,
}

impl InternalMarker {
    pub const fn name(self) -> &'static str {
        match self {
            InternalMarker::OverloadGroup => "overload group",
            InternalMarker::InitializerList => "initializer list",
            InternalMarker::Function => "function",
            InternalMarker::GenericDeclRef => "generic declaration",
            InternalMarker::TypeType => "type",
        }
    }
}

/// Handle to a struct declaration in the pool.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct StructId(u32);

impl StructId {
    #[inline]
    pub(crate) const fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One field of a struct declaration.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct FieldDecl {
    pub name: Name,
    pub ty: Idx,
}

/// A checked struct declaration.
///
/// Fields reference only types that existed before the struct was declared,
/// which keeps the type graph acyclic.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct StructDecl {
    pub name: Name,
    pub fields: Box<[FieldDecl]>,
}

/// A type node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeKind {
    Scalar(ScalarType),
    Vector {
        elem: Idx,
        count: u32,
    },
    /// `rows` x `cols`, stored row-major as an array of row vectors.
    Matrix {
        elem: Idx,
        rows: u32,
        cols: u32,
    },
    /// `len == None` is an unsized array (`T[]`), or one whose length is
    /// a generic parameter not yet known at layout time.
    Array {
        elem: Idx,
        len: Option<u32>,
    },
    Struct(StructId),
    /// `typedef` / named alias.
    Alias {
        name: Name,
        target: Idx,
    },
    Resource {
        shape: ResourceShape,
        access: Access,
    },
    StructuredBuffer {
        kind: StructuredBufferKind,
        elem: Idx,
    },
    ParameterBlock {
        kind: ParameterBlockKind,
        elem: Idx,
    },
    Internal(InternalMarker),
    Error,
}

impl TypeKind {
    /// Short human-readable name of the variant.
    pub const fn variant_name(&self) -> &'static str {
        match self {
            TypeKind::Scalar(_) => "scalar",
            TypeKind::Vector { .. } => "vector",
            TypeKind::Matrix { .. } => "matrix",
            TypeKind::Array { .. } => "array",
            TypeKind::Struct(_) => "struct",
            TypeKind::Alias { .. } => "alias",
            TypeKind::Resource { .. } => "resource",
            TypeKind::StructuredBuffer { .. } => "structured buffer",
            TypeKind::ParameterBlock { .. } => "parameter block",
            TypeKind::Internal(_) => "internal",
            TypeKind::Error => "error",
        }
    }
}
