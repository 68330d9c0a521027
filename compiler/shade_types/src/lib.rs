//! Type model for Shade.
//!
//! Semantic checking produces types into a [`Pool`]; everything downstream
//! (layout, parameter binding, reflection) reads them through [`Idx`]
//! handles. The pool is append-only while checking runs and is only read
//! afterwards, so any number of layout computations can share one `&Pool`.
//!
//! # Shape
//!
//! - Scalars are pre-interned at fixed indices ([`Idx::FLOAT`], ...)
//! - Structural types (vectors, arrays, resources, blocks) are de-duplicated
//! - Struct declarations are nominal: each declaration gets its own node
//! - [`TypeKind::Error`] marks a type that failed checking

mod idx;
mod kind;
mod pool;

pub use idx::Idx;
pub use kind::{
    Access, FieldDecl, InternalMarker, ParameterBlockKind, ResourceShape, ScalarType, StructDecl,
    StructId, StructuredBufferKind, TextureDim, TypeKind,
};
pub use pool::Pool;

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Idx, StructId};
    shade_ir::static_assert_size!(Idx, 4);
    shade_ir::static_assert_size!(StructId, 4);
}
