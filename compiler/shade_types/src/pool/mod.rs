//! Type pool: arena storage for type nodes.
//!
//! # Design
//!
//! - Nodes are stored once and addressed by [`Idx`]
//! - Scalars and the error type are pre-interned at fixed indices
//! - Structural types are de-duplicated, so equal shapes share one `Idx`
//! - Struct declarations are nominal and never merged

mod construct;
mod format;

use rustc_hash::FxHashMap;

use crate::{FieldDecl, Idx, ScalarType, StructDecl, StructId, TypeKind};

/// Arena of type nodes.
///
/// Built by semantic checking, then only read. Holds no interior
/// mutability, so a `&Pool` can be shared freely across threads.
pub struct Pool {
    items: Vec<TypeKind>,
    /// Structural de-duplication map.
    dedup: FxHashMap<TypeKind, Idx>,
    structs: Vec<StructDecl>,
}

impl Pool {
    /// Create a pool holding the pre-interned types.
    pub fn new() -> Self {
        let mut pool = Self {
            items: Vec::with_capacity(64),
            dedup: FxHashMap::default(),
            structs: Vec::new(),
        };

        for scalar in ScalarType::ALL {
            let idx = pool.intern(TypeKind::Scalar(scalar));
            debug_assert_eq!(idx, scalar.idx());
        }
        let error = pool.intern(TypeKind::Error);
        debug_assert_eq!(error, Idx::ERROR);

        pool
    }

    /// Intern a node, returning the existing index for an equal node.
    pub(crate) fn intern(&mut self, kind: TypeKind) -> Idx {
        if let Some(&idx) = self.dedup.get(&kind) {
            return idx;
        }

        let idx = Idx::from_raw(self.next_raw());
        self.items.push(kind);
        self.dedup.insert(kind, idx);
        idx
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "a pool with 4 billion types is not a realistic program"
    )]
    fn next_raw(&self) -> u32 {
        self.items.len() as u32
    }

    /// Register a struct declaration and return its type.
    pub(crate) fn push_struct(&mut self, decl: StructDecl) -> Idx {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "struct count is bounded by the type count"
        )]
        let id = StructId::new(self.structs.len() as u32);
        tracing::trace!(?id, fields = decl.fields.len(), "declared struct");
        self.structs.push(decl);
        self.intern(TypeKind::Struct(id))
    }

    /// Get the node for a type.
    ///
    /// # Panics
    /// Panics if `idx` did not come from this pool.
    #[inline]
    pub fn kind(&self, idx: Idx) -> &TypeKind {
        &self.items[idx.raw() as usize]
    }

    /// Get the node for a type, or `None` for foreign indices and `Idx::NONE`.
    #[inline]
    pub fn get(&self, idx: Idx) -> Option<&TypeKind> {
        self.items.get(idx.raw() as usize)
    }

    /// Follow aliases until a non-alias type is reached.
    pub fn resolve(&self, mut idx: Idx) -> Idx {
        while let TypeKind::Alias { target, .. } = *self.kind(idx) {
            idx = target;
        }
        idx
    }

    /// Get a struct declaration by id.
    #[inline]
    pub fn struct_decl(&self, id: StructId) -> &StructDecl {
        &self.structs[id.index()]
    }

    /// Fields of a struct type, looking through aliases.
    ///
    /// Returns an empty slice for non-struct types.
    pub fn struct_fields(&self, idx: Idx) -> &[FieldDecl] {
        match *self.kind(self.resolve(idx)) {
            TypeKind::Struct(id) => &self.struct_decl(id).fields,
            _ => &[],
        }
    }

    /// Number of type nodes, including the pre-interned ones.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// A pool always holds its pre-interned types.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
