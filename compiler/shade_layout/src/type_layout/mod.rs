//! The full layout tree handed to parameter binding and reflection.
//!
//! A [`TypeLayout`] records, for one type under one set of rules, how many
//! units of every resource kind the type consumes. Struct layouts carry a
//! [`VarLayout`] per field with the field's starting index in each kind it
//! uses; arrays, parameter blocks and structured buffers carry the layout of
//! their element.

use shade_ir::Name;
use shade_types::Idx;
use smallvec::SmallVec;

use crate::{LayoutError, LayoutRule, ResourceKind, SimpleLayoutInfo, UniformLayoutInfo};

/// How much of one resource kind a type consumes.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceUsageEntry {
    pub kind: ResourceKind,
    pub count: u64,
}

/// Per-kind usage table. At most one entry per kind, never a zero count,
/// never [`ResourceKind::None`].
///
/// Most types touch one or two kinds, so the table lives inline.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceUsage {
    entries: SmallVec<[ResourceUsageEntry; 4]>,
}

impl ResourceUsage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` units of `kind`, returning the count before the add.
    ///
    /// The returned value is the index the new units start at, which is
    /// how struct layout assigns field offsets. `None` means the total
    /// would not fit in 64 bits; the table is then left unchanged.
    pub fn add(&mut self, kind: ResourceKind, count: u64) -> Option<u64> {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.kind == kind) {
            let previous = entry.count;
            entry.count = previous.checked_add(count)?;
            return Some(previous);
        }
        if kind != ResourceKind::None && count != 0 {
            self.entries.push(ResourceUsageEntry { kind, count });
        }
        Some(0)
    }

    /// Units of `kind` used (0 when absent).
    pub fn count(&self, kind: ResourceKind) -> u64 {
        self.get(kind).map_or(0, |entry| entry.count)
    }

    pub fn get(&self, kind: ResourceKind) -> Option<&ResourceUsageEntry> {
        self.entries.iter().find(|e| e.kind == kind)
    }

    pub fn contains(&self, kind: ResourceKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceUsageEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Starting index of a field in each kind it uses.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceOffsets {
    entries: SmallVec<[(ResourceKind, u64); 2]>,
}

impl ResourceOffsets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the offset for `kind`, replacing any earlier one.
    pub fn insert(&mut self, kind: ResourceKind, index: u64) {
        match self.entries.iter_mut().find(|(k, _)| *k == kind) {
            Some(entry) => entry.1 = index,
            None => self.entries.push((kind, index)),
        }
    }

    pub fn get(&self, kind: ResourceKind) -> Option<u64> {
        self.entries
            .iter()
            .find_map(|&(k, index)| (k == kind).then_some(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, u64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Variant-specific part of a [`TypeLayout`].
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutShape {
    /// Scalars, vectors, matrices, resources and error types.
    Leaf,
    Array {
        element: Box<TypeLayout>,
        /// Bytes between uniform elements; 0 if the element has no
        /// uniform data.
        uniform_stride: u64,
        /// `None` for unsized arrays.
        len: Option<u32>,
    },
    Struct { fields: Vec<VarLayout> },
    /// The element is laid out with the block's own rules.
    ParameterBlock { element: Box<TypeLayout> },
    /// The element is laid out with structured-buffer rules.
    StructuredBuffer { element: Box<TypeLayout> },
}

/// Layout of one type under one set of rules.
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeLayout {
    pub(crate) ty: Idx,
    pub(crate) rules: LayoutRule,
    pub(crate) uniform_alignment: u64,
    pub(crate) usage: ResourceUsage,
    pub(crate) shape: LayoutShape,
}

impl TypeLayout {
    /// A node with no children, taking its footprint from `info`.
    pub(crate) fn from_info(ty: Idx, rules: LayoutRule, info: SimpleLayoutInfo) -> Self {
        let mut usage = ResourceUsage::new();
        usage.add(info.kind, info.size);
        TypeLayout {
            ty,
            rules,
            uniform_alignment: info.alignment,
            usage,
            shape: LayoutShape::Leaf,
        }
    }

    /// Wrap `element` behind one object binding described by `object`.
    ///
    /// Every non-uniform kind the element uses is added to the block's own
    /// usage; uniform bytes stay behind the binding.
    pub(crate) fn parameter_block(
        ty: Idx,
        rules: LayoutRule,
        object: SimpleLayoutInfo,
        element: TypeLayout,
    ) -> Result<Self, LayoutError> {
        let mut block = TypeLayout::from_info(ty, rules, object);
        for entry in element.usage.iter() {
            if entry.kind.is_uniform() {
                continue;
            }
            rules.checked(block.usage.add(entry.kind, entry.count))?;
        }
        block.shape = LayoutShape::ParameterBlock {
            element: Box::new(element),
        };
        Ok(block)
    }

    /// The type laid out; [`Idx::NONE`] for synthesised containers such as
    /// the global scope.
    #[inline]
    pub fn ty(&self) -> Idx {
        self.ty
    }

    /// The rules this node was laid out with. Elements of parameter blocks
    /// and structured buffers carry their own rules.
    #[inline]
    pub fn rules(&self) -> LayoutRule {
        self.rules
    }

    #[inline]
    pub fn uniform_alignment(&self) -> u64 {
        self.uniform_alignment
    }

    #[inline]
    pub fn shape(&self) -> &LayoutShape {
        &self.shape
    }

    /// Units of `kind` consumed.
    #[inline]
    pub fn usage(&self, kind: ResourceKind) -> u64 {
        self.usage.count(kind)
    }

    /// Bytes of uniform data.
    #[inline]
    pub fn uniform_size(&self) -> u64 {
        self.usage(ResourceKind::Uniform)
    }

    /// Every kind this type consumes, with its count.
    pub fn resource_infos(&self) -> &ResourceUsage {
        &self.usage
    }

    pub fn uniform_layout(&self) -> UniformLayoutInfo {
        UniformLayoutInfo::new(self.uniform_size(), self.uniform_alignment)
    }

    /// Struct fields, empty for anything that is not a struct.
    pub fn fields(&self) -> &[VarLayout] {
        match &self.shape {
            LayoutShape::Struct { fields } => fields,
            _ => &[],
        }
    }

    pub fn field(&self, name: Name) -> Option<&VarLayout> {
        self.fields().iter().find(|field| field.name == name)
    }

    /// Element layout of an array, parameter block or structured buffer.
    pub fn element(&self) -> Option<&TypeLayout> {
        match &self.shape {
            LayoutShape::Array { element, .. }
            | LayoutShape::ParameterBlock { element }
            | LayoutShape::StructuredBuffer { element } => Some(element),
            LayoutShape::Leaf | LayoutShape::Struct { .. } => None,
        }
    }

    pub fn uniform_stride(&self) -> Option<u64> {
        match self.shape {
            LayoutShape::Array { uniform_stride, .. } => Some(uniform_stride),
            _ => None,
        }
    }
}

/// A named field inside a struct layout.
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct VarLayout {
    pub(crate) name: Name,
    pub(crate) type_layout: TypeLayout,
    pub(crate) offsets: ResourceOffsets,
}

impl VarLayout {
    #[inline]
    pub fn name(&self) -> Name {
        self.name
    }

    #[inline]
    pub fn type_layout(&self) -> &TypeLayout {
        &self.type_layout
    }

    pub fn offsets(&self) -> &ResourceOffsets {
        &self.offsets
    }

    /// Starting index of this field in `kind`.
    #[inline]
    pub fn offset(&self, kind: ResourceKind) -> Option<u64> {
        self.offsets.get(kind)
    }

    /// Byte offset of this field's uniform data.
    #[inline]
    pub fn uniform_offset(&self) -> Option<u64> {
        self.offset(ResourceKind::Uniform)
    }
}

#[cfg(test)]
mod tests;
