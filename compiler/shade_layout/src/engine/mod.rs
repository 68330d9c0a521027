//! Recursive layout computation over the type pool.
//!
//! [`LayoutEngine`] walks a type once per request, dispatching on its
//! [`TypeKind`] and asking a [`LayoutRule`] for every packing decision.
//! Simple layouts are memoised per `(type, rules)` pair; full trees are
//! rebuilt on every request since each caller owns its tree.

use std::cell::RefCell;

use rustc_hash::FxHashMap;

use shade_types::{FieldDecl, Idx, ParameterBlockKind, Pool, TypeKind};

use crate::{
    BlockKind, LayoutError, LayoutRule, LayoutShape, ParameterKind, ResourceKind, ResourceOffsets,
    ResourceUsage, SimpleLayoutInfo, TypeLayout, VarLayout,
};

/// Result of one layout step: the simple info, plus the tree when one was
/// requested.
pub(crate) struct Computed {
    pub(crate) info: SimpleLayoutInfo,
    pub(crate) tree: Option<TypeLayout>,
}

impl Computed {
    fn leaf(ty: Idx, rules: LayoutRule, info: SimpleLayoutInfo, want_tree: bool) -> Self {
        Computed {
            info,
            tree: want_tree.then(|| TypeLayout::from_info(ty, rules, info)),
        }
    }
}

/// Layout engine over a checked type pool.
///
/// # Interior Mutability
///
/// The simple-layout cache sits behind a `RefCell` so layout can be asked
/// for through `&self` while recursing. An engine is therefore not `Sync`;
/// concurrent layout uses one engine per thread over a shared `&Pool`.
pub struct LayoutEngine<'pool> {
    pool: &'pool Pool,
    cache: RefCell<FxHashMap<(Idx, LayoutRule), SimpleLayoutInfo>>,
}

impl<'pool> LayoutEngine<'pool> {
    pub fn new(pool: &'pool Pool) -> Self {
        Self {
            pool,
            cache: RefCell::new(FxHashMap::default()),
        }
    }

    /// Access the underlying pool.
    pub fn pool(&self) -> &'pool Pool {
        self.pool
    }

    /// Size, alignment and kind of `ty` under `rules`.
    pub fn simple_layout(
        &self,
        ty: Idx,
        rules: LayoutRule,
    ) -> Result<SimpleLayoutInfo, LayoutError> {
        // Copy out before recursing: the borrow must not outlive the lookup.
        let cached = self.cache.borrow().get(&(ty, rules)).copied();
        if let Some(info) = cached {
            return Ok(info);
        }
        Ok(self.compute(ty, rules, false)?.info)
    }

    /// Full layout tree of `ty` under `rules`.
    pub fn type_layout(&self, ty: Idx, rules: LayoutRule) -> Result<TypeLayout, LayoutError> {
        let Computed { info, tree } = self.compute(ty, rules, true)?;
        Ok(tree.unwrap_or_else(|| TypeLayout::from_info(ty, rules, info)))
    }

    /// Simple info of `ty`, and its tree when `want_tree` is set.
    pub fn compute_layout(
        &self,
        ty: Idx,
        rules: LayoutRule,
        want_tree: bool,
    ) -> Result<(SimpleLayoutInfo, Option<TypeLayout>), LayoutError> {
        let Computed { info, tree } = self.compute(ty, rules, want_tree)?;
        Ok((info, tree))
    }

    /// Number of memoised simple layouts.
    pub fn cached_len(&self) -> usize {
        self.cache.borrow().len()
    }

    fn compute(
        &self,
        ty: Idx,
        rules: LayoutRule,
        want_tree: bool,
    ) -> Result<Computed, LayoutError> {
        let computed = self.compute_by_kind(ty, rules, want_tree)?;
        self.cache.borrow_mut().insert((ty, rules), computed.info);
        Ok(computed)
    }

    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(ty = ?ty, rules = rules.name(), want_tree = want_tree)
    )]
    fn compute_by_kind(
        &self,
        ty: Idx,
        rules: LayoutRule,
        want_tree: bool,
    ) -> Result<Computed, LayoutError> {
        let Some(&kind) = self.pool.get(ty) else {
            tracing::error!(?ty, "layout requested for a type outside the pool");
            panic!("layout requested for {ty:?}, which is not in the type pool");
        };

        match kind {
            TypeKind::Scalar(scalar) => Ok(Computed::leaf(
                ty,
                rules,
                rules.scalar_layout(scalar),
                want_tree,
            )),

            TypeKind::Vector { elem, count } => {
                let elem = self.simple_layout(elem, rules)?;
                Ok(Computed::leaf(
                    ty,
                    rules,
                    rules.vector_layout(elem, count)?,
                    want_tree,
                ))
            }

            TypeKind::Matrix { elem, rows, cols } => {
                let elem = self.simple_layout(elem, rules)?;
                Ok(Computed::leaf(
                    ty,
                    rules,
                    rules.matrix_layout(elem, rows, cols)?,
                    want_tree,
                ))
            }

            TypeKind::Array { elem, len } => self.layout_array(ty, elem, len, rules, want_tree),

            TypeKind::Struct(id) => {
                let fields = &self.pool.struct_decl(id).fields;
                self.layout_fields(ty, fields, rules, want_tree)
            }

            TypeKind::Alias { target, .. } => {
                // Same layout as the target, but the tree reports the alias.
                let mut computed = self.compute(target, rules, want_tree)?;
                if let Some(tree) = &mut computed.tree {
                    tree.ty = ty;
                }
                Ok(computed)
            }

            TypeKind::Resource { shape, access } => {
                let info = rules.object_layout(ParameterKind::for_resource(shape, access))?;
                Ok(Computed::leaf(ty, rules, info, want_tree))
            }

            TypeKind::StructuredBuffer { kind, elem } => {
                let info = rules.object_layout(ParameterKind::for_structured_buffer(kind))?;
                let tree = if want_tree {
                    // Buffer contents never inherit the enclosing packing.
                    let element = self.type_layout(elem, LayoutRule::HlslStructuredBuffer)?;
                    let mut node = TypeLayout::from_info(ty, rules, info);
                    node.shape = LayoutShape::StructuredBuffer {
                        element: Box::new(element),
                    };
                    Some(node)
                } else {
                    None
                };
                Ok(Computed { info, tree })
            }

            TypeKind::ParameterBlock { kind, elem } => {
                self.layout_parameter_block(ty, kind, elem, rules, want_tree)
            }

            TypeKind::Error => Ok(Computed::leaf(
                ty,
                rules,
                SimpleLayoutInfo::ERROR,
                want_tree,
            )),

            TypeKind::Internal(marker) => {
                tracing::error!(
                    marker = marker.name(),
                    "compiler-internal type reached layout"
                );
                panic!("cannot lay out compiler-internal type `{}`", marker.name());
            }
        }
    }

    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(ty = ?ty, len = ?len, rules = rules.name())
    )]
    fn layout_array(
        &self,
        ty: Idx,
        elem: Idx,
        len: Option<u32>,
        rules: LayoutRule,
        want_tree: bool,
    ) -> Result<Computed, LayoutError> {
        // Unsized and generic-length arrays take no space of their own.
        let count = u64::from(len.unwrap_or(0));
        let element = self.compute(elem, rules, want_tree)?;
        let info = rules.array_layout(element.info, count)?;

        let Some(element_tree) = element.tree else {
            return Ok(Computed { info, tree: None });
        };

        let mut usage = ResourceUsage::new();
        let uniform_stride = if element.info.kind.is_uniform() {
            rules.checked(usage.add(ResourceKind::Uniform, info.size))?;
            info.stride.unwrap_or(0)
        } else {
            0
        };
        for entry in element_tree.usage.iter() {
            if entry.kind.is_uniform() {
                continue;
            }
            let scaled = rules.checked(entry.count.checked_mul(count))?;
            rules.checked(usage.add(entry.kind, scaled))?;
        }

        let tree = TypeLayout {
            ty,
            rules,
            uniform_alignment: info.alignment,
            usage,
            shape: LayoutShape::Array {
                element: Box::new(element_tree),
                uniform_stride,
                len,
            },
        };
        Ok(Computed {
            info,
            tree: Some(tree),
        })
    }

    /// Lay out `fields` as the members of one struct.
    ///
    /// Uniform bytes go through the rule's struct accumulator. Every other
    /// kind keeps its own running counter: a field's offset in that kind is
    /// the total of all earlier fields.
    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(ty = ?ty, field_count = fields.len(), rules = rules.name())
    )]
    pub(crate) fn layout_fields(
        &self,
        ty: Idx,
        fields: &[FieldDecl],
        rules: LayoutRule,
        want_tree: bool,
    ) -> Result<Computed, LayoutError> {
        let mut acc = rules.begin_struct();
        let mut resources = ResourceUsage::new();
        let mut vars = Vec::with_capacity(if want_tree { fields.len() } else { 0 });

        for field in fields {
            let computed = self.compute(field.ty, rules, want_tree)?;
            let (next, uniform_offset) = rules.add_field(acc, computed.info.uniform_layout())?;
            acc = next;

            let Some(field_tree) = computed.tree else {
                continue;
            };
            let mut offsets = ResourceOffsets::new();
            offsets.insert(ResourceKind::Uniform, uniform_offset);
            for entry in field_tree.usage.iter() {
                if entry.kind.is_uniform() {
                    continue;
                }
                let index = rules.checked(resources.add(entry.kind, entry.count))?;
                offsets.insert(entry.kind, index);
            }
            vars.push(VarLayout {
                name: field.name,
                type_layout: field_tree,
                offsets,
            });
        }

        let acc = rules.end_struct(acc)?;
        let info = SimpleLayoutInfo::from(acc);
        if !want_tree {
            return Ok(Computed { info, tree: None });
        }

        let mut usage = ResourceUsage::new();
        rules.checked(usage.add(ResourceKind::Uniform, acc.size))?;
        for entry in resources.iter() {
            rules.checked(usage.add(entry.kind, entry.count))?;
        }
        let tree = TypeLayout {
            ty,
            rules,
            uniform_alignment: acc.alignment,
            usage,
            shape: LayoutShape::Struct { fields: vars },
        };
        Ok(Computed {
            info,
            tree: Some(tree),
        })
    }

    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(ty = ?ty, block = ?kind, rules = rules.name())
    )]
    fn layout_parameter_block(
        &self,
        ty: Idx,
        kind: ParameterBlockKind,
        elem: Idx,
        rules: LayoutRule,
        want_tree: bool,
    ) -> Result<Computed, LayoutError> {
        let block = BlockKind::from(kind);
        let family = rules.family();
        let Some(element_rules) = family.rules_for(block) else {
            tracing::debug!(%family, block = block.name(), "no layout rules for block kind");
            return Err(LayoutError::UnsupportedBlock { family, block });
        };

        let info = match kind {
            ParameterBlockKind::ConstantBuffer => {
                rules.object_layout(ParameterKind::ConstantBuffer)?
            }
            ParameterBlockKind::TextureBuffer => {
                rules.object_layout(ParameterKind::TextureUniformBuffer)?
            }
            ParameterBlockKind::ShaderStorageBuffer => {
                rules.object_layout(ParameterKind::ShaderStorageBuffer)?
            }
            // Varying blocks bind nothing themselves; their slots come
            // from the contents.
            ParameterBlockKind::VaryingInput => {
                SimpleLayoutInfo::slots(ResourceKind::VertexInput, 0)
            }
            ParameterBlockKind::VaryingOutput => {
                SimpleLayoutInfo::slots(ResourceKind::FragmentOutput, 0)
            }
        };

        if !want_tree {
            return Ok(Computed { info, tree: None });
        }

        let element = self.type_layout(elem, element_rules)?;
        Ok(Computed {
            info,
            tree: Some(TypeLayout::parameter_block(ty, rules, info, element)?),
        })
    }
}
