//! Global-scope layout.
//!
//! Top-level shader parameters are laid out as the fields of one
//! pseudo-struct, packed with the family's constant-buffer rules and bound
//! through an implicit constant buffer. Parameter binding hands out
//! concrete registers from the resulting usage table.

use shade_types::{FieldDecl, Idx};

use crate::engine::Computed;
use crate::{LayoutEngine, LayoutError, LayoutRulesFamily, ParameterKind, TypeLayout};

/// Lay out the global scope of a program.
///
/// The returned node is a parameter block with no source type
/// ([`Idx::NONE`]): its element holds one field per parameter, and its own
/// usage is the implicit buffer's binding plus every non-uniform kind the
/// parameters use. The buffer takes its binding even when no parameter has
/// uniform data.
pub fn layout_global_scope(
    engine: &LayoutEngine<'_>,
    params: &[FieldDecl],
    family: LayoutRulesFamily,
) -> Result<TypeLayout, LayoutError> {
    let rules = family.constant_buffer_rules();
    let object = rules.object_layout(ParameterKind::ConstantBuffer)?;

    let Computed { info, tree } = engine.layout_fields(Idx::NONE, params, rules, true)?;
    let contents = tree.unwrap_or_else(|| TypeLayout::from_info(Idx::NONE, rules, info));

    tracing::debug!(
        %family,
        params = params.len(),
        uniform_size = contents.uniform_size(),
        "laid out global scope"
    );

    TypeLayout::parameter_block(Idx::NONE, rules, object, contents)
}

#[cfg(test)]
mod tests;
