use pretty_assertions::assert_eq;
use shade_ir::StringInterner;
use shade_types::{Access, Pool, TextureDim};

use super::*;
use crate::{LayoutRule, ResourceKind};

fn params(names: &StringInterner, fields: &[(&str, Idx)]) -> Vec<FieldDecl> {
    fields
        .iter()
        .map(|&(name, ty)| FieldDecl {
            name: names.intern(name),
            ty,
        })
        .collect()
}

#[test]
fn globals_bind_through_implicit_constant_buffer() {
    let names = StringInterner::new();
    let mut pool = Pool::new();
    let float4 = pool.vector(Idx::FLOAT, 4);
    let float4x4 = pool.matrix(Idx::FLOAT, 4, 4);
    let texture = pool.texture(TextureDim::D2, float4, Access::Read);
    let sampler = pool.sampler_state();
    let globals = params(
        &names,
        &[
            ("view", float4x4),
            ("env", texture),
            ("time", Idx::FLOAT),
            ("linear", sampler),
        ],
    );
    let engine = LayoutEngine::new(&pool);

    let scope = layout_global_scope(&engine, &globals, LayoutRulesFamily::Hlsl).unwrap();
    assert_eq!(scope.ty(), Idx::NONE);
    assert_eq!(scope.usage(ResourceKind::ConstantBuffer), 1);
    assert_eq!(scope.usage(ResourceKind::ShaderResource), 1);
    assert_eq!(scope.usage(ResourceKind::SamplerState), 1);
    assert!(!scope.resource_infos().contains(ResourceKind::Uniform));

    let contents = scope.element().unwrap();
    assert_eq!(contents.rules(), LayoutRule::HlslConstantBuffer);
    assert_eq!(contents.uniform_size(), 80);
    let time = contents.field(names.intern("time")).unwrap();
    assert_eq!(time.uniform_offset(), Some(64));
    let env = contents.field(names.intern("env")).unwrap();
    assert_eq!(env.offset(ResourceKind::ShaderResource), Some(0));
}

#[test]
fn glsl_globals_use_descriptor_slots() {
    let names = StringInterner::new();
    let mut pool = Pool::new();
    let float4 = pool.vector(Idx::FLOAT, 4);
    let texture = pool.texture(TextureDim::D2, float4, Access::Read);
    let globals = params(&names, &[("tint", float4), ("albedo", texture)]);
    let engine = LayoutEngine::new(&pool);

    let scope = layout_global_scope(&engine, &globals, LayoutRulesFamily::Glsl).unwrap();
    assert_eq!(scope.usage(ResourceKind::DescriptorTableSlot), 2);
    assert_eq!(scope.element().map(TypeLayout::rules), Some(LayoutRule::Std140));
}

#[test]
fn empty_scope_still_takes_a_binding() {
    let pool = Pool::new();
    let engine = LayoutEngine::new(&pool);

    let scope = layout_global_scope(&engine, &[], LayoutRulesFamily::Hlsl).unwrap();
    assert_eq!(scope.usage(ResourceKind::ConstantBuffer), 1);
    assert_eq!(scope.element().map(|e| e.fields().len()), Some(0));
}

#[test]
fn unsupported_parameter_fails_the_scope() {
    let names = StringInterner::new();
    let mut pool = Pool::new();
    let float4 = pool.vector(Idx::FLOAT, 4);
    let sampled = pool.texture_sampler(TextureDim::D2, float4, Access::Read);
    let globals = params(&names, &[("tex", sampled)]);
    let engine = LayoutEngine::new(&pool);

    assert_eq!(
        layout_global_scope(&engine, &globals, LayoutRulesFamily::Hlsl).unwrap_err(),
        LayoutError::UnsupportedObject {
            family: LayoutRulesFamily::Hlsl,
            kind: ParameterKind::TextureSampler,
        }
    );
    assert!(layout_global_scope(&engine, &globals, LayoutRulesFamily::Glsl).is_ok());
}
