use pretty_assertions::assert_eq;

use shade_ir::StringInterner;

use super::*;
use crate::{Access, InternalMarker, ParameterBlockKind, StructuredBufferKind, TextureDim};

#[test]
fn scalars_at_fixed_indices() {
    let pool = Pool::new();

    for scalar in ScalarType::ALL {
        assert_eq!(pool.kind(scalar.idx()), &TypeKind::Scalar(scalar));
        assert_eq!(pool.scalar(scalar), scalar.idx());
    }
    assert_eq!(pool.kind(Idx::ERROR), &TypeKind::Error);
    assert_eq!(pool.len(), Idx::PRIMITIVE_COUNT as usize);
    assert!(!pool.is_empty());
}

#[test]
fn structural_types_are_deduplicated() {
    let mut pool = Pool::new();

    let a = pool.vector(Idx::FLOAT, 3);
    let b = pool.vector(Idx::FLOAT, 3);
    let c = pool.vector(Idx::FLOAT, 4);
    assert_eq!(a, b);
    assert_ne!(a, c);

    let arr = pool.array(a, 4);
    assert_eq!(pool.array(b, 4), arr);
    assert_ne!(pool.unsized_array(a), arr);
}

#[test]
fn structs_are_nominal() {
    let names = StringInterner::new();
    let mut pool = Pool::new();
    let s = names.intern("S");
    let x = names.intern("x");

    let first = pool.declare_struct(s, &[(x, Idx::FLOAT)]);
    let second = pool.declare_struct(s, &[(x, Idx::FLOAT)]);
    assert_ne!(first, second);

    let fields = pool.struct_fields(first);
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].name, x);
    assert_eq!(fields[0].ty, Idx::FLOAT);
}

#[test]
fn aliases_resolve_to_target() {
    let names = StringInterner::new();
    let mut pool = Pool::new();

    let float4 = pool.vector(Idx::FLOAT, 4);
    let color = pool.alias(names.intern("Color"), float4);
    let rgba = pool.alias(names.intern("Rgba"), color);

    assert_eq!(pool.resolve(rgba), float4);
    assert_eq!(pool.resolve(float4), float4);
    assert!(pool.struct_fields(rgba).is_empty());
}

#[test]
fn struct_fields_look_through_alias() {
    let names = StringInterner::new();
    let mut pool = Pool::new();
    let s = pool.declare_struct(names.intern("Light"), &[(names.intern("pos"), Idx::FLOAT)]);
    let alias = pool.alias(names.intern("LightAlias"), s);
    assert_eq!(pool.struct_fields(alias).len(), 1);
}

#[test]
fn get_rejects_foreign_indices() {
    let pool = Pool::new();
    assert!(pool.get(Idx::NONE).is_none());
    assert!(pool.get(Idx::from_raw(10_000)).is_none());
    assert!(pool.get(Idx::FLOAT).is_some());
}

#[test]
fn formats_hlsl_spelling() {
    let names = StringInterner::new();
    let mut pool = Pool::new();

    let float3 = pool.vector(Idx::FLOAT, 3);
    let float4x4 = pool.matrix(Idx::FLOAT, 4, 4);
    let float4 = pool.vector(Idx::FLOAT, 4);
    let tex = pool.texture(TextureDim::D2, float4, Access::Read);
    let rw_tex = pool.texture(TextureDim::D2, float4, Access::ReadWrite);
    let lights = pool.declare_struct(names.intern("Light"), &[(names.intern("pos"), float3)]);
    let lights_arr = pool.array(lights, 8);
    let sb = pool.structured_buffer(StructuredBufferKind::RwStructured, lights);
    let cb = pool.parameter_block(ParameterBlockKind::ConstantBuffer, lights);
    let unsized_arr = pool.unsized_array(Idx::UINT);
    let raw = pool.raw_buffer(Access::ReadWrite);
    let marker = pool.internal(InternalMarker::OverloadGroup);

    assert_eq!(pool.format_type(float3, &names), "float3");
    assert_eq!(pool.format_type(float4x4, &names), "float4x4");
    assert_eq!(pool.format_type(tex, &names), "Texture2D<float4>");
    assert_eq!(pool.format_type(rw_tex, &names), "RWTexture2D<float4>");
    assert_eq!(pool.format_type(lights_arr, &names), "Light[8]");
    assert_eq!(pool.format_type(sb, &names), "RWStructuredBuffer<Light>");
    assert_eq!(pool.format_type(cb, &names), "ConstantBuffer<Light>");
    assert_eq!(pool.format_type(unsized_arr, &names), "uint[]");
    assert_eq!(pool.format_type(raw, &names), "RWByteAddressBuffer");
    assert_eq!(pool.format_type(marker, &names), "<overload group>");
    assert_eq!(pool.format_type(Idx::ERROR, &names), "<error>");
    assert_eq!(pool.format_type(Idx::NONE, &names), "<none>");
}

#[test]
fn pool_is_shareable_across_threads() {
    fn assert_sync<T: Sync + Send>() {}
    assert_sync::<Pool>();
}

#[test]
fn formats_glsl_resources() {
    let names = StringInterner::new();
    let mut pool = Pool::new();
    let float4 = pool.vector(Idx::FLOAT, 4);
    let sampler = pool.texture_sampler(TextureDim::D2, float4, Access::Read);
    let image = pool.image(TextureDim::D3, float4, Access::ReadWrite);
    let typed = pool.sampled_buffer(float4, Access::ReadWrite);
    let half2x3 = pool.matrix(Idx::HALF, 2, 3);

    assert_eq!(pool.format_type(sampler, &names), "sampler2D");
    assert_eq!(pool.format_type(image, &names), "image3D");
    assert_eq!(pool.format_type(typed, &names), "RWBuffer<float4>");
    assert_eq!(pool.format_type(half2x3, &names), "half2x3");
}
