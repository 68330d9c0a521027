use pretty_assertions::assert_eq;

use super::*;

#[test]
fn add_returns_previous_count() {
    let mut usage = ResourceUsage::new();
    assert_eq!(usage.add(ResourceKind::ShaderResource, 2), Some(0));
    assert_eq!(usage.add(ResourceKind::ShaderResource, 3), Some(2));
    assert_eq!(usage.count(ResourceKind::ShaderResource), 5);
    assert_eq!(usage.len(), 1);
}

#[test]
fn add_skips_empty_entries() {
    let mut usage = ResourceUsage::new();
    usage.add(ResourceKind::None, 4);
    usage.add(ResourceKind::Uniform, 0);
    assert!(usage.is_empty());
    assert!(!usage.contains(ResourceKind::Uniform));
    assert_eq!(usage.count(ResourceKind::Uniform), 0);
}

#[test]
fn kinds_are_independent() {
    let mut usage = ResourceUsage::new();
    usage.add(ResourceKind::Uniform, 16);
    usage.add(ResourceKind::SamplerState, 1);
    usage.add(ResourceKind::Uniform, 4);

    let kinds: Vec<_> = usage.iter().map(|e| (e.kind, e.count)).collect();
    assert_eq!(
        kinds,
        vec![(ResourceKind::Uniform, 20), (ResourceKind::SamplerState, 1)]
    );
}

#[test]
fn offsets_replace_per_kind() {
    let mut offsets = ResourceOffsets::new();
    offsets.insert(ResourceKind::Uniform, 4);
    offsets.insert(ResourceKind::ShaderResource, 1);
    offsets.insert(ResourceKind::Uniform, 8);

    assert_eq!(offsets.len(), 2);
    assert_eq!(offsets.get(ResourceKind::Uniform), Some(8));
    assert_eq!(offsets.get(ResourceKind::SamplerState), None);
}

#[test]
fn leaf_accessors() {
    let leaf = TypeLayout::from_info(
        Idx::FLOAT,
        LayoutRule::Std430,
        SimpleLayoutInfo::uniform(4, 4),
    );

    assert_eq!(leaf.uniform_size(), 4);
    assert_eq!(leaf.uniform_layout(), UniformLayoutInfo::new(4, 4));
    assert!(leaf.fields().is_empty());
    assert!(leaf.element().is_none());
    assert_eq!(leaf.uniform_stride(), None);
}

#[test]
fn resource_infos_lists_every_kind() {
    let mut node = TypeLayout::from_info(
        Idx::NONE,
        LayoutRule::HlslConstantBuffer,
        SimpleLayoutInfo::slots(ResourceKind::ConstantBuffer, 1),
    );
    node.usage.add(ResourceKind::ShaderResource, 2);

    let kinds: Vec<_> = node.resource_infos().iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![ResourceKind::ConstantBuffer, ResourceKind::ShaderResource]
    );
    assert_eq!(node.ty(), Idx::NONE);
    assert_eq!(node.rules(), LayoutRule::HlslConstantBuffer);
    assert_eq!(node.shape(), &LayoutShape::Leaf);
}

#[test]
fn parameter_block_keeps_uniform_bytes_inside() {
    let mut element = TypeLayout::from_info(
        Idx::NONE,
        LayoutRule::HlslConstantBuffer,
        SimpleLayoutInfo::uniform(32, 16),
    );
    element.usage.add(ResourceKind::ShaderResource, 3);

    let block = TypeLayout::parameter_block(
        Idx::NONE,
        LayoutRule::HlslConstantBuffer,
        SimpleLayoutInfo::slots(ResourceKind::ConstantBuffer, 1),
        element,
    )
    .unwrap();
    assert_eq!(block.usage(ResourceKind::ConstantBuffer), 1);
    assert_eq!(block.usage(ResourceKind::ShaderResource), 3);
    assert!(!block.resource_infos().contains(ResourceKind::Uniform));
    assert_eq!(block.element().map(TypeLayout::uniform_size), Some(32));
}

#[test]
fn error_leaf_has_no_usage() {
    let leaf = TypeLayout::from_info(Idx::ERROR, LayoutRule::Std140, SimpleLayoutInfo::ERROR);
    assert!(leaf.resource_infos().is_empty());
    assert_eq!(leaf.uniform_alignment(), 0);
}

#[test]
fn add_refuses_to_overflow() {
    let mut usage = ResourceUsage::new();
    usage.add(ResourceKind::ShaderResource, u64::MAX - 1);
    assert_eq!(usage.add(ResourceKind::ShaderResource, 2), None);
    assert_eq!(usage.count(ResourceKind::ShaderResource), u64::MAX - 1);
    assert_eq!(usage.add(ResourceKind::ShaderResource, 1), Some(u64::MAX - 1));
}
