//! Compact layout descriptors.

use crate::ResourceKind;

/// Round `offset` up to the next multiple of `alignment`, or `None` if the
/// result does not fit in 64 bits.
///
/// An alignment of 0 (the error type) is treated as 1.
#[inline]
pub fn round_to_alignment(offset: u64, alignment: u64) -> Option<u64> {
    let alignment = alignment.max(1);
    match offset % alignment {
        0 => Some(offset),
        rem => offset.checked_add(alignment - rem),
    }
}

/// Smallest power of two that is `>= value` (1 for 0), or `None` past
/// `2^63`.
#[inline]
pub fn round_up_to_power_of_two(value: u64) -> Option<u64> {
    value.checked_next_power_of_two()
}

/// Size and alignment of a type in a single resource kind.
///
/// `size` is in the kind's native unit: bytes for `Uniform`, slots
/// otherwise. It need not be a multiple of `alignment` (a `float3` under
/// `std140` is 12 bytes aligned to 16). `stride` is set by array layout.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct SimpleLayoutInfo {
    pub kind: ResourceKind,
    pub size: u64,
    pub alignment: u64,
    pub stride: Option<u64>,
}

impl SimpleLayoutInfo {
    /// Layout of `void`: no footprint.
    pub const VOID: Self = Self::new(ResourceKind::None, 0, 1);

    /// Layout of a type that failed checking: no footprint, no alignment.
    pub const ERROR: Self = Self::new(ResourceKind::None, 0, 0);

    #[inline]
    pub const fn new(kind: ResourceKind, size: u64, alignment: u64) -> Self {
        Self {
            kind,
            size,
            alignment,
            stride: None,
        }
    }

    /// `size` bytes of uniform data.
    #[inline]
    pub const fn uniform(size: u64, alignment: u64) -> Self {
        Self::new(ResourceKind::Uniform, size, alignment)
    }

    /// `count` slots of `kind`.
    #[inline]
    pub const fn slots(kind: ResourceKind, count: u64) -> Self {
        Self::new(kind, count, 1)
    }

    /// The uniform part of this layout: the full size for uniform data,
    /// zero bytes for anything else.
    #[inline]
    pub const fn uniform_layout(self) -> UniformLayoutInfo {
        let size = if self.kind.is_uniform() { self.size } else { 0 };
        UniformLayoutInfo {
            size,
            alignment: self.alignment,
        }
    }
}

/// Uniform size and alignment; also the struct accumulator threaded through
/// `begin_struct` / `add_field` / `end_struct`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct UniformLayoutInfo {
    pub size: u64,
    pub alignment: u64,
}

impl UniformLayoutInfo {
    #[inline]
    pub const fn new(size: u64, alignment: u64) -> Self {
        Self { size, alignment }
    }
}

impl From<UniformLayoutInfo> for SimpleLayoutInfo {
    fn from(info: UniformLayoutInfo) -> Self {
        SimpleLayoutInfo::uniform(info.size, info.alignment)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn rounds_to_alignment() {
        assert_eq!(round_to_alignment(0, 16), Some(0));
        assert_eq!(round_to_alignment(4, 16), Some(16));
        assert_eq!(round_to_alignment(16, 16), Some(16));
        assert_eq!(round_to_alignment(17, 4), Some(20));
        assert_eq!(round_to_alignment(7, 0), Some(7));
        assert_eq!(round_to_alignment(u64::MAX, 16), None);
    }

    #[test]
    fn rounds_to_power_of_two() {
        assert_eq!(round_up_to_power_of_two(0), Some(1));
        assert_eq!(round_up_to_power_of_two(8), Some(8));
        assert_eq!(round_up_to_power_of_two(12), Some(16));
        assert_eq!(round_up_to_power_of_two(24), Some(32));
        assert_eq!(round_up_to_power_of_two(u64::MAX), None);
    }

    #[test]
    fn uniform_projection_drops_slot_sizes() {
        let texture = SimpleLayoutInfo::slots(ResourceKind::ShaderResource, 1);
        assert_eq!(texture.uniform_layout(), UniformLayoutInfo::new(0, 1));

        let float3 = SimpleLayoutInfo::uniform(12, 16);
        assert_eq!(float3.uniform_layout(), UniformLayoutInfo::new(12, 16));
    }

    #[test]
    fn error_layout_is_empty() {
        assert_eq!(SimpleLayoutInfo::ERROR.size, 0);
        assert_eq!(SimpleLayoutInfo::ERROR.alignment, 0);
        assert_eq!(SimpleLayoutInfo::ERROR.kind, ResourceKind::None);
    }
}
