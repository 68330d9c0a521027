//! Type index handle.
//!
//! All types live in a [`Pool`](crate::Pool) and are referenced by a 32-bit
//! index. Layouts hold these handles instead of owning the types they were
//! computed from.

use std::fmt;

use crate::ScalarType;

/// A 32-bit index into the type pool.
///
/// Scalar types have fixed indices so callers can name them without a pool.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    // === Pre-interned types (indices 0-9) ===

    /// `void`.
    pub const VOID: Self = Self(0);
    /// `bool`.
    pub const BOOL: Self = Self(1);
    /// 32-bit signed integer.
    pub const INT: Self = Self(2);
    /// 32-bit unsigned integer.
    pub const UINT: Self = Self(3);
    /// 64-bit signed integer.
    pub const INT64: Self = Self(4);
    /// 64-bit unsigned integer.
    pub const UINT64: Self = Self(5);
    /// 16-bit float.
    pub const HALF: Self = Self(6);
    /// 32-bit float.
    pub const FLOAT: Self = Self(7);
    /// 64-bit float.
    pub const DOUBLE: Self = Self(8);
    /// Placeholder for a type that failed checking.
    pub const ERROR: Self = Self(9);

    /// Number of pre-interned types.
    pub const PRIMITIVE_COUNT: u32 = 10;

    /// Sentinel value indicating no type.
    pub const NONE: Self = Self(u32::MAX);

    /// Create an index from a raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if this is one of the pre-interned types.
    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::PRIMITIVE_COUNT
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Check if this is the ERROR type.
    #[inline]
    pub const fn is_error(self) -> bool {
        self.0 == Self::ERROR.0
    }

    /// HLSL spelling of a pre-interned type, `None` for everything else.
    #[inline]
    pub const fn name(self) -> Option<&'static str> {
        if self.0 == Self::ERROR.0 {
            Some("<error>")
        } else if self.0 < Self::ERROR.0 {
            // Scalars are pre-interned in `ScalarType::ALL` order.
            Some(ScalarType::ALL[self.0 as usize].name())
        } else {
            None
        }
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.name(), *self) {
            (_, Self::NONE) => write!(f, "Idx::NONE"),
            (Some(name), _) => write!(f, "Idx({name})"),
            (None, _) => write!(f, "Idx({})", self.0),
        }
    }
}

impl fmt::Display for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.name(), *self) {
            (_, Self::NONE) => write!(f, "<none>"),
            (Some(name), _) => f.write_str(name),
            (None, _) => write!(f, "type#{}", self.0),
        }
    }
}
