//! Interned identifiers.

use std::fmt;

const SHARD_BITS: u32 = 4;
const LOCAL_BITS: u32 = u32::BITS - SHARD_BITS;

/// A string interned in a [`StringInterner`](crate::StringInterner).
///
/// The top four bits select the interner shard, the remaining 28 index the
/// string inside it. Equality is identity: two names compare equal exactly
/// when they were interned from the same text by the same interner.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// The empty string. Every interner maps `""` here.
    pub const EMPTY: Name = Name(0);

    /// Number of interner shards a name can address.
    pub const SHARDS: usize = 1 << SHARD_BITS;

    /// Largest index within one shard.
    pub const MAX_LOCAL: u32 = (1 << LOCAL_BITS) - 1;

    #[inline]
    pub(crate) const fn from_parts(shard: usize, local: u32) -> Self {
        debug_assert!(shard < Self::SHARDS);
        debug_assert!(local <= Self::MAX_LOCAL);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "shard is below Name::SHARDS (16)"
        )]
        let shard = shard as u32;
        Name((shard << LOCAL_BITS) | local)
    }

    #[inline]
    pub(crate) const fn shard(self) -> usize {
        (self.0 >> LOCAL_BITS) as usize
    }

    #[inline]
    pub(crate) const fn local(self) -> usize {
        (self.0 & Self::MAX_LOCAL) as usize
    }

    /// The packed 32-bit value, stable for the lifetime of the interner.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({}:{})", self.shard(), self.local())
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}
