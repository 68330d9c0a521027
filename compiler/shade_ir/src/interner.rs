//! Thread-safe string interning.
//!
//! Strings are spread by hash over [`Name::SHARDS`] independently locked
//! shards, so threads interning different identifiers rarely contend.
//! Interned text is leaked and lives as long as the process.

use std::fmt;
use std::hash::{Hash, Hasher};

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHasher};

use crate::Name;

/// Identifiers that appear in nearly every shader; interning them up front
/// keeps the hot ones out of the write path.
const PRELUDE: &[&str] = &[
    // Scalar and vector spellings
    "void",
    "bool",
    "int",
    "uint",
    "half",
    "float",
    "double",
    "float2",
    "float3",
    "float4",
    "float4x4",
    "vec2",
    "vec3",
    "vec4",
    "mat4",
    // Resources
    "Texture2D",
    "RWTexture2D",
    "SamplerState",
    "ConstantBuffer",
    "StructuredBuffer",
    "RWStructuredBuffer",
    "ByteAddressBuffer",
    "sampler2D",
    "image2D",
    // Blocks and semantics
    "cbuffer",
    "tbuffer",
    "uniform",
    "buffer",
    "in",
    "out",
    "SV_Position",
    "SV_Target",
];

/// Interning failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    /// A shard has used up its 28-bit index space.
    ShardFull { shard: usize },
}

impl fmt::Display for InternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InternError::ShardFull { shard } => write!(
                f,
                "interner shard {shard} is full ({} names)",
                u64::from(Name::MAX_LOCAL) + 1
            ),
        }
    }
}

impl std::error::Error for InternError {}

#[derive(Default)]
struct Shard {
    index: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

impl Shard {
    fn get(&self, s: &str) -> Option<u32> {
        self.index.get(s).copied()
    }

    fn insert(&mut self, shard: usize, s: &str) -> Result<u32, InternError> {
        let local = u32::try_from(self.strings.len())
            .ok()
            .filter(|&local| local <= Name::MAX_LOCAL)
            .ok_or(InternError::ShardFull { shard })?;
        let text: &'static str = Box::leak(Box::from(s));
        self.strings.push(text);
        self.index.insert(text, local);
        Ok(local)
    }
}

/// Sharded string interner.
///
/// # Thread Safety
/// Each shard sits behind its own `RwLock`. Lookups and hits take a read
/// lock; only a miss takes the write lock, and it re-checks before
/// inserting.
pub struct StringInterner {
    shards: [RwLock<Shard>; Name::SHARDS],
}

impl StringInterner {
    pub fn new() -> Self {
        let interner = StringInterner {
            shards: std::array::from_fn(|_| RwLock::default()),
        };
        // Slot 0 of shard 0 is `Name::EMPTY`.
        interner.shards[0].write().strings.push("");
        for word in PRELUDE {
            interner.intern(word);
        }
        interner
    }

    fn shard_of(s: &str) -> usize {
        let mut hasher = FxHasher::default();
        s.hash(&mut hasher);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "only the low bits select a shard"
        )]
        let bits = hasher.finish() as usize;
        bits & (Name::SHARDS - 1)
    }

    /// Intern `s`, or report that its shard is full.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        if s.is_empty() {
            return Ok(Name::EMPTY);
        }

        let shard = Self::shard_of(s);
        let lock = &self.shards[shard];
        if let Some(local) = lock.read().get(s) {
            return Ok(Name::from_parts(shard, local));
        }

        let mut guard = lock.write();
        let local = match guard.get(s) {
            Some(local) => local,
            None => guard.insert(shard, s)?,
        };
        Ok(Name::from_parts(shard, local))
    }

    /// Intern `s`.
    ///
    /// # Panics
    /// Panics if the shard is full; see [`try_intern`](Self::try_intern).
    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// The text of `name`.
    pub fn lookup(&self, name: Name) -> &str {
        self.shards[name.shard()].read().strings[name.local()]
    }

    /// Number of interned strings, the empty string included.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.read().strings.len()).sum()
    }

    /// True when nothing but the empty string is interned.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Read access to interned names.
///
/// Type formatting and reflection take this rather than a concrete
/// interner.
pub trait StringLookup {
    fn lookup(&self, name: Name) -> &str;
}

impl StringLookup for StringInterner {
    fn lookup(&self, name: Name) -> &str {
        StringInterner::lookup(self, name)
    }
}
