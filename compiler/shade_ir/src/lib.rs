//! Shade IR - identifiers shared across the compiler.
//!
//! Declarations, struct fields and parameters are named by interned
//! [`Name`] handles. The [`StringInterner`] owns the text and is safe to
//! share between threads, so several layout computations can read names
//! concurrently.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-copied handles.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod interner;
mod name;

pub use interner::{InternError, StringInterner, StringLookup};
pub use name::Name;

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::Name;
    static_assert_size!(Name, 4);
}
