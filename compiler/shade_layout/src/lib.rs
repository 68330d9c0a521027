//! Type layout and resource binding for Shade.
//!
//! Given a checked type from a [`shade_types::Pool`] and a [`LayoutRule`],
//! the [`LayoutEngine`] computes how the type occupies each resource kind:
//! uniform bytes packed by the target's rules, and binding slots for opaque
//! objects (textures, samplers, buffers). The result is either a compact
//! [`SimpleLayoutInfo`] or a full [`TypeLayout`] tree with per-field offsets
//! for reflection and parameter binding.
//!
//! # Rules
//!
//! A target's [`LayoutRulesFamily`] picks the [`LayoutRule`] for each kind of
//! block. Combinations a target cannot express (GLSL texture buffers, HLSL
//! specialization constants, HLSL storage images) are reported as
//! [`LayoutError`]s rather than laid out with a fallback.
//!
//! # Tracing
//!
//! Enable with `RUST_LOG=shade_layout=debug` or `RUST_LOG=shade_layout=trace`
//! after calling [`init_tracing`].

use std::sync::Once;

mod engine;
mod error;
mod info;
mod program;
mod resource_kind;
mod rules;
mod type_layout;

pub use engine::LayoutEngine;
pub use error::LayoutError;
pub use info::{round_to_alignment, round_up_to_power_of_two, SimpleLayoutInfo, UniformLayoutInfo};
pub use program::layout_global_scope;
pub use resource_kind::ResourceKind;
pub use rules::{
    BlockKind, CodeGenTarget, LayoutRule, LayoutRulesFamily, ParameterKind, ParseTargetError,
};
pub use type_layout::{
    LayoutShape, ResourceOffsets, ResourceUsage, ResourceUsageEntry, TypeLayout, VarLayout,
};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{ResourceKind, SimpleLayoutInfo};
    shade_ir::static_assert_size!(ResourceKind, 1);
    shade_ir::static_assert_size!(SimpleLayoutInfo, 40);
}
