//! cardfx composites foil, holographic, chrome and similar finishes over a virtual trading card.
//!
//! The engine is renderer-agnostic: it turns effect parameters and a pointer position into an
//! ordered list of plain layer records (paint, blend mode, opacity, transform, clip) that any
//! layered alpha-blend renderer can draw.
//!
//! # Pipeline overview
//!
//! 1. **Registry**: an immutable catalog of effects, each a parameter schema plus a
//!    declarative layer template ([`EffectRegistry`]).
//! 2. **State**: current parameter values, type-checked and clamped on write
//!    ([`EffectStateStore`]), repaired when loaded from outside ([`repair`]).
//! 3. **Presets**: bulk writes sequenced against manual edits ([`PresetController`]).
//! 4. **Lighting**: pointer position to a [`LightingDescriptor`] ([`compute_lighting`]).
//! 5. **Compositing**: `(values, lighting) -> Vec<StyleDescriptor>` ([`Compositor`]).
//!
//! [`EffectSession`] owns one of each and is the usual entry point.
//!
//! Editing never fails: unknown ids and mistyped values are logged through `tracing` and
//! ignored, out-of-range numbers are clamped. Only loading catalogs, presets and config
//! returns [`CardFxError`].
#![forbid(unsafe_code)]

mod foundation;

pub mod card;
pub mod compositor;
pub mod config;
pub mod lighting;
pub mod preset;
pub mod registry;
pub mod session;
pub mod state;
pub mod style;
pub mod values;

pub use card::{Card, CardFrame, Rarity};
pub use compositor::{Compositor, CompositorOptions, Dominant, dominant_effect};
pub use config::EngineConfig;
pub use foundation::core::{Affine, CARD_BOUNDS, Point, Rect, Rgba8, Vec2};
pub use foundation::error::{CardFxError, CardFxResult};
pub use lighting::{LightingDescriptor, PointerState, PointerTracker, compute_lighting};
pub use preset::{
    EditOutcome, Preset, PresetApplicationState, PresetController, PresetLibrary, PresetPhase,
    SequenceId,
};
pub use registry::EffectRegistry;
pub use registry::schema::{EffectCategory, EffectSchema, ParameterKind, ParameterSpec};
pub use session::EffectSession;
pub use state::{
    EffectStateStore, IssueKind, RepairReport, ValidationIssue, WriteOutcome, WriteRejection,
    repair, validate,
};
pub use style::{
    Animation, BlendMode, ClipRegion, FilterOp, GradientStop, LayerRole, LightingPass, Paint,
    StyleDescriptor,
};
pub use values::{EffectValues, ParamChange, ParamMap, ParamValue};
