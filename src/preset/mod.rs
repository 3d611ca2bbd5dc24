//! Presets and the protocol that applies them.

pub mod controller;
pub mod library;

pub use controller::{
    EditOutcome, ParamWrite, PresetApplicationState, PresetController, PresetPhase, SequenceId,
};
pub use library::{Preset, PresetLibrary};
