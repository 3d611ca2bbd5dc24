//! Interactive lighting derived from pointer position.

pub mod model;
pub mod tracker;

pub use model::{LightingDescriptor, PointerState, compute_lighting};
pub use tracker::PointerTracker;
