use crate::foundation::core::{Point, Rect};
use crate::foundation::math::clamp01;

/// Pointer position normalized to the card box, `(0, 0)` top-left, `(1, 1)` bottom-right.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointerState {
    pub x: f64,
    pub y: f64,
    pub is_hovering: bool,
}

impl PointerState {
    pub fn new(x: f64, y: f64, is_hovering: bool) -> Self {
        Self { x, y, is_hovering }
    }

    /// Pointer resting at the card center.
    pub fn centered(is_hovering: bool) -> Self {
        Self::new(0.5, 0.5, is_hovering)
    }

    /// Map a position in host coordinates into the card box `bounds`.
    ///
    /// Positions outside the box are clamped to its edge. Returns `None` for a degenerate box
    /// or non-finite input.
    pub fn from_client(pos: Point, bounds: Rect, is_hovering: bool) -> Option<Self> {
        if !(bounds.width() > 0.0 && bounds.height() > 0.0) {
            return None;
        }
        let x = (pos.x - bounds.x0) / bounds.width();
        let y = (pos.y - bounds.y0) / bounds.height();
        Self::new(x, y, is_hovering).sanitized()
    }

    /// Copy with coordinates clamped into `[0, 1]`, or `None` when either is not finite.
    pub fn sanitized(self) -> Option<Self> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return None;
        }
        Some(Self {
            x: clamp01(self.x),
            y: clamp01(self.y),
            ..self
        })
    }
}

/// Simulated light derived from the pointer.
///
/// Angles are degrees, offsets are in card-relative pixels at the reference size, and every
/// other value is a unitless factor.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LightingDescriptor {
    /// Pointer x in percent of the card width.
    pub light_x: f64,
    /// Pointer y in percent of the card height.
    pub light_y: f64,
    pub light_intensity: f64,
    /// Distance from the card center, `0` at the center and `1` at the edge midpoints and beyond.
    pub light_distance: f64,
    pub shadow_x: f64,
    pub shadow_y: f64,
    pub shadow_blur: f64,
    pub shadow_opacity: f64,
    pub reflection_angle: f64,
    pub reflection_intensity: f64,
    pub reflection_spread: f64,
    pub ambient_occlusion: f64,
    /// `0.5` is neutral; higher is warmer.
    pub color_temperature: f64,
    pub atmospheric_scatter: f64,
    pub directional_bias: f64,
}

/// Derive the lighting descriptor for `pointer`.
///
/// Returns `None` when lighting is disabled or the pointer is not over the card.
pub fn compute_lighting(pointer: PointerState, enabled: bool) -> Option<LightingDescriptor> {
    if !enabled || !pointer.is_hovering {
        return None;
    }

    let nx = (pointer.x - 0.5) * 2.0;
    let ny = (pointer.y - 0.5) * 2.0;
    let distance = (nx * nx + ny * ny).sqrt().min(1.0);

    let light_intensity = (1.0 - distance * 0.6).max(0.2);

    Some(LightingDescriptor {
        light_x: pointer.x * 100.0,
        light_y: pointer.y * 100.0,
        light_intensity,
        light_distance: distance,
        shadow_x: nx * -30.0,
        shadow_y: ny * -30.0,
        shadow_blur: 5.0 + distance * 15.0,
        shadow_opacity: light_intensity * 0.8,
        reflection_angle: ny.atan2(nx).to_degrees(),
        reflection_intensity: light_intensity * (1.0 - distance * 0.3),
        reflection_spread: 20.0 + distance * 40.0,
        ambient_occlusion: (0.5 - distance * 0.3).max(0.1),
        color_temperature: 0.5 + nx * 0.3,
        atmospheric_scatter: light_intensity * (1.0 - distance * 0.4),
        directional_bias: nx.abs() + ny.abs(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/lighting/model.rs"]
mod tests;
