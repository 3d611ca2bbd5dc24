//! Renderer-agnostic layer records.
//!
//! A [`StyleDescriptor`] carries no CSS or GPU types: geometry is expressed in the unit square
//! of the card (`0..1` on both axes) except where a field says pixels.

use smallvec::SmallVec;

use crate::foundation::core::{Affine, Point, Rect, Rgba8};

/// Porter-Duff "over" plus the separable/non-separable blend modes renderers commonly offer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Plain alpha compositing.
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    SoftLight,
    HardLight,
    ColorDodge,
    ColorBurn,
    Lighten,
    Darken,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

/// A gradient color stop; `offset` is in `0..=1`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Rgba8,
}

pub type Stops = SmallVec<[GradientStop; 6]>;

/// What a layer fills its region with.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Paint {
    Solid {
        color: Rgba8,
    },
    /// `angle_deg` follows the usual convention: 0 points up, 90 points right.
    Linear {
        angle_deg: f64,
        stops: Stops,
    },
    Radial {
        center: Point,
        radius: f64,
        stops: Stops,
    },
    Conic {
        center: Point,
        from_deg: f64,
        stops: Stops,
    },
}

/// One post-paint filter step. Applied in list order.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum FilterOp {
    /// Gaussian blur radius in pixels.
    BlurPx(f64),
    Brightness(f64),
    Contrast(f64),
    Saturate(f64),
    HueRotateDeg(f64),
    Sepia(f64),
}

/// Region a layer is clipped to.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClipRegion {
    /// Everything inside `outer` and outside `inner`.
    FrameBand { outer: Rect, inner: Rect },
}

impl ClipRegion {
    /// Ring of width `band` (fraction of the card) along the card edge.
    pub fn frame(band: f64) -> Self {
        let band = band.clamp(0.0, 0.5);
        Self::FrameBand {
            outer: Rect::new(0.0, 0.0, 1.0, 1.0),
            inner: Rect::new(band, band, 1.0 - band, 1.0 - band),
        }
    }

    /// `true` when the normalized point lies inside the clip region.
    pub fn contains(&self, p: Point) -> bool {
        match *self {
            Self::FrameBand { outer, inner } => outer.contains(p) && !inner.contains(p),
        }
    }
}

/// A looping animation the renderer should run on the layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Animation {
    pub name: String,
    pub duration_s: f64,
    pub delay_s: f64,
}

/// Which part of the pipeline produced a layer.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayerRole {
    Wash { effect: String },
    Decoration { effect: String, name: String, index: u32 },
    Lighting { pass: LightingPass },
    EdgeGlow,
}

/// Interactive-lighting overlay passes, in paint order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightingPass {
    Shadow,
    Reflection,
    AmbientOcclusion,
    ColorTemperature,
    AtmosphericScatter,
}

/// One paintable layer, emitted back to front.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StyleDescriptor {
    pub z_index: i32,
    pub role: LayerRole,
    pub paint: Paint,
    pub blend: BlendMode,
    /// Layer opacity in `0..=1`.
    pub opacity: f64,
    /// Transform in unit card space, applied after the paint is laid out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<Affine>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<FilterOp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip: Option<ClipRegion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
}

#[cfg(test)]
#[path = "../tests/unit/style.rs"]
mod tests;
