//! Declarative layer templates.
//!
//! Each effect describes its layers as data: a wash paint, a list of decorations, and an
//! optional lighting tint. Numbers and colors are either constants or read from the effect's
//! own parameters, so the compositor needs no per-effect code.

use std::collections::{BTreeMap, BTreeSet};

use smallvec::SmallVec;

use crate::foundation::core::{Point, Rgba8};
use crate::registry::schema::{EffectSchema, ParamReader, ParameterKind};
use crate::style::{Animation, BlendMode, FilterOp, GradientStop, Paint, Stops};

/// A number that is either fixed or derived linearly from a slider: `param * scale + offset`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Const(f64),
    Param {
        param: String,
        #[serde(default = "one")]
        scale: f64,
        #[serde(default)]
        offset: f64,
    },
}

fn one() -> f64 {
    1.0
}

impl Scalar {
    pub fn param(param: &str, scale: f64, offset: f64) -> Self {
        Self::Param {
            param: param.to_owned(),
            scale,
            offset,
        }
    }

    pub fn eval(&self, r: &ParamReader<'_>) -> f64 {
        match self {
            Self::Const(v) => *v,
            Self::Param {
                param,
                scale,
                offset,
            } => r.number(param) * scale + offset,
        }
    }
}

impl Default for Scalar {
    fn default() -> Self {
        Self::Const(1.0)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Self::Const(v)
    }
}

/// A color that is fixed, read from a color parameter, or picked by a select parameter.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ColorSource {
    Hex(String),
    Choice {
        param: String,
        choices: BTreeMap<String, String>,
        fallback: String,
    },
    Param {
        param: String,
    },
}

impl ColorSource {
    pub fn hex(s: &str) -> Self {
        Self::Hex(s.to_owned())
    }

    pub fn param(param: &str) -> Self {
        Self::Param {
            param: param.to_owned(),
        }
    }

    pub fn choice(param: &str, choices: &[(&str, &str)], fallback: &str) -> Self {
        Self::Choice {
            param: param.to_owned(),
            choices: choices
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
            fallback: fallback.to_owned(),
        }
    }

    /// Resolve to a color. Unparseable text falls back to the schema default, then white.
    pub fn resolve(&self, r: &ParamReader<'_>) -> Rgba8 {
        let hex = match self {
            Self::Hex(s) => s.as_str(),
            Self::Param { param } => r.text(param),
            Self::Choice {
                param,
                choices,
                fallback,
            } => choices
                .get(r.text(param))
                .map(String::as_str)
                .unwrap_or(fallback.as_str()),
        };
        Rgba8::parse_hex(hex).unwrap_or_else(|_| {
            let fallback = match self {
                Self::Param { param } => r
                    .schema()
                    .param(param)
                    .and_then(|p| p.default.as_str())
                    .and_then(|s| Rgba8::parse_hex(s).ok()),
                _ => None,
            };
            tracing::debug!(hex, "unparseable color in template; using fallback");
            fallback.unwrap_or(Rgba8::WHITE)
        })
    }
}

/// One color stop of a [`RampTemplate::Stops`] ramp.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StopTemplate {
    pub offset: f64,
    pub color: ColorSource,
    #[serde(default)]
    pub alpha: Scalar,
}

impl StopTemplate {
    pub fn new(offset: f64, color: ColorSource, alpha: impl Into<Scalar>) -> Self {
        Self {
            offset,
            color,
            alpha: alpha.into(),
        }
    }
}

/// Color ramp of a gradient.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RampTemplate {
    Stops(Vec<StopTemplate>),
    /// Evenly spaced hues from `hue_start` across `hue_span` degrees.
    Spectrum {
        hue_start: Scalar,
        hue_span: Scalar,
        steps: u32,
        saturation: f64,
        lightness: f64,
        #[serde(default)]
        alpha: Scalar,
    },
}

impl RampTemplate {
    pub fn resolve(&self, r: &ParamReader<'_>) -> Stops {
        match self {
            Self::Stops(stops) => stops
                .iter()
                .map(|s| GradientStop {
                    offset: s.offset.clamp(0.0, 1.0),
                    color: s.color.resolve(r).with_alpha(s.alpha.eval(r)),
                })
                .collect(),
            Self::Spectrum {
                hue_start,
                hue_span,
                steps,
                saturation,
                lightness,
                alpha,
            } => {
                let steps = (*steps).max(2);
                let start = hue_start.eval(r);
                let span = hue_span.eval(r);
                let alpha = alpha.eval(r);
                (0..steps)
                    .map(|i| {
                        let t = f64::from(i) / f64::from(steps - 1);
                        GradientStop {
                            offset: t,
                            color: Rgba8::from_hsl(start + span * t, *saturation, *lightness)
                                .with_alpha(alpha),
                        }
                    })
                    .collect::<SmallVec<_>>()
            }
        }
    }
}

/// Where one generated layer sits, supplied by the decoration arrangement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Overrides a radial paint's center.
    pub center: Option<Point>,
    pub scale: f64,
    pub angle_offset_deg: f64,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            center: None,
            scale: 1.0,
            angle_offset_deg: 0.0,
        }
    }
}

fn card_center() -> Point {
    Point::new(0.5, 0.5)
}

/// Paint with template-driven numbers and colors.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaintTemplate {
    Solid {
        color: ColorSource,
        #[serde(default)]
        alpha: Scalar,
    },
    Linear {
        angle: Scalar,
        ramp: RampTemplate,
    },
    Radial {
        #[serde(default = "card_center")]
        center: Point,
        radius: Scalar,
        ramp: RampTemplate,
    },
    Conic {
        #[serde(default = "card_center")]
        center: Point,
        from: Scalar,
        ramp: RampTemplate,
    },
}

impl PaintTemplate {
    /// Resolve against parameters. Radial centers come from `at` when it sets one, angles add
    /// `at.angle_offset_deg`, and radii scale by `at.scale`.
    pub fn resolve(&self, r: &ParamReader<'_>, at: Placement) -> Paint {
        match self {
            Self::Solid { color, alpha } => Paint::Solid {
                color: color.resolve(r).with_alpha(alpha.eval(r)),
            },
            Self::Linear { angle, ramp } => Paint::Linear {
                angle_deg: normalize_deg(angle.eval(r) + at.angle_offset_deg),
                stops: ramp.resolve(r),
            },
            Self::Radial {
                center,
                radius,
                ramp,
            } => Paint::Radial {
                center: at.center.unwrap_or(*center),
                radius: (radius.eval(r) * at.scale).max(0.0),
                stops: ramp.resolve(r),
            },
            Self::Conic { center, from, ramp } => Paint::Conic {
                center: *center,
                from_deg: normalize_deg(from.eval(r) + at.angle_offset_deg),
                stops: ramp.resolve(r),
            },
        }
    }

    fn params(&self, out: &mut BTreeSet<(String, ParameterKind)>) {
        match self {
            Self::Solid { color, alpha } => {
                color_params(color, out);
                scalar_params(alpha, out);
            }
            Self::Linear { angle, ramp } => {
                scalar_params(angle, out);
                ramp_params(ramp, out);
            }
            Self::Radial { radius, ramp, .. } => {
                scalar_params(radius, out);
                ramp_params(ramp, out);
            }
            Self::Conic { from, ramp, .. } => {
                scalar_params(from, out);
                ramp_params(ramp, out);
            }
        }
    }
}

pub(crate) fn normalize_deg(deg: f64) -> f64 {
    let d = deg % 360.0;
    if d < 0.0 { d + 360.0 } else { d }
}

/// Filter step with template-driven amount.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum FilterTemplate {
    BlurPx(Scalar),
    Brightness(Scalar),
    Contrast(Scalar),
    Saturate(Scalar),
    HueRotateDeg(Scalar),
    Sepia(Scalar),
}

impl FilterTemplate {
    pub fn resolve(&self, r: &ParamReader<'_>) -> FilterOp {
        match self {
            Self::BlurPx(s) => FilterOp::BlurPx(s.eval(r).max(0.0)),
            Self::Brightness(s) => FilterOp::Brightness(s.eval(r).max(0.0)),
            Self::Contrast(s) => FilterOp::Contrast(s.eval(r).max(0.0)),
            Self::Saturate(s) => FilterOp::Saturate(s.eval(r).max(0.0)),
            Self::HueRotateDeg(s) => FilterOp::HueRotateDeg(normalize_deg(s.eval(r))),
            Self::Sepia(s) => FilterOp::Sepia(s.eval(r).clamp(0.0, 1.0)),
        }
    }

    fn scalar(&self) -> &Scalar {
        match self {
            Self::BlurPx(s)
            | Self::Brightness(s)
            | Self::Contrast(s)
            | Self::Saturate(s)
            | Self::HueRotateDeg(s)
            | Self::Sepia(s) => s,
        }
    }
}

/// Looping animation. Duration is `period_s` divided by `speed / 100` when a speed is given.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationTemplate {
    pub name: String,
    pub period_s: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<Scalar>,
    /// Toggle parameter that switches the animation on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_by: Option<String>,
}

impl AnimationTemplate {
    const MIN_SPEED: f64 = 0.05;

    pub fn resolve(&self, r: &ParamReader<'_>, delay_s: f64) -> Option<Animation> {
        if let Some(toggle) = &self.enabled_by {
            if !r.flag(toggle) {
                return None;
            }
        }
        let speed = self
            .speed
            .as_ref()
            .map(|s| s.eval(r) / 100.0)
            .unwrap_or(1.0)
            .max(Self::MIN_SPEED);
        Some(Animation {
            name: self.name.clone(),
            duration_s: self.period_s / speed,
            delay_s,
        })
    }
}

/// The effect's full-surface base layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WashTemplate {
    pub paint: PaintTemplate,
    #[serde(default)]
    pub blend: BlendMode,
    /// Opacity at full intensity; multiplied by `intensity / 100`.
    #[serde(default)]
    pub opacity: Scalar,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<FilterTemplate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationTemplate>,
}

/// How decoration copies are laid out.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Arrangement {
    /// Points at seeded pseudo-random positions; radius `size * (0.5 + jitter)`.
    Scatter { size: Scalar },
    /// Copies rotated evenly around the card center.
    Radial,
    /// Copies stacked vertically across `spread` of the card height, with staggered animation.
    Bands { spread: Scalar },
}

/// An effect-specific sub-layer set.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DecorationTemplate {
    pub name: String,
    /// Rounded and capped by the compositor.
    pub count: Scalar,
    pub arrangement: Arrangement,
    pub paint: PaintTemplate,
    #[serde(default)]
    pub blend: BlendMode,
    /// Per-copy opacity at full intensity.
    #[serde(default)]
    pub opacity: Scalar,
    /// Toggle parameter that switches the decoration on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationTemplate>,
}

/// Everything the compositor needs to draw one effect.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wash: Option<WashTemplate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub decorations: Vec<DecorationTemplate>,
    /// Color the interactive lighting takes when this effect dominates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lighting_tint: Option<ColorSource>,
}

impl LayerTemplate {
    /// Check every parameter reference against the schema's declared parameters and kinds.
    pub(crate) fn check(&self, schema: &EffectSchema) -> Result<(), String> {
        let mut refs = BTreeSet::new();
        if let Some(w) = &self.wash {
            w.paint.params(&mut refs);
            scalar_params(&w.opacity, &mut refs);
            for f in &w.filter {
                scalar_params(f.scalar(), &mut refs);
            }
            if let Some(a) = &w.animation {
                animation_params(a, &mut refs);
            }
        }
        for d in &self.decorations {
            if d.name.trim().is_empty() {
                return Err("decoration name must be non-empty".to_owned());
            }
            scalar_params(&d.count, &mut refs);
            scalar_params(&d.opacity, &mut refs);
            match &d.arrangement {
                Arrangement::Scatter { size } => scalar_params(size, &mut refs),
                Arrangement::Bands { spread } => scalar_params(spread, &mut refs),
                Arrangement::Radial => {}
            }
            d.paint.params(&mut refs);
            if let Some(t) = &d.enabled_by {
                refs.insert((t.clone(), ParameterKind::Toggle));
            }
            if let Some(a) = &d.animation {
                animation_params(a, &mut refs);
            }
        }
        if let Some(tint) = &self.lighting_tint {
            color_params(tint, &mut refs);
        }

        for (param, kind) in refs {
            match schema.param(&param) {
                Some(p) if p.kind == kind => {}
                Some(p) => {
                    return Err(format!(
                        "parameter '{param}' is used as {kind:?} but declared {:?}",
                        p.kind
                    ));
                }
                None => return Err(format!("unknown parameter '{param}'")),
            }
        }
        Ok(())
    }
}

fn scalar_params(s: &Scalar, out: &mut BTreeSet<(String, ParameterKind)>) {
    if let Scalar::Param { param, .. } = s {
        out.insert((param.clone(), ParameterKind::Slider));
    }
}

fn color_params(c: &ColorSource, out: &mut BTreeSet<(String, ParameterKind)>) {
    match c {
        ColorSource::Hex(_) => {}
        ColorSource::Param { param } => {
            out.insert((param.clone(), ParameterKind::Color));
        }
        ColorSource::Choice { param, .. } => {
            out.insert((param.clone(), ParameterKind::Select));
        }
    }
}

fn ramp_params(ramp: &RampTemplate, out: &mut BTreeSet<(String, ParameterKind)>) {
    match ramp {
        RampTemplate::Stops(stops) => {
            for s in stops {
                color_params(&s.color, out);
                scalar_params(&s.alpha, out);
            }
        }
        RampTemplate::Spectrum {
            hue_start,
            hue_span,
            alpha,
            ..
        } => {
            scalar_params(hue_start, out);
            scalar_params(hue_span, out);
            scalar_params(alpha, out);
        }
    }
}

fn animation_params(a: &AnimationTemplate, out: &mut BTreeSet<(String, ParameterKind)>) {
    if let Some(s) = &a.speed {
        scalar_params(s, out);
    }
    if let Some(t) = &a.enabled_by {
        out.insert((t.clone(), ParameterKind::Toggle));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/registry/template.rs"]
mod tests;
