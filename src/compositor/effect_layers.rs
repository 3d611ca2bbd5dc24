use crate::foundation::core::{Affine, Point, Vec2};
use crate::foundation::math::{clamp01, unit_hash};
use crate::registry::schema::{EffectSchema, ParamReader};
use crate::registry::template::{Arrangement, DecorationTemplate, Placement, WashTemplate};
use crate::style::{LayerRole, StyleDescriptor};

/// Seed channels for scattered decorations.
const CH_X: u8 = 0;
const CH_Y: u8 = 1;
const CH_SIZE: u8 = 2;
const CH_PHASE: u8 = 3;

pub(crate) fn wash_layer(
    schema: &EffectSchema,
    wash: &WashTemplate,
    r: &ParamReader<'_>,
    z_index: i32,
) -> StyleDescriptor {
    let strength = r.intensity() / 100.0;
    StyleDescriptor {
        z_index,
        role: LayerRole::Wash {
            effect: schema.id.clone(),
        },
        paint: wash.paint.resolve(r, Placement::default()),
        blend: wash.blend,
        opacity: clamp01(wash.opacity.eval(r) * strength),
        transform: None,
        filter: wash.filter.iter().map(|f| f.resolve(r)).collect(),
        clip: None,
        animation: wash.animation.as_ref().and_then(|a| a.resolve(r, 0.0)),
    }
}

/// Number of copies a decoration asks for, rounded and capped.
pub(crate) fn decoration_count(d: &DecorationTemplate, r: &ParamReader<'_>, cap: u32) -> u32 {
    let n = d.count.eval(r).round();
    if n.is_nan() || n < 1.0 {
        return 0;
    }
    (n.min(f64::from(cap))) as u32
}

/// Expand one decoration template into its copies.
pub(crate) fn decoration_layers(
    schema: &EffectSchema,
    d: &DecorationTemplate,
    r: &ParamReader<'_>,
    z_index: i32,
    cap: u32,
    seed: u64,
    out: &mut Vec<StyleDescriptor>,
) {
    if let Some(toggle) = &d.enabled_by
        && !r.flag(toggle)
    {
        return;
    }
    let count = decoration_count(d, r, cap);
    if count == 0 {
        return;
    }

    let opacity = clamp01(d.opacity.eval(r) * r.intensity() / 100.0);
    let key = format!("{}/{}", schema.id, d.name);
    let period = d.animation.as_ref().map(|a| a.period_s).unwrap_or(0.0);

    for index in 0..count {
        let (at, transform, delay) = match &d.arrangement {
            Arrangement::Scatter { size } => {
                let center = Point::new(
                    unit_hash(seed, &key, index, CH_X),
                    unit_hash(seed, &key, index, CH_Y),
                );
                let scale = size.eval(r) * (0.5 + unit_hash(seed, &key, index, CH_SIZE));
                let delay = period * unit_hash(seed, &key, index, CH_PHASE);
                let at = Placement {
                    center: Some(center),
                    scale,
                    angle_offset_deg: 0.0,
                };
                (at, None, delay)
            }
            Arrangement::Radial => {
                let at = Placement {
                    angle_offset_deg: 360.0 * f64::from(index) / f64::from(count),
                    ..Placement::default()
                };
                (at, None, 0.0)
            }
            Arrangement::Bands { spread } => {
                let t = if count == 1 {
                    0.5
                } else {
                    f64::from(index) / f64::from(count - 1)
                };
                let dy = spread.eval(r) * (t - 0.5);
                let delay = period * f64::from(index) / f64::from(count);
                (
                    Placement::default(),
                    Some(Affine::translate(Vec2::new(0.0, dy))),
                    delay,
                )
            }
        };

        out.push(StyleDescriptor {
            z_index,
            role: LayerRole::Decoration {
                effect: schema.id.clone(),
                name: d.name.clone(),
                index,
            },
            paint: d.paint.resolve(r, at),
            blend: d.blend,
            opacity,
            transform,
            filter: Vec::new(),
            clip: None,
            animation: d.animation.as_ref().and_then(|a| a.resolve(r, delay)),
        });
    }
}
