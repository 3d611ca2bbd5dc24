use smallvec::smallvec;

use crate::foundation::core::{Affine, Point, Rgba8, Vec2};
use crate::foundation::math::clamp01;
use crate::lighting::LightingDescriptor;
use crate::registry::template::normalize_deg;
use crate::style::{
    BlendMode, FilterOp, GradientStop, LayerRole, LightingPass, Paint, StyleDescriptor,
};

const COOL: Rgba8 = Rgba8::rgb(158, 197, 255);
const WARM: Rgba8 = Rgba8::rgb(255, 180, 107);

/// How strongly the dominant finish colors the light.
const TINT_MIX: f64 = 0.35;

fn stop(offset: f64, color: Rgba8) -> GradientStop {
    GradientStop { offset, color }
}

fn overlay(
    pass: LightingPass,
    z_index: i32,
    paint: Paint,
    blend: BlendMode,
    opacity: f64,
) -> StyleDescriptor {
    StyleDescriptor {
        z_index,
        role: LayerRole::Lighting { pass },
        paint,
        blend,
        opacity: clamp01(opacity),
        transform: None,
        filter: Vec::new(),
        clip: None,
        animation: None,
    }
}

/// The five lighting passes, back to front.
///
/// `factor` is the dominant effect's strength in `0..=1` and `tint` its lighting color.
pub(crate) fn lighting_layers(
    l: &LightingDescriptor,
    factor: f64,
    tint: Rgba8,
    z_base: i32,
    out: &mut Vec<StyleDescriptor>,
) {
    let light_at = Point::new(l.light_x / 100.0, l.light_y / 100.0);

    let mut shadow = overlay(
        LightingPass::Shadow,
        z_base,
        Paint::Radial {
            center: Point::new(0.5, 0.5),
            radius: 0.75,
            stops: smallvec![
                stop(0.0, Rgba8::BLACK.with_alpha(0.0)),
                stop(0.8, Rgba8::BLACK.with_alpha(0.5)),
                stop(1.0, Rgba8::BLACK),
            ],
        },
        BlendMode::Multiply,
        l.shadow_opacity * factor,
    );
    // Shadow offsets are in percent of the card.
    shadow.transform = Some(Affine::translate(Vec2::new(
        l.shadow_x / 100.0,
        l.shadow_y / 100.0,
    )));
    shadow.filter = vec![FilterOp::BlurPx(l.shadow_blur)];
    out.push(shadow);

    let half_width = l.reflection_spread / 200.0;
    let glare = Rgba8::WHITE.mix(tint, TINT_MIX);
    out.push(overlay(
        LightingPass::Reflection,
        z_base + 1,
        Paint::Linear {
            angle_deg: normalize_deg(l.reflection_angle + 90.0),
            stops: smallvec![
                stop(clamp01(0.5 - half_width), glare.with_alpha(0.0)),
                stop(0.5, glare),
                stop(clamp01(0.5 + half_width), glare.with_alpha(0.0)),
            ],
        },
        BlendMode::Screen,
        l.reflection_intensity * factor,
    ));

    out.push(overlay(
        LightingPass::AmbientOcclusion,
        z_base + 2,
        Paint::Radial {
            center: light_at,
            radius: 1.2,
            stops: smallvec![
                stop(0.0, Rgba8::BLACK.with_alpha(0.0)),
                stop(1.0, Rgba8::BLACK),
            ],
        },
        BlendMode::Multiply,
        l.ambient_occlusion * l.light_intensity * factor,
    ));

    let temperature = COOL.mix(WARM, clamp01(l.color_temperature)).mix(tint, TINT_MIX);
    out.push(overlay(
        LightingPass::ColorTemperature,
        z_base + 3,
        Paint::Solid { color: temperature },
        BlendMode::SoftLight,
        (0.15 + (l.color_temperature - 0.5).abs()) * l.light_intensity * factor,
    ));

    out.push(overlay(
        LightingPass::AtmosphericScatter,
        z_base + 4,
        Paint::Radial {
            center: light_at,
            radius: 0.35 + l.light_distance * 0.25,
            stops: smallvec![stop(0.0, tint), stop(1.0, tint.with_alpha(0.0))],
        },
        BlendMode::Screen,
        l.atmospheric_scatter * factor * 0.6,
    ));
}

/// Rim light whose opacity tracks the combined strength of every active effect.
pub(crate) fn edge_glow_layer(total_intensity: f64, tint: Rgba8, z_index: i32) -> StyleDescriptor {
    StyleDescriptor {
        z_index,
        role: LayerRole::EdgeGlow,
        paint: Paint::Radial {
            center: Point::new(0.5, 0.5),
            radius: 0.75,
            stops: smallvec![
                stop(0.0, tint.with_alpha(0.0)),
                stop(0.85, tint.with_alpha(0.0)),
                stop(1.0, tint),
            ],
        },
        blend: BlendMode::Screen,
        opacity: clamp01(total_intensity / 100.0),
        transform: None,
        filter: Vec::new(),
        clip: None,
        animation: None,
    }
}
