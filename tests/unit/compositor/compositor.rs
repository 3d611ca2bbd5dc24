use super::*;
use crate::foundation::core::{Affine, Point, Vec2};
use crate::lighting::{PointerState, compute_lighting};
use crate::style::{LayerRole, LightingPass, Paint};

fn compositor() -> Compositor {
    Compositor::new(Arc::new(EffectRegistry::builtin()), CompositorOptions::default())
}

fn centered_light() -> LightingDescriptor {
    compute_lighting(PointerState::centered(true), true).unwrap()
}

fn count_role(layers: &[StyleDescriptor], pred: impl Fn(&LayerRole) -> bool) -> usize {
    layers.iter().filter(|l| pred(&l.role)).count()
}

#[test]
fn empty_or_zero_values_compose_nothing() {
    let c = compositor();
    let light = centered_light();
    assert!(c.compose(&EffectValues::new(), None).is_empty());
    assert!(c.compose(&EffectValues::new(), Some(&light)).is_empty());
    assert!(c.compose(&c.registry().default_values(), Some(&light)).is_empty());
}

#[test]
fn gold_alone_has_wash_bands_and_glow() {
    let c = compositor();
    let v = EffectValues::new().with("gold", "intensity", 80.0);
    let layers = c.compose(&v, None);

    assert_eq!(layers.len(), 4);
    assert_eq!(
        layers[0].role,
        LayerRole::Wash {
            effect: "gold".to_owned()
        }
    );
    assert!((layers[0].opacity - 0.64).abs() < 1e-12);
    assert_eq!(layers[3].role, LayerRole::EdgeGlow);
    assert!((layers[3].opacity - 0.8).abs() < 1e-12);

    // Two shimmer bands, spread symmetrically and staggered in time.
    let bands: Vec<_> = layers
        .iter()
        .filter(|l| matches!(l.role, LayerRole::Decoration { .. }))
        .collect();
    assert_eq!(bands.len(), 2);
    assert_eq!(bands[0].transform, Some(Affine::translate(Vec2::new(0.0, -0.3))));
    assert_eq!(bands[1].transform, Some(Affine::translate(Vec2::new(0.0, 0.3))));
    let a0 = bands[0].animation.as_ref().unwrap();
    let a1 = bands[1].animation.as_ref().unwrap();
    assert_eq!(a0.duration_s, 4.0);
    assert_eq!(a0.delay_s, 0.0);
    assert_eq!(a1.delay_s, 2.0);
}

#[test]
fn facet_count_drives_decoration_count() {
    let c = compositor();
    let facets = |n: f64| {
        let v = EffectValues::new()
            .with("crystal", "intensity", 50.0)
            .with("crystal", "facetCount", n);
        let layers = c.compose(&v, None);
        (
            count_role(&layers, |r| {
                matches!(r, LayerRole::Decoration { name, .. } if name == "facet")
            }),
            count_role(&layers, |r| {
                matches!(r, LayerRole::Decoration { name, .. } if name == "glitter")
            }),
        )
    };
    assert_eq!(facets(8.0), (8, 24));
    assert_eq!(facets(12.0), (12, 36));
}

#[test]
fn facets_rotate_evenly() {
    let c = compositor();
    let v = EffectValues::new()
        .with("crystal", "intensity", 50.0)
        .with("crystal", "facetCount", 4.0)
        .with("crystal", "sparkle", false);
    let froms: Vec<f64> = c
        .compose(&v, None)
        .iter()
        .filter_map(|l| match &l.paint {
            Paint::Conic { from_deg, .. } => Some(*from_deg),
            _ => None,
        })
        .collect();
    assert_eq!(froms, vec![0.0, 90.0, 180.0, 270.0]);
}

#[test]
fn disabled_toggle_hides_decoration() {
    let c = compositor();
    let v = EffectValues::new()
        .with("crystal", "intensity", 50.0)
        .with("crystal", "sparkle", false);
    let layers = c.compose(&v, None);
    assert_eq!(
        count_role(&layers, |r| {
            matches!(r, LayerRole::Decoration { name, .. } if name == "glitter")
        }),
        0
    );
}

#[test]
fn decoration_cap_applies_per_template() {
    let mut c = compositor();
    c.options_mut().max_decorations = 5;
    let v = EffectValues::new()
        .with("crystal", "intensity", 50.0)
        .with("crystal", "facetCount", 20.0);
    let layers = c.compose(&v, None);
    assert_eq!(
        count_role(&layers, |r| matches!(r, LayerRole::Decoration { .. })),
        10
    );
}

#[test]
fn scattered_glitter_stays_on_card() {
    let c = compositor();
    let v = EffectValues::new()
        .with("crystal", "intensity", 50.0)
        .with("crystal", "facetCount", 20.0);
    for l in c.compose(&v, None) {
        if let (LayerRole::Decoration { name, .. }, Paint::Radial { center, radius, .. }) =
            (&l.role, &l.paint)
            && name == "glitter"
        {
            assert!((0.0..1.0).contains(&center.x));
            assert!((0.0..1.0).contains(&center.y));
            assert!(*radius >= 0.01 && *radius < 0.03);
        }
    }
}

#[test]
fn dominant_is_highest_candidate() {
    let c = compositor();
    let v = EffectValues::new()
        .with("gold", "intensity", 80.0)
        .with("chrome", "intensity", 40.0);
    let d = c.dominant(&v).unwrap();
    assert_eq!(d.effect, "gold");
    assert_eq!(d.intensity, 80.0);
    assert_eq!(d.tint, Rgba8::rgb(255, 215, 0));
}

#[test]
fn dominant_ties_go_to_candidate_order_and_ignore_others() {
    let c = compositor();
    let tie = EffectValues::new()
        .with("holographic", "intensity", 50.0)
        .with("chrome", "intensity", 50.0);
    assert_eq!(c.dominant(&tie).unwrap().effect, "chrome");

    let only_vintage = EffectValues::new().with("vintage", "intensity", 100.0);
    assert!(c.dominant(&only_vintage).is_none());
}

#[test]
fn lighting_adds_five_passes_scaled_by_dominant() {
    let c = compositor();
    let light = centered_light();
    let v = EffectValues::new()
        .with("gold", "intensity", 80.0)
        .with("chrome", "intensity", 40.0);

    let unlit = c.compose(&v, None);
    let lit = c.compose(&v, Some(&light));
    assert_eq!(lit.len(), unlit.len() + 5);

    let passes: Vec<LightingPass> = lit
        .iter()
        .filter_map(|l| match l.role {
            LayerRole::Lighting { pass } => Some(pass),
            _ => None,
        })
        .collect();
    assert_eq!(
        passes,
        vec![
            LightingPass::Shadow,
            LightingPass::Reflection,
            LightingPass::AmbientOcclusion,
            LightingPass::ColorTemperature,
            LightingPass::AtmosphericScatter,
        ]
    );

    let shadow = lit
        .iter()
        .find(|l| l.role == LayerRole::Lighting { pass: LightingPass::Shadow })
        .unwrap();
    // shadow_opacity 0.8 at full light, times gold's 0.8.
    assert!((shadow.opacity - 0.64).abs() < 1e-12);
}

#[test]
fn lighting_without_candidates_uses_neutral_strength() {
    let c = compositor();
    let light = centered_light();
    let v = EffectValues::new().with("vintage", "intensity", 60.0);
    let lit = c.compose(&v, Some(&light));
    let shadow = lit
        .iter()
        .find(|l| l.role == LayerRole::Lighting { pass: LightingPass::Shadow })
        .unwrap();
    assert!((shadow.opacity - 0.4).abs() < 1e-12);
}

#[test]
fn paint_order_is_non_decreasing_in_z() {
    let c = compositor();
    let v = EffectValues::new()
        .with("gold", "intensity", 30.0)
        .with("crystal", "intensity", 40.0)
        .with("waves", "intensity", 50.0);
    let layers = c.compose(&v, Some(&centered_light()));
    assert!(layers.windows(2).all(|w| w[0].z_index <= w[1].z_index));
    assert_eq!(layers.last().unwrap().z_index, Z_EDGE_GLOW);
    assert!((layers.last().unwrap().opacity - 1.0).abs() < 1e-12);
}

#[test]
fn frame_mode_clips_every_layer() {
    let mut c = compositor();
    c.options_mut().apply_to_frame = true;
    let v = EffectValues::new().with("holographic", "intensity", 70.0);
    let layers = c.compose(&v, Some(&centered_light()));
    assert!(!layers.is_empty());
    for l in &layers {
        let clip = l.clip.unwrap();
        assert_eq!(clip, ClipRegion::frame(0.2));
        assert!(clip.contains(Point::new(0.05, 0.5)));
        assert!(!clip.contains(Point::new(0.5, 0.5)));
    }
}

#[test]
fn same_input_same_layers_and_seed_moves_glitter() {
    let c = compositor();
    let v = EffectValues::new().with("crystal", "intensity", 60.0);
    let light = centered_light();
    assert_eq!(c.compose(&v, Some(&light)), c.compose(&v, Some(&light)));

    let mut reseeded = compositor();
    reseeded.options_mut().seed = 42;
    assert_ne!(c.compose(&v, None), reseeded.compose(&v, None));
}

#[test]
fn unregistered_effects_are_ignored() {
    let c = compositor();
    let v = EffectValues::new().with("plaid", "intensity", 90.0);
    assert!(c.compose(&v, None).is_empty());
}

#[test]
fn decoration_count_rounds_and_clamps() {
    let registry = EffectRegistry::builtin();
    let schema = registry.get_effect("crystal").unwrap();
    let facet = &schema.template.decorations[0];
    let mut m = schema.defaults();
    m.insert("facetCount".into(), 7.6.into());
    assert_eq!(effect_layers::decoration_count(facet, &schema.reader(Some(&m)), 64), 8);
    assert_eq!(effect_layers::decoration_count(facet, &schema.reader(Some(&m)), 3), 3);
}
