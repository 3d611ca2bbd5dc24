//! Layer compositor.
//!
//! Turns effect values plus the current lighting into an ordered, renderer-agnostic layer
//! list. Paint order is fixed:
//!
//! 1. washes, one per active effect that declares one;
//! 2. decorations (facets, glitter, wave bands) expanded from each effect's templates;
//! 3. interactive-lighting overlays, only while lighting is present;
//! 4. a single edge glow.
//!
//! Within the first two bands effects follow registry order. Output depends only on the
//! inputs and [`CompositorOptions::seed`].

mod effect_layers;
mod lighting_layers;

use std::sync::Arc;

use crate::foundation::core::Rgba8;
use crate::lighting::LightingDescriptor;
use crate::registry::EffectRegistry;
use crate::style::{ClipRegion, StyleDescriptor};
use crate::values::EffectValues;

/// First z-index of each paint band.
pub const Z_WASH: i32 = 100;
pub const Z_DECORATION: i32 = 200;
pub const Z_LIGHTING: i32 = 300;
pub const Z_EDGE_GLOW: i32 = 400;

/// Lighting strength used when no candidate effect is active.
const NEUTRAL_FACTOR: f64 = 0.5;

fn default_candidates() -> Vec<String> {
    ["gold", "chrome", "crystal", "holographic"]
        .into_iter()
        .map(str::to_owned)
        .collect()
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CompositorOptions {
    /// Clip every layer to the frame band instead of the whole card.
    pub apply_to_frame: bool,
    /// Width of the frame band as a fraction of the card.
    pub frame_width: f64,
    /// Effects eligible to color the lighting, in tie-break order.
    pub dominant_candidates: Vec<String>,
    /// Upper bound on copies per decoration.
    pub max_decorations: u32,
    /// Seed for scattered decoration placement.
    pub seed: u64,
}

impl Default for CompositorOptions {
    fn default() -> Self {
        Self {
            apply_to_frame: false,
            frame_width: 0.2,
            dominant_candidates: default_candidates(),
            max_decorations: 64,
            seed: 0,
        }
    }
}

/// The effect lighting is colored by.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Dominant {
    pub effect: String,
    /// Intensity in `0..=100`.
    pub intensity: f64,
    pub tint: Rgba8,
}

/// Highest-intensity active effect among `candidates`. Ties go to the earlier candidate.
pub fn dominant_effect(
    registry: &EffectRegistry,
    values: &EffectValues,
    candidates: &[String],
) -> Option<Dominant> {
    let mut best: Option<Dominant> = None;
    for id in candidates {
        let Some(schema) = registry.get_effect(id) else {
            continue;
        };
        let r = schema.reader(values.effect(id));
        let intensity = r.intensity();
        if intensity <= 0.0 || best.as_ref().is_some_and(|b| b.intensity >= intensity) {
            continue;
        }
        let tint = schema
            .template
            .lighting_tint
            .as_ref()
            .map(|c| c.resolve(&r))
            .unwrap_or(Rgba8::WHITE);
        best = Some(Dominant {
            effect: id.clone(),
            intensity,
            tint,
        });
    }
    best
}

/// Stateless layer generator over an injected registry.
#[derive(Clone, Debug)]
pub struct Compositor {
    registry: Arc<EffectRegistry>,
    options: CompositorOptions,
}

impl Compositor {
    pub fn new(registry: Arc<EffectRegistry>, options: CompositorOptions) -> Self {
        Self { registry, options }
    }

    pub fn registry(&self) -> &Arc<EffectRegistry> {
        &self.registry
    }

    pub fn options(&self) -> &CompositorOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut CompositorOptions {
        &mut self.options
    }

    pub fn dominant(&self, values: &EffectValues) -> Option<Dominant> {
        dominant_effect(&self.registry, values, &self.options.dominant_candidates)
    }

    /// Build the ordered layer list. Empty when no effect has a positive intensity.
    #[tracing::instrument(skip_all, fields(lit = lighting.is_some()))]
    pub fn compose(
        &self,
        values: &EffectValues,
        lighting: Option<&LightingDescriptor>,
    ) -> Vec<StyleDescriptor> {
        for (id, _) in values.iter() {
            if !self.registry.contains(id) {
                tracing::debug!(effect = id, "skipping values for unregistered effect");
            }
        }

        let active: Vec<_> = self
            .registry
            .list_effects()
            .iter()
            .enumerate()
            .map(|(pos, schema)| (pos, schema, schema.reader(values.effect(&schema.id))))
            .filter(|(_, _, r)| r.intensity() > 0.0)
            .collect();
        if active.is_empty() {
            return Vec::new();
        }

        let mut layers = Vec::new();

        for (pos, schema, r) in &active {
            if let Some(wash) = &schema.template.wash {
                layers.push(effect_layers::wash_layer(
                    schema,
                    wash,
                    r,
                    Z_WASH + band_offset(*pos),
                ));
            }
        }

        for (pos, schema, r) in &active {
            for d in &schema.template.decorations {
                effect_layers::decoration_layers(
                    schema,
                    d,
                    r,
                    Z_DECORATION + band_offset(*pos),
                    self.options.max_decorations,
                    self.options.seed,
                    &mut layers,
                );
            }
        }

        let dominant = self.dominant(values);
        let tint = dominant.as_ref().map(|d| d.tint).unwrap_or(Rgba8::WHITE);
        if let Some(l) = lighting {
            let factor = dominant
                .as_ref()
                .map(|d| d.intensity / 100.0)
                .unwrap_or(NEUTRAL_FACTOR);
            lighting_layers::lighting_layers(l, factor, tint, Z_LIGHTING, &mut layers);
        }

        let total: f64 = active.iter().map(|(_, _, r)| r.intensity()).sum();
        layers.push(lighting_layers::edge_glow_layer(total, tint, Z_EDGE_GLOW));

        if self.options.apply_to_frame {
            let clip = ClipRegion::frame(self.options.frame_width);
            for layer in &mut layers {
                layer.clip = Some(clip);
            }
        }

        tracing::debug!(
            layers = layers.len(),
            active = active.len(),
            dominant = dominant.as_ref().map(|d| d.effect.as_str()),
            "composed"
        );
        layers
    }
}

fn band_offset(pos: usize) -> i32 {
    i32::try_from(pos).unwrap_or(i32::MAX).min(Z_DECORATION - Z_WASH - 1)
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/compositor.rs"]
mod tests;
