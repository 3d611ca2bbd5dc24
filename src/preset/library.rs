use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{CardFxError, CardFxResult};
use crate::registry::EffectRegistry;
use crate::registry::schema::Coerced;
use crate::state::validate::{ValidationIssue, validate};
use crate::values::EffectValues;

/// Named bundle of effect values, applied as a unit.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Preset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Partial or full values; effects left out are applied at their defaults.
    pub values: EffectValues,
}

impl Preset {
    pub fn new(id: impl Into<String>, name: impl Into<String>, values: EffectValues) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            values,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Values this preset leaves in a store: schema defaults overlaid with the preset.
    ///
    /// Values the schema accepts as-is are normalized the way a store write would normalize them;
    /// anything else is kept raw so [`Preset::check`] still reports it.
    pub fn resolved(&self, registry: &EffectRegistry) -> EffectValues {
        let mut out = registry.default_values();
        for (effect, param, value) in self.values.entries() {
            let value = registry
                .get_effect(effect)
                .and_then(|s| s.param(param))
                .and_then(|spec| match spec.coerce(value) {
                    Ok(Coerced::Exact(v)) => Some(v),
                    _ => None,
                })
                .unwrap_or_else(|| value.clone());
            out.insert_param(effect, param, value);
        }
        out
    }

    /// Problems with the resolved values (unknown ids, wrong types, out-of-range numbers).
    pub fn check(&self, registry: &EffectRegistry) -> Vec<ValidationIssue> {
        validate(registry, &self.resolved(registry))
    }
}

/// Gallery of presets, in display order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PresetLibrary {
    presets: Vec<Preset>,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct PresetFile {
    presets: Vec<Preset>,
}

impl PresetLibrary {
    /// Build a library, rejecting empty and duplicate preset ids.
    pub fn new(presets: Vec<Preset>) -> CardFxResult<Self> {
        let mut seen = HashSet::new();
        for p in &presets {
            if p.id.trim().is_empty() {
                return Err(CardFxError::preset("preset id must be non-empty"));
            }
            if !seen.insert(p.id.as_str()) {
                return Err(CardFxError::preset(format!(
                    "preset id '{}' is defined twice",
                    p.id
                )));
            }
        }
        Ok(Self { presets })
    }

    /// Presets shipped with the crate.
    pub fn builtin() -> Self {
        Self {
            presets: builtin_presets(),
        }
    }

    /// Parse a `{"presets": [...]}` gallery from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> CardFxResult<Self> {
        let file: PresetFile = serde_json::from_reader(r)
            .map_err(|e| CardFxError::serde(format!("parse preset JSON: {e}")))?;
        Self::new(file.presets)
    }

    pub fn from_path(path: impl AsRef<Path>) -> CardFxResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CardFxError::preset(format!("open preset file '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn to_json_pretty(&self) -> CardFxResult<String> {
        serde_json::to_string_pretty(&PresetFile {
            presets: self.presets.clone(),
        })
        .map_err(|e| CardFxError::serde(format!("serialize presets: {e}")))
    }

    /// Fail when any preset writes values the registry would reject.
    pub fn validate_against(&self, registry: &EffectRegistry) -> CardFxResult<()> {
        for p in &self.presets {
            if let Some(issue) = p.check(registry).first() {
                return Err(CardFxError::preset(format!(
                    "preset '{}': effect '{}': {:?}",
                    p.id, issue.effect, issue.kind
                )));
            }
        }
        Ok(())
    }

    pub fn list(&self) -> &[Preset] {
        &self.presets
    }

    pub fn get(&self, id: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

fn builtin_presets() -> Vec<Preset> {
    vec![
        Preset::new(
            "holographic_premium",
            "Holographic Premium",
            EffectValues::new()
                .with("holographic", "intensity", 85.0)
                .with("holographic", "shiftSpeed", 120.0)
                .with("holographic", "rainbowSpread", 300.0)
                .with("holographic", "prismaticDepth", 70.0)
                .with("holographic", "animated", true)
                .with("crystal", "intensity", 30.0)
                .with("crystal", "sparkle", true),
        )
        .with_description("Full rainbow shift with a light crystal sparkle."),
        Preset::new(
            "chrome_mirror",
            "Chrome Mirror",
            EffectValues::new()
                .with("chrome", "intensity", 90.0)
                .with("chrome", "sharpness", 95.0)
                .with("chrome", "highlightSize", 30.0)
                .with("chrome", "tint", "#e8e8e8"),
        )
        .with_description("Hard mirror highlight on a near-white chrome."),
        Preset::new(
            "golden_luxury",
            "Golden Luxury",
            EffectValues::new()
                .with("gold", "intensity", 85.0)
                .with("gold", "goldTone", "rich")
                .with("gold", "shimmer", 70.0)
                .with("gold", "reflectivity", 85.0)
                .with("foil_spray", "intensity", 20.0)
                .with("foil_spray", "foilColor", "#ffd700"),
        )
        .with_description("Rich gold foil with scattered flecks."),
        Preset::new(
            "crystal_prism",
            "Crystal Prism",
            EffectValues::new()
                .with("crystal", "intensity", 75.0)
                .with("crystal", "facetCount", 12.0)
                .with("crystal", "dispersion", 80.0)
                .with("crystal", "sparkle", true)
                .with("prizm", "intensity", 40.0)
                .with("prizm", "complexity", 6.0),
        )
        .with_description("Many facets and split prism shards."),
        Preset::new(
            "vintage_classic",
            "Vintage Classic",
            EffectValues::new()
                .with("vintage", "intensity", 70.0)
                .with("vintage", "sepia", 70.0)
                .with("vintage", "grain", 40.0)
                .with("vintage", "fade", 30.0)
                .with("vintage", "era", "1950s"),
        )
        .with_description("Sepia print with heavy grain."),
        Preset::new(
            "ocean_waves",
            "Ocean Waves",
            EffectValues::new()
                .with("waves", "intensity", 70.0)
                .with("waves", "complexity", 5.0)
                .with("waves", "amplitude", 60.0)
                .with("waves", "waveColor", "#29b6f6")
                .with("interference", "intensity", 25.0),
        )
        .with_description("Flowing wave bands over a thin-film sheen."),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/preset/library.rs"]
mod tests;
