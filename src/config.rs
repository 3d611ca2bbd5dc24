//! Engine configuration.
//!
//! Plain JSON. Every field is optional; relative catalog/preset paths resolve against the
//! directory of the config file.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::compositor::CompositorOptions;
use crate::foundation::error::{CardFxError, CardFxResult};
use crate::preset::PresetLibrary;
use crate::registry::EffectRegistry;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub lighting_enabled: bool,
    pub compositor: CompositorOptions,
    /// Effect catalog JSON; the built-in catalog when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
    /// Preset gallery JSON; the built-in presets when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presets: Option<PathBuf>,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lighting_enabled: true,
            compositor: CompositorOptions::default(),
            catalog: None,
            presets: None,
            base_dir: None,
        }
    }
}

impl EngineConfig {
    pub fn from_reader<R: std::io::Read>(r: R) -> CardFxResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| CardFxError::serde(format!("parse engine config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> CardFxResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CardFxError::validation(format!("open engine config '{}': {e}", path.display()))
        })?;
        let mut cfg = Self::from_reader(BufReader::new(f))?;
        cfg.base_dir = path.parent().map(Path::to_path_buf);
        Ok(cfg)
    }

    fn validate(&self) -> CardFxResult<()> {
        let o = &self.compositor;
        if !o.frame_width.is_finite() || !(0.0..=0.5).contains(&o.frame_width) {
            return Err(CardFxError::validation(format!(
                "compositor.frame_width must be in [0, 0.5], got {}",
                o.frame_width
            )));
        }
        if o.max_decorations == 0 {
            return Err(CardFxError::validation(
                "compositor.max_decorations must be positive",
            ));
        }
        Ok(())
    }

    fn resolve(&self, p: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if p.is_relative() => base.join(p),
            _ => p.to_path_buf(),
        }
    }

    /// The configured catalog, or the built-in one.
    pub fn load_registry(&self) -> CardFxResult<EffectRegistry> {
        match &self.catalog {
            Some(p) => EffectRegistry::from_path(self.resolve(p)),
            None => Ok(EffectRegistry::builtin()),
        }
    }

    /// The configured presets, checked against `registry`.
    ///
    /// Without a preset file the built-in gallery is used when it fits the registry, and an
    /// empty gallery otherwise.
    pub fn load_presets(&self, registry: &EffectRegistry) -> CardFxResult<PresetLibrary> {
        let Some(p) = &self.presets else {
            let lib = PresetLibrary::builtin();
            return Ok(match lib.validate_against(registry) {
                Ok(()) => lib,
                Err(e) => {
                    tracing::warn!(error = %e, "built-in presets do not fit the catalog");
                    PresetLibrary::default()
                }
            });
        };
        let lib = PresetLibrary::from_path(self.resolve(p))?;
        lib.validate_against(registry)?;
        Ok(lib)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
