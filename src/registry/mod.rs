//! Effect registry.
//!
//! The catalog of effect definitions is immutable after construction and is shared as an
//! `Arc<EffectRegistry>` by the store, the session and the compositor.

pub(crate) mod catalog;
pub mod schema;
pub mod template;

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{CardFxError, CardFxResult};
use crate::values::EffectValues;
use schema::EffectSchema;

/// Catalog of effect definitions, in display order.
#[derive(Clone, Debug)]
pub struct EffectRegistry {
    effects: Vec<EffectSchema>,
    index: HashMap<String, usize>,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct CatalogFile {
    effects: Vec<EffectSchema>,
}

impl EffectRegistry {
    /// Build a registry, validating every schema and rejecting duplicate ids.
    pub fn new(effects: Vec<EffectSchema>) -> CardFxResult<Self> {
        for e in &effects {
            e.validate()?;
        }
        let mut index = HashMap::with_capacity(effects.len());
        for (i, e) in effects.iter().enumerate() {
            if index.insert(e.id.clone(), i).is_some() {
                return Err(CardFxError::validation(format!(
                    "effect id '{}' is registered twice",
                    e.id
                )));
            }
        }
        Ok(Self { effects, index })
    }

    /// The catalog shipped with the crate.
    pub fn builtin() -> Self {
        let effects = catalog::builtin_effects();
        let index = effects
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();
        Self { effects, index }
    }

    /// Parse a `{"effects": [...]}` catalog from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> CardFxResult<Self> {
        let file: CatalogFile = serde_json::from_reader(r)
            .map_err(|e| CardFxError::serde(format!("parse effect catalog JSON: {e}")))?;
        Self::new(file.effects)
    }

    /// Parse a catalog from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CardFxResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CardFxError::validation(format!("open effect catalog '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize the catalog in the same shape [`EffectRegistry::from_reader`] accepts.
    pub fn to_json_pretty(&self) -> CardFxResult<String> {
        serde_json::to_string_pretty(&CatalogFile {
            effects: self.effects.clone(),
        })
        .map_err(|e| CardFxError::serde(format!("serialize effect catalog: {e}")))
    }

    /// A registry restricted to `ids`, in this registry's order. Unknown ids are skipped.
    pub fn subset(&self, ids: &[&str]) -> Self {
        let effects: Vec<EffectSchema> = self
            .effects
            .iter()
            .filter(|e| ids.contains(&e.id.as_str()))
            .cloned()
            .collect();
        let index = effects
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();
        Self { effects, index }
    }

    /// Every effect in catalog order.
    pub fn list_effects(&self) -> &[EffectSchema] {
        &self.effects
    }

    /// Look up an effect by id. Absent effects are treated as off by callers.
    pub fn get_effect(&self, id: &str) -> Option<&EffectSchema> {
        self.index.get(id).map(|&i| &self.effects[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Catalog position, used as a stable paint-order key.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Values with every known effect at its schema defaults.
    pub fn default_values(&self) -> EffectValues {
        self.effects
            .iter()
            .map(|e| (e.id.clone(), e.defaults()))
            .collect()
    }
}

impl Default for EffectRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/registry/registry.rs"]
mod tests;
