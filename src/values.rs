//! Plain-data parameter values.
//!
//! [`EffectValues`] is the serializable state the store owns and the compositor reads. It uses
//! ordered maps so equality, diffing, and JSON output are deterministic.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{CardFxError, CardFxResult};

/// One parameter value.
///
/// Serialized untagged so the JSON form is a bare `true`, `42.5`, or `"#ffd700"`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Toggle value.
    Bool(bool),
    /// Slider value.
    Number(f64),
    /// Color (`#rrggbb`) or select option.
    Text(String),
}

impl ParamValue {
    /// Numeric payload, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Number(v) => Some(v),
            _ => None,
        }
    }

    /// Boolean payload, if this is a toggle value.
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Self::Bool(v) => Some(v),
            _ => None,
        }
    }

    /// String payload, if this is a color or select value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Short name of the dynamic type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::Text(_) => "string",
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Parameter id -> value for a single effect.
pub type ParamMap = BTreeMap<String, ParamValue>;

/// Effect id -> parameter map.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct EffectValues(BTreeMap<String, ParamMap>);

/// One differing parameter between two [`EffectValues`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ParamChange {
    /// Effect id.
    pub effect: String,
    /// Parameter id.
    pub param: String,
    /// Value on the left-hand side, if present.
    pub before: Option<ParamValue>,
    /// Value on the right-hand side, if present.
    pub after: Option<ParamValue>,
}

impl EffectValues {
    /// Empty value set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse values from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> CardFxResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| CardFxError::serde(format!("parse effect values JSON: {e}")))
    }

    /// Parse values from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CardFxResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CardFxError::validation(format!("open effect values '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Builder-style insert, handy for presets and tests.
    pub fn with(
        mut self,
        effect: impl Into<String>,
        param: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Self {
        self.insert_param(effect, param, value);
        self
    }

    /// Parameter map of one effect.
    pub fn effect(&self, effect: &str) -> Option<&ParamMap> {
        self.0.get(effect)
    }

    pub(crate) fn effect_mut(&mut self, effect: &str) -> Option<&mut ParamMap> {
        self.0.get_mut(effect)
    }

    /// Single parameter value.
    pub fn param(&self, effect: &str, param: &str) -> Option<&ParamValue> {
        self.0.get(effect)?.get(param)
    }

    /// Numeric `intensity` of an effect, if present and numeric.
    pub fn intensity(&self, effect: &str) -> Option<f64> {
        self.param(effect, "intensity")?.as_f64()
    }

    /// Insert or overwrite a single parameter.
    pub fn insert_param(
        &mut self,
        effect: impl Into<String>,
        param: impl Into<String>,
        value: impl Into<ParamValue>,
    ) {
        self.0
            .entry(effect.into())
            .or_default()
            .insert(param.into(), value.into());
    }

    /// Insert or replace an entire effect.
    pub fn insert_effect(&mut self, effect: impl Into<String>, params: ParamMap) {
        self.0.insert(effect.into(), params);
    }

    /// Remove an effect, returning its parameters.
    pub fn remove_effect(&mut self, effect: &str) -> Option<ParamMap> {
        self.0.remove(effect)
    }

    /// Iterate effects in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamMap)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate `(effect, param, value)` triples in id order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &ParamValue)> {
        self.0.iter().flat_map(|(effect, params)| {
            params
                .iter()
                .map(move |(param, value)| (effect.as_str(), param.as_str(), value))
        })
    }

    /// Number of effects present.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when no effect is present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parameters that differ between `self` (before) and `other` (after).
    pub fn diff(&self, other: &Self) -> Vec<ParamChange> {
        let mut out = Vec::new();
        let mut keys: Vec<(&str, &str)> = self
            .entries()
            .chain(other.entries())
            .map(|(e, p, _)| (e, p))
            .collect();
        keys.sort_unstable();
        keys.dedup();

        for (effect, param) in keys {
            let before = self.param(effect, param);
            let after = other.param(effect, param);
            if before != after {
                out.push(ParamChange {
                    effect: effect.to_owned(),
                    param: param.to_owned(),
                    before: before.cloned(),
                    after: after.cloned(),
                });
            }
        }
        out
    }
}

impl FromIterator<(String, ParamMap)> for EffectValues {
    fn from_iter<T: IntoIterator<Item = (String, ParamMap)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
#[path = "../tests/unit/values.rs"]
mod tests;
