use std::collections::HashSet;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{CardFxError, CardFxResult};
use crate::registry::template::LayerTemplate;
use crate::values::{ParamMap, ParamValue};

/// Parameter id every effect must declare.
pub const INTENSITY: &str = "intensity";
/// Inclusive upper bound of `intensity`.
pub const MAX_INTENSITY: f64 = 100.0;

/// Broad family of a finish; drives grouping in UIs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectCategory {
    Metallic,
    Prismatic,
    Surface,
    Vintage,
    Other,
}

/// Control type of a parameter. Determines the accepted [`ParamValue`] variant.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    /// Number in `[min, max]`.
    Slider,
    /// Boolean.
    Toggle,
    /// `#rrggbb` / `#rrggbbaa` string.
    Color,
    /// One of `options`.
    Select,
}

/// Static description of one parameter.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParameterSpec {
    pub id: String,
    pub name: String,
    pub kind: ParameterKind,
    #[serde(default)]
    pub min: f64,
    #[serde(default)]
    pub max: f64,
    #[serde(default)]
    pub step: f64,
    pub default: ParamValue,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

/// Result of checking a candidate value against a [`ParameterSpec`].
#[derive(Clone, Debug, PartialEq)]
pub enum Coerced {
    /// Accepted as-is (colors are normalized to lowercase hex).
    Exact(ParamValue),
    /// Numeric value pulled into `[min, max]`.
    Clamped(ParamValue),
}

impl Coerced {
    pub fn into_value(self) -> ParamValue {
        match self {
            Self::Exact(v) | Self::Clamped(v) => v,
        }
    }
}

impl ParameterSpec {
    pub fn slider(
        id: impl Into<String>,
        name: impl Into<String>,
        min: f64,
        max: f64,
        step: f64,
        default: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ParameterKind::Slider,
            min,
            max,
            step,
            default: ParamValue::Number(default),
            options: Vec::new(),
        }
    }

    /// The `intensity` slider every effect carries, defaulting to off.
    pub fn intensity() -> Self {
        Self::slider(INTENSITY, "Intensity", 0.0, MAX_INTENSITY, 1.0, 0.0)
    }

    pub fn toggle(id: impl Into<String>, name: impl Into<String>, default: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ParameterKind::Toggle,
            min: 0.0,
            max: 1.0,
            step: 1.0,
            default: ParamValue::Bool(default),
            options: Vec::new(),
        }
    }

    pub fn color(id: impl Into<String>, name: impl Into<String>, default: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ParameterKind::Color,
            min: 0.0,
            max: 0.0,
            step: 0.0,
            default: ParamValue::Text(default.to_owned()),
            options: Vec::new(),
        }
    }

    pub fn select(
        id: impl Into<String>,
        name: impl Into<String>,
        options: &[&str],
        default: &str,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ParameterKind::Select,
            min: 0.0,
            max: 0.0,
            step: 0.0,
            default: ParamValue::Text(default.to_owned()),
            options: options.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    /// Check `value` against this spec.
    ///
    /// Numbers are clamped into `[min, max]`; every other mismatch is an `Err` carrying a
    /// human-readable reason.
    pub fn coerce(&self, value: &ParamValue) -> Result<Coerced, String> {
        match (self.kind, value) {
            (ParameterKind::Slider, ParamValue::Number(v)) => {
                if !v.is_finite() {
                    return Err(format!("'{}' must be finite", self.id));
                }
                let c = v.clamp(self.min, self.max);
                if c == *v {
                    Ok(Coerced::Exact(ParamValue::Number(c)))
                } else {
                    Ok(Coerced::Clamped(ParamValue::Number(c)))
                }
            }
            (ParameterKind::Toggle, ParamValue::Bool(_)) => Ok(Coerced::Exact(value.clone())),
            (ParameterKind::Color, ParamValue::Text(s)) => Rgba8::parse_hex(s)
                .map(|c| Coerced::Exact(ParamValue::Text(c.to_hex())))
                .map_err(|e| format!("'{}': {e}", self.id)),
            (ParameterKind::Select, ParamValue::Text(s)) => {
                if self.options.iter().any(|o| o == s) {
                    Ok(Coerced::Exact(value.clone()))
                } else {
                    Err(format!("'{}' has no option '{s}'", self.id))
                }
            }
            (kind, v) => Err(format!(
                "'{}' is a {kind:?} parameter, got a {}",
                self.id,
                v.type_name()
            )),
        }
    }

    fn validate(&self) -> CardFxResult<()> {
        if self.id.trim().is_empty() {
            return Err(CardFxError::validation("parameter id must be non-empty"));
        }
        if self.kind == ParameterKind::Slider
            && (!self.min.is_finite() || !self.max.is_finite() || self.min > self.max)
        {
            return Err(CardFxError::validation(format!(
                "slider '{}' must have finite min <= max",
                self.id
            )));
        }
        if self.kind == ParameterKind::Select && self.options.is_empty() {
            return Err(CardFxError::validation(format!(
                "select '{}' must list at least one option",
                self.id
            )));
        }
        match self.coerce(&self.default) {
            Ok(Coerced::Exact(_)) => Ok(()),
            Ok(Coerced::Clamped(_)) => Err(CardFxError::validation(format!(
                "default of '{}' lies outside [{}, {}]",
                self.id, self.min, self.max
            ))),
            Err(reason) => Err(CardFxError::validation(format!("invalid default: {reason}"))),
        }
    }
}

/// Static definition of one effect: identity, parameters, and layer template.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EffectSchema {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: EffectCategory,
    pub parameters: Vec<ParameterSpec>,
    #[serde(default)]
    pub template: LayerTemplate,
}

impl EffectSchema {
    /// Look up a parameter spec.
    pub fn param(&self, id: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.id == id)
    }

    /// Parameter map holding every schema default.
    pub fn defaults(&self) -> ParamMap {
        self.parameters
            .iter()
            .map(|p| (p.id.clone(), p.default.clone()))
            .collect()
    }

    /// Reader over `values` that falls back to schema defaults.
    pub fn reader<'a>(&'a self, values: Option<&'a ParamMap>) -> ParamReader<'a> {
        ParamReader {
            schema: self,
            values,
        }
    }

    pub(crate) fn validate(&self) -> CardFxResult<()> {
        if self.id.trim().is_empty() {
            return Err(CardFxError::validation("effect id must be non-empty"));
        }

        let mut seen = HashSet::new();
        for p in &self.parameters {
            if !seen.insert(p.id.as_str()) {
                return Err(CardFxError::validation(format!(
                    "effect '{}' declares parameter '{}' twice",
                    self.id, p.id
                )));
            }
            p.validate()
                .map_err(|e| CardFxError::validation(format!("effect '{}': {e}", self.id)))?;
        }

        match self.param(INTENSITY) {
            Some(p) if p.kind == ParameterKind::Slider && p.min == 0.0 && p.max == MAX_INTENSITY => {}
            _ => {
                return Err(CardFxError::validation(format!(
                    "effect '{}' must declare an '{INTENSITY}' slider over [0, {MAX_INTENSITY}]",
                    self.id
                )));
            }
        }

        self.template.check(self).map_err(|reason| {
            CardFxError::validation(format!("effect '{}' template: {reason}", self.id))
        })
    }
}

/// Typed, default-tolerant view of one effect's parameters.
#[derive(Clone, Copy, Debug)]
pub struct ParamReader<'a> {
    schema: &'a EffectSchema,
    values: Option<&'a ParamMap>,
}

impl<'a> ParamReader<'a> {
    pub fn schema(&self) -> &'a EffectSchema {
        self.schema
    }

    fn lookup(&self, id: &str) -> (Option<&'a ParamValue>, Option<&'a ParamValue>) {
        let stored = self.values.and_then(|m| m.get(id));
        let default = self.schema.param(id).map(|p| &p.default);
        (stored, default)
    }

    /// Numeric parameter; stored value, else schema default, else `0`.
    pub fn number(&self, id: &str) -> f64 {
        let (stored, default) = self.lookup(id);
        stored
            .and_then(ParamValue::as_f64)
            .filter(|v| v.is_finite())
            .or_else(|| default.and_then(ParamValue::as_f64))
            .unwrap_or(0.0)
    }

    /// Toggle parameter; stored value, else schema default, else `false`.
    pub fn flag(&self, id: &str) -> bool {
        let (stored, default) = self.lookup(id);
        stored
            .and_then(ParamValue::as_bool)
            .or_else(|| default.and_then(ParamValue::as_bool))
            .unwrap_or(false)
    }

    /// String parameter; stored value, else schema default, else `""`.
    pub fn text(&self, id: &str) -> &'a str {
        let (stored, default) = self.lookup(id);
        stored
            .and_then(ParamValue::as_str)
            .or_else(|| default.and_then(ParamValue::as_str))
            .unwrap_or("")
    }

    /// `intensity` clamped to `[0, 100]`.
    pub fn intensity(&self) -> f64 {
        self.number(INTENSITY).clamp(0.0, MAX_INTENSITY)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/registry/schema.rs"]
mod tests;
