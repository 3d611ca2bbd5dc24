use std::sync::Arc;

use crate::registry::EffectRegistry;
use crate::registry::schema::Coerced;
use crate::state::validate::{RepairReport, repair};
use crate::values::{EffectValues, ParamValue};

/// Why a write was refused.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum WriteRejection {
    UnknownEffect,
    UnknownParameter,
    InvalidValue { detail: String },
}

/// Result of [`EffectStateStore::write`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum WriteOutcome {
    Applied,
    /// Stored after clamping into the parameter's range.
    Clamped,
    /// The stored value already matched.
    Unchanged,
    Rejected(WriteRejection),
}

impl WriteOutcome {
    /// `true` when the stored value changed.
    pub fn changed(&self) -> bool {
        matches!(self, Self::Applied | Self::Clamped)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Current parameter values for every registered effect.
///
/// The store is always fully materialized: every registered effect has every declared parameter.
/// Writes are checked against the schema and invalid ones leave the state untouched.
#[derive(Clone, Debug)]
pub struct EffectStateStore {
    registry: Arc<EffectRegistry>,
    values: EffectValues,
}

impl EffectStateStore {
    /// Store with every effect at its schema defaults.
    pub fn new(registry: Arc<EffectRegistry>) -> Self {
        let values = registry.default_values();
        Self { registry, values }
    }

    pub fn registry(&self) -> &Arc<EffectRegistry> {
        &self.registry
    }

    /// Set one parameter.
    ///
    /// Numbers outside the declared range are clamped. Unknown ids and type mismatches are
    /// logged and rejected without touching the state.
    pub fn write(&mut self, effect: &str, param: &str, value: ParamValue) -> WriteOutcome {
        let Some(schema) = self.registry.get_effect(effect) else {
            tracing::warn!(effect, param, "ignoring write to unknown effect");
            return WriteOutcome::Rejected(WriteRejection::UnknownEffect);
        };
        let Some(spec) = schema.param(param) else {
            tracing::warn!(effect, param, "ignoring write to unknown parameter");
            return WriteOutcome::Rejected(WriteRejection::UnknownParameter);
        };

        let (value, clamped) = match spec.coerce(&value) {
            Ok(Coerced::Exact(v)) => (v, false),
            Ok(Coerced::Clamped(v)) => {
                tracing::debug!(effect, param, ?value, stored = ?v, "clamped parameter write");
                (v, true)
            }
            Err(detail) => {
                tracing::warn!(effect, param, %detail, "ignoring invalid parameter write");
                return WriteOutcome::Rejected(WriteRejection::InvalidValue { detail });
            }
        };

        if self.values.param(effect, param) == Some(&value) {
            return WriteOutcome::Unchanged;
        }
        self.values.insert_param(effect, param, value);
        if clamped {
            WriteOutcome::Clamped
        } else {
            WriteOutcome::Applied
        }
    }

    /// Restore one effect to schema defaults. Returns `false` for unknown effects.
    pub fn reset_effect(&mut self, effect: &str) -> bool {
        match self.registry.get_effect(effect) {
            Some(schema) => {
                self.values.insert_effect(effect, schema.defaults());
                true
            }
            None => {
                tracing::warn!(effect, "ignoring reset of unknown effect");
                false
            }
        }
    }

    /// Restore every effect to schema defaults.
    pub fn reset_all(&mut self) {
        self.values = self.registry.default_values();
    }

    /// Replace the whole state, repairing anything the registry does not accept.
    pub fn load(&mut self, mut values: EffectValues) -> RepairReport {
        let report = repair(&self.registry, &mut values);
        self.values = values;
        report
    }

    /// Run the repair pass over the current state.
    pub fn ensure_valid(&mut self) -> RepairReport {
        repair(&self.registry, &mut self.values)
    }

    pub fn values(&self) -> &EffectValues {
        &self.values
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> EffectValues {
        self.values.clone()
    }

    /// Intensity of an effect in `[0, 100]`; `0` for unknown effects.
    pub fn intensity(&self, effect: &str) -> f64 {
        self.registry
            .get_effect(effect)
            .map(|s| s.reader(self.values.effect(effect)).intensity())
            .unwrap_or(0.0)
    }

    /// Stored value, falling back to the schema default.
    pub fn value(&self, effect: &str, param: &str) -> Option<ParamValue> {
        self.values.param(effect, param).cloned().or_else(|| {
            self.registry
                .get_effect(effect)?
                .param(param)
                .map(|p| p.default.clone())
        })
    }

    /// Ids of effects with non-zero intensity, in registry order.
    pub fn active_effects(&self) -> Vec<&str> {
        self.registry
            .list_effects()
            .iter()
            .filter(|s| self.intensity(&s.id) > 0.0)
            .map(|s| s.id.as_str())
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/store.rs"]
mod tests;
