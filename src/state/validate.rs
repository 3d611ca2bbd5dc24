//! Structural checks over [`EffectValues`] and the repair pass that restores them.
//!
//! Repair never fails. Effects whose values cannot be trusted are rebuilt from schema defaults
//! and the rebuild is logged as a recovered inconsistency.

use crate::registry::EffectRegistry;
use crate::registry::schema::{Coerced, EffectSchema, INTENSITY};
use crate::values::{EffectValues, ParamMap};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    UnknownEffect,
    MissingEffect,
    /// `intensity` absent, not a number, or not finite.
    InvalidIntensity,
    UnknownParameter { param: String },
    MissingParameter { param: String },
    /// Wrong dynamic type or not an allowed value.
    InvalidParameter { param: String, reason: String },
    OutOfRange { param: String },
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ValidationIssue {
    pub effect: String,
    #[serde(flatten)]
    pub kind: IssueKind,
}

impl ValidationIssue {
    /// Issues that invalidate the whole effect rather than a single key.
    fn forces_rebuild(&self) -> bool {
        matches!(
            self.kind,
            IssueKind::InvalidIntensity | IssueKind::InvalidParameter { .. }
        )
    }
}

/// What [`repair`] changed.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RepairReport {
    pub removed_effects: Vec<String>,
    pub added_effects: Vec<String>,
    pub rebuilt_effects: Vec<String>,
    pub dropped_params: Vec<(String, String)>,
    pub filled_params: Vec<(String, String)>,
    pub clamped_params: Vec<(String, String)>,
}

impl RepairReport {
    /// `true` when the input was already valid.
    pub fn is_clean(&self) -> bool {
        self.removed_effects.is_empty()
            && self.added_effects.is_empty()
            && self.rebuilt_effects.is_empty()
            && self.dropped_params.is_empty()
            && self.filled_params.is_empty()
            && self.clamped_params.is_empty()
    }
}

/// List every structural problem in `values`, in effect-id order.
pub fn validate(registry: &EffectRegistry, values: &EffectValues) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (effect, params) in values.iter() {
        match registry.get_effect(effect) {
            Some(schema) => check_effect(schema, params, &mut issues),
            None => issues.push(ValidationIssue {
                effect: effect.to_owned(),
                kind: IssueKind::UnknownEffect,
            }),
        }
    }
    for schema in registry.list_effects() {
        if values.effect(&schema.id).is_none() {
            issues.push(ValidationIssue {
                effect: schema.id.clone(),
                kind: IssueKind::MissingEffect,
            });
        }
    }
    issues
}

fn check_effect(schema: &EffectSchema, params: &ParamMap, issues: &mut Vec<ValidationIssue>) {
    let issue = |kind| ValidationIssue {
        effect: schema.id.clone(),
        kind,
    };

    match params.get(INTENSITY).and_then(|v| v.as_f64()) {
        Some(v) if v.is_finite() => {}
        _ => issues.push(issue(IssueKind::InvalidIntensity)),
    }

    for spec in &schema.parameters {
        let Some(value) = params.get(&spec.id) else {
            issues.push(issue(IssueKind::MissingParameter {
                param: spec.id.clone(),
            }));
            continue;
        };
        if spec.id == INTENSITY && value.as_f64().is_none_or(|v| !v.is_finite()) {
            // Already reported as InvalidIntensity.
            continue;
        }
        match spec.coerce(value) {
            Ok(Coerced::Exact(normalized)) if normalized == *value => {}
            // Color case differences are cosmetic.
            Ok(Coerced::Exact(_)) => {}
            Ok(Coerced::Clamped(_)) => issues.push(issue(IssueKind::OutOfRange {
                param: spec.id.clone(),
            })),
            Err(reason) => issues.push(issue(IssueKind::InvalidParameter {
                param: spec.id.clone(),
                reason,
            })),
        }
    }

    for key in params.keys() {
        if schema.param(key).is_none() {
            issues.push(issue(IssueKind::UnknownParameter { param: key.clone() }));
        }
    }
}

/// Restore `values` to a structurally valid, fully materialized state.
pub fn repair(registry: &EffectRegistry, values: &mut EffectValues) -> RepairReport {
    let mut report = RepairReport::default();
    let issues = validate(registry, values);
    if issues.is_empty() {
        return report;
    }

    let mut rebuild: Vec<String> = issues
        .iter()
        .filter(|i| i.forces_rebuild())
        .map(|i| i.effect.clone())
        .collect();
    rebuild.dedup();

    for effect in &rebuild {
        if let Some(schema) = registry.get_effect(effect) {
            tracing::warn!(
                effect = effect.as_str(),
                "recovered inconsistent effect state; rebuilding from schema defaults"
            );
            values.insert_effect(effect.clone(), schema.defaults());
            report.rebuilt_effects.push(effect.clone());
        }
    }

    for issue in issues {
        if rebuild.contains(&issue.effect) {
            continue;
        }
        let effect = issue.effect;
        match issue.kind {
            IssueKind::UnknownEffect => {
                tracing::warn!(effect = effect.as_str(), "dropping unknown effect");
                values.remove_effect(&effect);
                report.removed_effects.push(effect);
            }
            IssueKind::MissingEffect => {
                if let Some(schema) = registry.get_effect(&effect) {
                    values.insert_effect(effect.clone(), schema.defaults());
                    report.added_effects.push(effect);
                }
            }
            IssueKind::UnknownParameter { param } => {
                tracing::warn!(
                    effect = effect.as_str(),
                    param = param.as_str(),
                    "dropping unknown parameter"
                );
                if let Some(m) = values.effect_mut(&effect) {
                    m.remove(&param);
                }
                report.dropped_params.push((effect, param));
            }
            IssueKind::MissingParameter { param } => {
                let default = registry
                    .get_effect(&effect)
                    .and_then(|s| s.param(&param))
                    .map(|p| p.default.clone());
                if let (Some(default), Some(m)) = (default, values.effect_mut(&effect)) {
                    m.insert(param.clone(), default);
                    report.filled_params.push((effect, param));
                }
            }
            IssueKind::OutOfRange { param } => {
                let clamped = registry
                    .get_effect(&effect)
                    .and_then(|s| s.param(&param))
                    .zip(values.param(&effect, &param))
                    .and_then(|(spec, v)| spec.coerce(v).ok())
                    .map(Coerced::into_value);
                if let (Some(v), Some(m)) = (clamped, values.effect_mut(&effect)) {
                    m.insert(param.clone(), v);
                    report.clamped_params.push((effect, param));
                }
            }
            IssueKind::InvalidIntensity | IssueKind::InvalidParameter { .. } => {}
        }
    }

    tracing::debug!(?report, "repaired effect values");
    report
}

#[cfg(test)]
#[path = "../../tests/unit/state/validate.rs"]
mod tests;
