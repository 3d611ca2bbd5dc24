use super::*;
use crate::values::ParamValue;

fn registry() -> EffectRegistry {
    EffectRegistry::builtin().subset(&["gold", "chrome"])
}

#[test]
fn defaults_are_clean() {
    let r = registry();
    let mut v = r.default_values();
    assert!(validate(&r, &v).is_empty());
    assert!(repair(&r, &mut v).is_clean());
}

#[test]
fn reports_each_kind_of_issue() {
    let r = registry();
    let mut v = r.default_values();
    v.remove_effect("chrome");
    v.insert_param("gold", "shimmer", 500.0);
    v.insert_param("gold", "extra", true);
    v.insert_param("plaid", "intensity", 1.0);

    let issues = validate(&r, &v);
    let kinds: Vec<(&str, &IssueKind)> = issues.iter().map(|i| (i.effect.as_str(), &i.kind)).collect();
    assert!(kinds.contains(&("plaid", &IssueKind::UnknownEffect)));
    assert!(kinds.contains(&("chrome", &IssueKind::MissingEffect)));
    assert!(kinds.contains(&(
        "gold",
        &IssueKind::OutOfRange {
            param: "shimmer".to_owned()
        }
    )));
    assert!(kinds.contains(&(
        "gold",
        &IssueKind::UnknownParameter {
            param: "extra".to_owned()
        }
    )));
}

#[test]
fn non_numeric_intensity_rebuilds_the_effect() {
    let r = registry();
    let mut v = r.default_values();
    v.insert_param("gold", "intensity", "high");
    v.insert_param("gold", "shimmer", 90.0);

    let issues = validate(&r, &v);
    assert!(
        issues
            .iter()
            .any(|i| i.effect == "gold" && i.kind == IssueKind::InvalidIntensity)
    );

    let report = repair(&r, &mut v);
    assert_eq!(report.rebuilt_effects, vec!["gold".to_owned()]);
    assert_eq!(v.effect("gold"), Some(&r.get_effect("gold").unwrap().defaults()));
    assert!(validate(&r, &v).is_empty());
}

#[test]
fn wrong_typed_parameter_rebuilds_the_effect() {
    let r = registry();
    let mut v = r.default_values();
    v.insert_param("chrome", "intensity", 70.0);
    v.insert_param("chrome", "tint", 12.0);

    let report = repair(&r, &mut v);
    assert_eq!(report.rebuilt_effects, vec!["chrome".to_owned()]);
    assert_eq!(v.intensity("chrome"), Some(0.0));
}

#[test]
fn repair_fills_clamps_and_drops() {
    let r = registry();
    let mut v = EffectValues::new()
        .with("gold", "intensity", 120.0)
        .with("gold", "bogus", 1.0);

    let report = repair(&r, &mut v);
    assert_eq!(report.added_effects, vec!["chrome".to_owned()]);
    assert_eq!(
        report.clamped_params,
        vec![("gold".to_owned(), "intensity".to_owned())]
    );
    assert!(report.filled_params.contains(&("gold".to_owned(), "shimmer".to_owned())));
    assert_eq!(v.intensity("gold"), Some(100.0));
    assert_eq!(v.param("gold", "bogus"), None);
    assert_eq!(v.param("gold", "goldTone"), Some(&ParamValue::Text("rich".into())));
    assert!(validate(&r, &v).is_empty());
}

#[test]
fn issues_serialize_flat() {
    let issue = ValidationIssue {
        effect: "gold".to_owned(),
        kind: IssueKind::MissingParameter {
            param: "shimmer".to_owned(),
        },
    };
    let json = serde_json::to_value(&issue).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "effect": "gold", "kind": "missing_parameter", "param": "shimmer" })
    );
}
