use super::*;
use serde_json::json;

#[test]
fn param_values_serialize_untagged() {
    let v = EffectValues::new()
        .with("gold", "intensity", 80.0)
        .with("gold", "goldTone", "rose")
        .with("crystal", "sparkle", true);
    let j = serde_json::to_value(&v).unwrap();
    assert_eq!(
        j,
        json!({
            "crystal": { "sparkle": true },
            "gold": { "goldTone": "rose", "intensity": 80.0 }
        })
    );

    let back: EffectValues = serde_json::from_value(j).unwrap();
    assert_eq!(back, v);
}

#[test]
fn intensity_requires_a_number() {
    let v = EffectValues::new()
        .with("gold", "intensity", 40)
        .with("chrome", "intensity", "loud");
    assert_eq!(v.intensity("gold"), Some(40.0));
    assert_eq!(v.intensity("chrome"), None);
    assert_eq!(v.intensity("missing"), None);
}

#[test]
fn diff_reports_added_removed_and_changed() {
    let a = EffectValues::new()
        .with("gold", "intensity", 10.0)
        .with("gold", "shimmer", 50.0);
    let b = EffectValues::new()
        .with("gold", "intensity", 20.0)
        .with("chrome", "intensity", 5.0);

    let changes = a.diff(&b);
    let keys: Vec<(&str, &str)> = changes
        .iter()
        .map(|c| (c.effect.as_str(), c.param.as_str()))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("chrome", "intensity"),
            ("gold", "intensity"),
            ("gold", "shimmer")
        ]
    );
    assert_eq!(changes[0].before, None);
    assert_eq!(changes[2].after, None);
    assert!(a.diff(&a).is_empty());
}
