use super::*;
use crate::registry::schema::{EffectCategory, ParameterKind, ParameterSpec};

#[test]
fn builtin_catalog_validates() {
    let builtin = EffectRegistry::builtin();
    let rebuilt = EffectRegistry::new(builtin.list_effects().to_vec()).unwrap();
    assert_eq!(rebuilt.len(), builtin.len());
    assert!(builtin.len() >= 10);
}

#[test]
fn builtin_has_the_dominant_candidates() {
    let r = EffectRegistry::builtin();
    for id in ["gold", "chrome", "crystal", "holographic"] {
        let e = r.get_effect(id).unwrap();
        assert!(e.template.lighting_tint.is_some(), "{id} needs a tint");
    }
    assert_eq!(r.get_effect("gold").unwrap().category, EffectCategory::Metallic);
}

#[test]
fn missing_effect_is_none() {
    let r = EffectRegistry::builtin();
    assert!(r.get_effect("plaid").is_none());
    assert!(!r.contains("plaid"));
}

#[test]
fn every_effect_starts_off() {
    let r = EffectRegistry::builtin();
    let v = r.default_values();
    assert_eq!(v.len(), r.len());
    for e in r.list_effects() {
        assert_eq!(v.intensity(&e.id), Some(0.0), "{}", e.id);
    }
}

#[test]
fn duplicate_ids_are_rejected() {
    let r = EffectRegistry::builtin();
    let gold = r.get_effect("gold").unwrap().clone();
    let err = EffectRegistry::new(vec![gold.clone(), gold]).unwrap_err();
    assert!(err.to_string().contains("registered twice"));
}

#[test]
fn effect_without_intensity_is_rejected() {
    let mut gold = EffectRegistry::builtin().get_effect("gold").unwrap().clone();
    gold.parameters.retain(|p| p.id != "intensity");
    assert!(EffectRegistry::new(vec![gold]).is_err());
}

#[test]
fn template_referencing_unknown_param_is_rejected() {
    let mut waves = EffectRegistry::builtin()
        .get_effect("waves")
        .unwrap()
        .clone();
    waves.parameters.retain(|p| p.id != "waveColor");
    let err = EffectRegistry::new(vec![waves]).unwrap_err();
    assert!(err.to_string().contains("waveColor"));
}

#[test]
fn template_kind_mismatch_is_rejected() {
    let mut waves = EffectRegistry::builtin()
        .get_effect("waves")
        .unwrap()
        .clone();
    for p in &mut waves.parameters {
        if p.id == "waveColor" {
            *p = ParameterSpec::slider("waveColor", "Wave Color", 0.0, 1.0, 0.1, 0.5);
        }
    }
    assert_eq!(
        waves.param("waveColor").unwrap().kind,
        ParameterKind::Slider
    );
    assert!(EffectRegistry::new(vec![waves]).is_err());
}

#[test]
fn json_catalog_roundtrips() {
    let r = EffectRegistry::builtin();
    let json = r.to_json_pretty().unwrap();
    let back = EffectRegistry::from_reader(json.as_bytes()).unwrap();
    assert_eq!(back.len(), r.len());
    for (a, b) in back.list_effects().iter().zip(r.list_effects()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.parameters.len(), b.parameters.len());
        assert_eq!(a.template.decorations.len(), b.template.decorations.len());
        assert_eq!(a.template.wash.is_some(), b.template.wash.is_some());
    }
}

#[test]
fn subset_keeps_catalog_order() {
    let r = EffectRegistry::builtin().subset(&["crystal", "gold", "nope"]);
    let ids: Vec<&str> = r.list_effects().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["gold", "crystal"]);
    assert_eq!(r.position("crystal"), Some(1));
}
