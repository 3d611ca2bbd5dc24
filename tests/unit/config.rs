use super::*;

#[test]
fn empty_object_gives_defaults() {
    let cfg = EngineConfig::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(cfg, EngineConfig::default());
    assert!(cfg.lighting_enabled);
    assert_eq!(cfg.compositor.frame_width, 0.2);
    assert_eq!(cfg.compositor.max_decorations, 64);
}

#[test]
fn partial_compositor_section_keeps_other_defaults() {
    let cfg = EngineConfig::from_reader(
        r#"{ "lighting_enabled": false, "compositor": { "apply_to_frame": true, "seed": 9 } }"#
            .as_bytes(),
    )
    .unwrap();
    assert!(!cfg.lighting_enabled);
    assert!(cfg.compositor.apply_to_frame);
    assert_eq!(cfg.compositor.seed, 9);
    assert_eq!(cfg.compositor.dominant_candidates.len(), 4);
}

#[test]
fn out_of_range_frame_width_is_rejected() {
    let err = EngineConfig::from_reader(r#"{ "compositor": { "frame_width": 0.9 } }"#.as_bytes())
        .unwrap_err();
    assert!(err.to_string().contains("frame_width"));
}

#[test]
fn builtin_sources_when_paths_absent() {
    let cfg = EngineConfig::default();
    let registry = cfg.load_registry().unwrap();
    assert_eq!(registry.len(), EffectRegistry::builtin().len());
    assert_eq!(cfg.load_presets(&registry).unwrap().len(), 6);
}

#[test]
fn builtin_presets_dropped_for_foreign_catalog() {
    let registry = EffectRegistry::builtin().subset(&["vintage"]);
    let lib = EngineConfig::default().load_presets(&registry).unwrap();
    assert!(lib.is_empty());
}

#[test]
fn missing_catalog_file_is_reported() {
    let cfg = EngineConfig {
        catalog: Some(PathBuf::from("does/not/exist.json")),
        ..EngineConfig::default()
    };
    assert!(cfg.load_registry().is_err());
}
