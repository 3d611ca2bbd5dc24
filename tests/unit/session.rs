use super::*;
use crate::preset::PresetLibrary;
use crate::state::WriteOutcome;

fn session() -> EffectSession {
    EffectSession::new(Arc::new(EffectRegistry::builtin())).with_clock(|| 42)
}

fn chrome_mirror() -> Preset {
    PresetLibrary::builtin()
        .get("chrome_mirror")
        .cloned()
        .unwrap()
}

#[test]
fn manual_edit_after_preset_clears_current_preset() {
    let mut s = session();
    s.apply_preset(&chrome_mirror());
    let state = s.preset_state();
    assert_eq!(state.current_preset_id.as_deref(), Some("chrome_mirror"));
    assert_eq!(state.applied_at, Some(42));

    assert_eq!(
        s.set_parameter("chrome", "sharpness", 10.0),
        EditOutcome::Written(WriteOutcome::Applied)
    );
    let after = s.preset_state();
    assert_eq!(after.current_preset_id, None);
    assert_ne!(after.sequence_id, state.sequence_id);
}

#[test]
fn reset_effect_counts_as_manual_edit() {
    let mut s = session();
    s.apply_preset(&chrome_mirror());
    assert!(s.reset_effect("chrome"));
    assert_eq!(s.intensity("chrome"), 0.0);
    assert_eq!(s.preset_state().current_preset_id, None);
    assert!(!s.reset_effect("plaid"));
}

#[test]
fn reset_effect_during_preset_is_deferred() {
    let mut s = session();
    let seq = s.begin_preset(&chrome_mirror());
    assert!(s.reset_effect("chrome"));
    assert!(s.finish_preset(seq));
    assert_eq!(s.intensity("chrome"), 0.0);
}

#[test]
fn reset_all_cancels_in_flight_preset() {
    let mut s = session();
    let seq = s.begin_preset(&chrome_mirror());
    s.pump_preset(seq, 1);
    s.reset_all();

    let state = s.preset_state();
    assert!(!state.is_applying);
    assert!(!state.is_locked);
    assert_eq!(state.current_preset_id, None);
    assert!(!s.finish_preset(seq));
    assert_eq!(s.snapshot(), s.registry().default_values());

    let once = s.snapshot();
    s.reset_all();
    assert_eq!(s.snapshot(), once);
}

#[test]
fn diverged_params_lists_manual_changes() {
    let mut s = session();
    let preset = chrome_mirror();
    s.apply_preset(&preset);
    assert!(s.diverged_params(&preset).is_empty());

    s.set_parameter("chrome", "sharpness", 10.0);
    let changes = s.diverged_params(&preset);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].param, "sharpness");
    assert_eq!(changes[0].after, Some(ParamValue::Number(10.0)));
}

#[test]
fn load_card_values_repairs_and_forgets_preset() {
    let mut s = session();
    s.apply_preset(&chrome_mirror());
    let report = s.load_card_values(EffectValues::new().with("gold", "intensity", "lots"));
    assert_eq!(report.rebuilt_effects, vec!["gold".to_owned()]);
    assert_eq!(s.intensity("gold"), 0.0);
    assert_eq!(s.intensity("chrome"), 0.0);
    assert_eq!(s.preset_state().current_preset_id, None);
}

#[test]
fn lighting_follows_pointer_and_toggle() {
    let mut s = session();
    assert!(s.lighting().is_none());

    assert!(s.update_pointer(1, PointerState::new(1.0, 1.0, true)));
    let l = s.lighting().unwrap();
    assert!((l.light_intensity - 0.4).abs() < 1e-12);

    s.set_lighting_enabled(false);
    assert!(s.lighting().is_none());
    s.set_lighting_enabled(true);

    assert!(s.pointer_left(2));
    assert!(s.lighting().is_none());
}

#[test]
fn layers_and_frame_stack_around_the_card() {
    let mut s = session();
    assert!(s.layers().is_empty());

    s.set_parameter("gold", "intensity", 80.0);
    s.set_parameter("chrome", "intensity", 40.0);
    s.update_pointer(1, PointerState::centered(true));
    assert_eq!(s.dominant().unwrap().effect, "gold");

    let card = Card {
        image_url: "cards/dragon.png".to_owned(),
        title: "Dragon".to_owned(),
        description: String::new(),
        rarity: crate::card::Rarity::Legendary,
    };
    let frame = s.frame(&card);
    assert_eq!(frame.effects, s.layers());
    assert!(frame.effects.iter().all(|l| l.z_index > frame.image.z_index));
    assert!(frame.effects.iter().all(|l| l.z_index < frame.overlay.z_index));
    assert_eq!(frame.overlay.badge_label, "Legendary");
}
