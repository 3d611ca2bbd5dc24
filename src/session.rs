//! Editing session: the single owner of mutable effect state.
//!
//! All mutation goes through `&mut EffectSession`, which is what keeps preset writes, manual
//! edits and resets from interleaving. Hosts that share a session across threads wrap it in a
//! mutex.

use std::sync::Arc;

use crate::card::{Card, CardFrame};
use crate::compositor::{Compositor, Dominant};
use crate::config::EngineConfig;
use crate::lighting::{LightingDescriptor, PointerState, PointerTracker};
use crate::preset::{EditOutcome, Preset, PresetApplicationState, PresetController, SequenceId};
use crate::registry::EffectRegistry;
use crate::state::{EffectStateStore, RepairReport};
use crate::style::StyleDescriptor;
use crate::values::{EffectValues, ParamChange, ParamValue};

#[derive(Clone, Debug)]
pub struct EffectSession {
    store: EffectStateStore,
    presets: PresetController,
    pointer: PointerTracker,
    compositor: Compositor,
    lighting_enabled: bool,
}

impl EffectSession {
    /// Session over `registry` with default configuration.
    pub fn new(registry: Arc<EffectRegistry>) -> Self {
        Self::with_config(registry, &EngineConfig::default())
    }

    pub fn with_config(registry: Arc<EffectRegistry>, config: &EngineConfig) -> Self {
        Self {
            store: EffectStateStore::new(Arc::clone(&registry)),
            presets: PresetController::new(),
            pointer: PointerTracker::new(),
            compositor: Compositor::new(registry, config.compositor.clone()),
            lighting_enabled: config.lighting_enabled,
        }
    }

    /// Replace the controller's clock, for reproducible `applied_at` stamps.
    pub fn with_clock(mut self, clock: fn() -> u64) -> Self {
        self.presets = PresetController::with_clock(clock);
        self
    }

    pub fn registry(&self) -> &Arc<EffectRegistry> {
        self.store.registry()
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn compositor_mut(&mut self) -> &mut Compositor {
        &mut self.compositor
    }

    /// A user edit. Deferred while a preset is being applied.
    pub fn set_parameter(
        &mut self,
        effect: &str,
        param: &str,
        value: impl Into<ParamValue>,
    ) -> EditOutcome {
        self.presets
            .manual_write(&mut self.store, effect, param, value.into())
    }

    /// Restore one effect to its defaults, as a manual edit of each of its parameters.
    pub fn reset_effect(&mut self, effect: &str) -> bool {
        let Some(defaults) = self.registry().get_effect(effect).map(|s| s.defaults()) else {
            tracing::warn!(effect, "ignoring reset of unknown effect");
            return false;
        };
        if self.presets.is_applying() {
            for (param, value) in defaults {
                self.presets
                    .manual_write(&mut self.store, effect, &param, value);
            }
        } else {
            self.store.reset_effect(effect);
            self.presets.diverge();
        }
        true
    }

    /// Every effect back to defaults and the preset protocol back to idle. Also cancels any
    /// in-flight application.
    pub fn reset_all(&mut self) {
        self.store.reset_all();
        self.presets.reset();
        let report = self.store.ensure_valid();
        if !report.is_clean() {
            tracing::warn!(?report, "repaired state after reset");
        }
    }

    pub fn apply_preset(&mut self, preset: &Preset) -> SequenceId {
        self.presets
            .apply(&mut self.store, Some(&preset.id), &preset.values)
    }

    /// Apply anonymous values with preset semantics.
    pub fn apply_values(&mut self, preset_id: Option<&str>, values: &EffectValues) -> SequenceId {
        self.presets.apply(&mut self.store, preset_id, values)
    }

    pub fn begin_preset(&mut self, preset: &Preset) -> SequenceId {
        self.presets
            .begin(&mut self.store, Some(&preset.id), &preset.values)
    }

    pub fn pump_preset(&mut self, sequence: SequenceId, max_writes: usize) -> usize {
        self.presets.pump(&mut self.store, sequence, max_writes)
    }

    pub fn finish_preset(&mut self, sequence: SequenceId) -> bool {
        self.presets.finish(&mut self.store, sequence)
    }

    pub fn preset_state(&self) -> PresetApplicationState {
        self.presets.state()
    }

    /// Parameters where the current state differs from `preset` applied on defaults.
    pub fn diverged_params(&self, preset: &Preset) -> Vec<ParamChange> {
        preset
            .resolved(self.registry())
            .diff(self.store.values())
    }

    /// Replace the state with a card's stored values, repairing them as needed.
    ///
    /// Cancels any in-flight preset; the loaded values belong to no preset.
    pub fn load_card_values(&mut self, values: EffectValues) -> RepairReport {
        self.presets.reset();
        let report = self.store.load(values);
        if !report.is_clean() {
            tracing::warn!(?report, "repaired card effect values");
        }
        report
    }

    /// Offer a pointer sample; stale samples are dropped.
    pub fn update_pointer(&mut self, index: u64, pointer: PointerState) -> bool {
        self.pointer.update(index, pointer)
    }

    pub fn pointer_left(&mut self, index: u64) -> bool {
        self.pointer.leave(index)
    }

    pub fn set_lighting_enabled(&mut self, enabled: bool) {
        self.lighting_enabled = enabled;
    }

    pub fn lighting_enabled(&self) -> bool {
        self.lighting_enabled
    }

    pub fn lighting(&self) -> Option<LightingDescriptor> {
        self.pointer.lighting(self.lighting_enabled)
    }

    pub fn dominant(&self) -> Option<Dominant> {
        self.compositor.dominant(self.store.values())
    }

    /// Current layers for the latest state and pointer sample.
    pub fn layers(&self) -> Vec<StyleDescriptor> {
        self.compositor
            .compose(self.store.values(), self.lighting().as_ref())
    }

    pub fn frame(&self, card: &Card) -> CardFrame {
        CardFrame::new(card, self.layers())
    }

    pub fn values(&self) -> &EffectValues {
        self.store.values()
    }

    pub fn snapshot(&self) -> EffectValues {
        self.store.snapshot()
    }

    pub fn intensity(&self, effect: &str) -> f64 {
        self.store.intensity(effect)
    }

    pub fn value(&self, effect: &str, param: &str) -> Option<ParamValue> {
        self.store.value(effect, param)
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
