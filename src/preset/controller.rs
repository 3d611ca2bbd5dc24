use std::collections::VecDeque;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::state::store::{EffectStateStore, WriteOutcome};
use crate::values::{EffectValues, ParamValue};

/// Monotonic stamp identifying one preset application or manual edit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SequenceId(u64);

impl SequenceId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SequenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seq-{}", self.0)
    }
}

/// One queued `(effect, param, value)` write.
#[derive(Clone, Debug, PartialEq)]
pub struct ParamWrite {
    pub effect: String,
    pub param: String,
    pub value: ParamValue,
}

impl ParamWrite {
    pub fn new(effect: impl Into<String>, param: impl Into<String>, value: ParamValue) -> Self {
        Self {
            effect: effect.into(),
            param: param.into(),
            value,
        }
    }
}

/// Where the controller is in the apply protocol.
#[derive(Clone, Debug, PartialEq)]
pub enum PresetPhase {
    Idle,
    Applying {
        sequence: SequenceId,
        preset_id: Option<String>,
        pending: VecDeque<ParamWrite>,
    },
}

/// Read-only view of the controller for UIs.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PresetApplicationState {
    pub is_applying: bool,
    pub is_locked: bool,
    /// Milliseconds since the UNIX epoch of the last completed application.
    pub applied_at: Option<u64>,
    pub sequence_id: String,
    pub current_preset_id: Option<String>,
}

/// Result of a manual edit routed through the controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    Written(WriteOutcome),
    /// Queued behind the in-flight preset; replayed when it finishes.
    Deferred,
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

/// Sequencing for bulk preset writes against manual edits.
///
/// A preset is applied as `begin`, any number of `pump` calls, then `finish`. Starting a new
/// preset supersedes the one in flight; the old sequence's `pump` and `finish` become no-ops.
/// Manual edits arriving mid-application are deferred and replayed after `finish`.
#[derive(Clone, Debug)]
pub struct PresetController {
    phase: PresetPhase,
    sequence: SequenceId,
    current_preset_id: Option<String>,
    applied_at: Option<u64>,
    deferred: VecDeque<ParamWrite>,
    clock: fn() -> u64,
}

impl Default for PresetController {
    fn default() -> Self {
        Self::new()
    }
}

impl PresetController {
    pub fn new() -> Self {
        Self::with_clock(unix_millis)
    }

    /// Controller with a custom millisecond clock for `applied_at`.
    pub fn with_clock(clock: fn() -> u64) -> Self {
        Self {
            phase: PresetPhase::Idle,
            sequence: SequenceId(0),
            current_preset_id: None,
            applied_at: None,
            deferred: VecDeque::new(),
            clock,
        }
    }

    fn stamp(&mut self) -> SequenceId {
        self.sequence = SequenceId(self.sequence.0 + 1);
        self.sequence
    }

    pub fn phase(&self) -> &PresetPhase {
        &self.phase
    }

    pub fn sequence(&self) -> SequenceId {
        self.sequence
    }

    pub fn is_applying(&self) -> bool {
        matches!(self.phase, PresetPhase::Applying { .. })
    }

    pub fn current_preset_id(&self) -> Option<&str> {
        self.current_preset_id.as_deref()
    }

    /// Writes still queued for the in-flight sequence.
    pub fn pending_writes(&self) -> usize {
        match &self.phase {
            PresetPhase::Idle => 0,
            PresetPhase::Applying { pending, .. } => pending.len(),
        }
    }

    /// Manual edits waiting for the in-flight preset.
    pub fn deferred_edits(&self) -> usize {
        self.deferred.len()
    }

    pub fn state(&self) -> PresetApplicationState {
        PresetApplicationState {
            is_applying: self.is_applying(),
            is_locked: self.is_applying(),
            applied_at: self.applied_at,
            sequence_id: self.sequence.to_string(),
            current_preset_id: self.current_preset_id.clone(),
        }
    }

    /// Start applying `values`, superseding any application in flight.
    ///
    /// The store is reset to schema defaults here so the final state is exactly the preset
    /// overlaid on defaults, whatever was written before.
    #[tracing::instrument(skip_all, fields(preset = ?preset_id))]
    pub fn begin(
        &mut self,
        store: &mut EffectStateStore,
        preset_id: Option<&str>,
        values: &EffectValues,
    ) -> SequenceId {
        if let PresetPhase::Applying { sequence, pending, .. } = &self.phase {
            tracing::debug!(%sequence, dropped = pending.len(), "preempting preset application");
        }
        let sequence = self.stamp();
        let pending = values
            .entries()
            .map(|(effect, param, value)| ParamWrite::new(effect, param, value.clone()))
            .collect();
        store.reset_all();
        self.phase = PresetPhase::Applying {
            sequence,
            preset_id: preset_id.map(str::to_owned),
            pending,
        };
        sequence
    }

    /// Write up to `max_writes` queued pairs for `sequence`. Returns how many were written.
    pub fn pump(
        &mut self,
        store: &mut EffectStateStore,
        sequence: SequenceId,
        max_writes: usize,
    ) -> usize {
        let PresetPhase::Applying {
            sequence: live,
            pending,
            ..
        } = &mut self.phase
        else {
            return 0;
        };
        if *live != sequence {
            tracing::debug!(%sequence, live = %live, "ignoring pump for superseded preset");
            return 0;
        }
        let mut written = 0;
        while written < max_writes {
            let Some(w) = pending.pop_front() else { break };
            // Unknown ids are logged by the store and skipped.
            store.write(&w.effect, &w.param, w.value);
            written += 1;
        }
        written
    }

    /// Complete `sequence`: drain its remaining writes, record the preset, replay deferred
    /// manual edits. Returns `false` (and does nothing) when `sequence` was superseded.
    #[tracing::instrument(skip_all, fields(sequence = %sequence))]
    pub fn finish(&mut self, store: &mut EffectStateStore, sequence: SequenceId) -> bool {
        let live = match &self.phase {
            PresetPhase::Applying { sequence: live, .. } => *live,
            PresetPhase::Idle => {
                tracing::debug!("dropping completion while idle");
                return false;
            }
        };
        if live != sequence {
            tracing::debug!(live = %live, "dropping stale preset completion");
            return false;
        }

        self.pump(store, sequence, usize::MAX);
        let PresetPhase::Applying { preset_id, .. } =
            std::mem::replace(&mut self.phase, PresetPhase::Idle)
        else {
            return false;
        };
        self.current_preset_id = preset_id;
        self.applied_at = Some((self.clock)());
        tracing::debug!(preset = ?self.current_preset_id, "preset applied");

        while let Some(w) = self.deferred.pop_front() {
            self.manual_write(store, &w.effect, &w.param, w.value);
        }
        true
    }

    /// `begin` then `finish` in one call.
    pub fn apply(
        &mut self,
        store: &mut EffectStateStore,
        preset_id: Option<&str>,
        values: &EffectValues,
    ) -> SequenceId {
        let sequence = self.begin(store, preset_id, values);
        self.finish(store, sequence);
        sequence
    }

    /// A user edit. Deferred while a preset is in flight; otherwise written and, unless the
    /// store rejected it, marks the state as diverged from any named preset.
    pub fn manual_write(
        &mut self,
        store: &mut EffectStateStore,
        effect: &str,
        param: &str,
        value: ParamValue,
    ) -> EditOutcome {
        if self.is_applying() {
            tracing::debug!(effect, param, "deferring manual edit behind preset");
            self.deferred.push_back(ParamWrite::new(effect, param, value));
            return EditOutcome::Deferred;
        }
        let outcome = store.write(effect, param, value);
        if !outcome.is_rejected() {
            self.diverge();
        }
        EditOutcome::Written(outcome)
    }

    /// Clear the current preset and stamp a fresh sequence, as any manual change does.
    pub fn diverge(&mut self) {
        if let Some(id) = self.current_preset_id.take() {
            tracing::debug!(preset = id.as_str(), "state diverged from preset");
        }
        self.stamp();
    }

    /// Back to idle with nothing applied. Pending and deferred writes are dropped.
    pub fn reset(&mut self) {
        self.phase = PresetPhase::Idle;
        self.deferred.clear();
        self.current_preset_id = None;
        self.applied_at = None;
        self.stamp();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preset/controller.rs"]
mod tests;
