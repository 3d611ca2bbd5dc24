use crate::lighting::model::{LightingDescriptor, PointerState, compute_lighting};

/// Latest pointer sample, last-write-wins by sample index.
///
/// Hosts number their samples monotonically (event timestamp, frame counter). A sample older
/// than the one held is discarded since lighting is derived, never accumulated.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerTracker {
    latest: Option<(u64, PointerState)>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a sample. Returns `true` when it became the latest one.
    pub fn update(&mut self, index: u64, pointer: PointerState) -> bool {
        if let Some((held, _)) = self.latest
            && index < held
        {
            tracing::trace!(index, held, "discarding stale pointer sample");
            return false;
        }
        let Some(pointer) = pointer.sanitized() else {
            tracing::debug!(index, ?pointer, "discarding non-finite pointer sample");
            return false;
        };
        self.latest = Some((index, pointer));
        true
    }

    /// Mark the pointer as having left the card, keeping its last position.
    pub fn leave(&mut self, index: u64) -> bool {
        let at = self.pointer().unwrap_or_default();
        self.update(
            index,
            PointerState {
                is_hovering: false,
                ..at
            },
        )
    }

    pub fn pointer(&self) -> Option<PointerState> {
        self.latest.map(|(_, p)| p)
    }

    /// Index of the held sample.
    pub fn index(&self) -> Option<u64> {
        self.latest.map(|(i, _)| i)
    }

    pub fn is_hovering(&self) -> bool {
        self.pointer().is_some_and(|p| p.is_hovering)
    }

    /// Lighting for the held sample.
    pub fn lighting(&self, enabled: bool) -> Option<LightingDescriptor> {
        compute_lighting(self.pointer()?, enabled)
    }

    pub fn clear(&mut self) {
        self.latest = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lighting/tracker.rs"]
mod tests;
