// File: src/feedback/loading.rs
// Purpose: Original state of a submit control, captured once

use std::cell::OnceCell;

/// What the submit control looked like before the first loading cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlSnapshot {
    pub label: String,
    pub disabled: bool,
}

/// Holds the submit control's original label and enabled state.
///
/// The snapshot is taken the first time loading starts and reused for every
/// later cycle, so a label left mutated by one cycle is never mistaken for
/// the original.
#[derive(Debug, Default)]
pub struct LoadingLabel {
    original: OnceCell<ControlSnapshot>,
}

impl LoadingLabel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the stored snapshot, taking it with `observe` on first use
    pub fn capture(&self, observe: impl FnOnce() -> ControlSnapshot) -> &ControlSnapshot {
        self.original.get_or_init(observe)
    }

    pub fn original(&self) -> Option<&ControlSnapshot> {
        self.original.get()
    }
}
