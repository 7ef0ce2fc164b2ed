// crates/guest-form-bridge/src/control/checkbox.rs
// ============================================================================
// Module: Guest Form Checkbox Control
// Description: Two-state control presented as "1" or "0".
// Purpose: Reference control for boolean payload fields.
// Dependencies: std
// ============================================================================

//! ## Overview
//! [`Checkbox`] presents a checked flag through the string value contract the
//! payload speaks: `"1"` when checked, `"0"` otherwise. [`Checkbox::toggle`]
//! simulates a user click by flipping the flag and firing listeners.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use crate::control::InputListener;
use crate::control::ListenerId;
use crate::control::ListenerPool;
use crate::control::ValueControl;

// ============================================================================
// SECTION: Checkbox
// ============================================================================

/// Checkbox control with a `"1"`/`"0"` string value.
#[derive(Default)]
pub struct Checkbox {
    /// Checked state of the control.
    checked: AtomicBool,
    /// Input listeners registered on the control.
    listeners: ListenerPool,
}

impl Checkbox {
    /// Creates an unchecked checkbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the checkbox is checked.
    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.checked.load(Ordering::Relaxed)
    }

    /// Simulates a user click: flips the state and fires input listeners.
    pub fn toggle(&self) {
        let checked = !self.checked.load(Ordering::Relaxed);
        self.checked.store(checked, Ordering::Relaxed);
        self.listeners.notify(flag_value(checked));
    }
}

/// Maps a checked flag to its payload string value.
fn flag_value(checked: bool) -> &'static str {
    if checked { "1" } else { "0" }
}

impl ValueControl for Checkbox {
    fn value(&self) -> String {
        flag_value(self.is_checked()).to_string()
    }

    fn set_value(&self, value: &str) {
        self.checked.store(value == "1", Ordering::Relaxed);
    }

    fn subscribe(&self, listener: InputListener) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    fn unsubscribe(&self, listener: ListenerId) {
        self.listeners.unsubscribe(listener);
    }
}
