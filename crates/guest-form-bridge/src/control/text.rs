// crates/guest-form-bridge/src/control/text.rs
// ============================================================================
// Module: Guest Form Text Input Control
// Description: Plain text input with stored value and input events.
// Purpose: Reference control for the direct field-to-element binding path.
// Dependencies: std
// ============================================================================

//! ## Overview
//! [`TextInput`] is the control analogue of an HTML text input: a stored
//! string value set programmatically during bind, and an [`TextInput::input`]
//! entry point that simulates a user edit by storing the text and firing the
//! registered listeners.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;

use crate::control::InputListener;
use crate::control::ListenerId;
use crate::control::ListenerPool;
use crate::control::ValueControl;

// ============================================================================
// SECTION: Text Input
// ============================================================================

/// Text input control with a stored string value.
#[derive(Default)]
pub struct TextInput {
    /// Current value of the input.
    value: Mutex<String>,
    /// Input listeners registered on the control.
    listeners: ListenerPool,
}

impl TextInput {
    /// Creates an empty text input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates a user edit: stores the text and fires input listeners.
    pub fn input(&self, text: &str) {
        self.store(text);
        self.listeners.notify(text);
    }

    /// Stores a value without firing listeners.
    fn store(&self, text: &str) {
        if let Ok(mut value) = self.value.lock() {
            *value = text.to_string();
        }
    }
}

impl ValueControl for TextInput {
    fn value(&self) -> String {
        self.value.lock().map(|value| value.clone()).unwrap_or_default()
    }

    fn set_value(&self, value: &str) {
        self.store(value);
    }

    fn subscribe(&self, listener: InputListener) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    fn unsubscribe(&self, listener: ListenerId) {
        self.listeners.unsubscribe(listener);
    }
}
