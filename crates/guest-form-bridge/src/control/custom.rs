// crates/guest-form-bridge/src/control/custom.rs
// ============================================================================
// Module: Guest Form Custom Control
// Description: Closure-backed control for template-specific widgets.
// Purpose: Adapt segmented controls, sliders, and similar widgets to the
// uniform value contract.
// Dependencies: std
// ============================================================================

//! ## Overview
//! [`CustomControl`] carries a stored value plus a template-supplied hook
//! invoked on every programmatic assignment, letting a widget refresh its
//! visual state when a payload binds. [`CustomControl::input`] simulates a
//! user gesture by storing the value and firing listeners without invoking
//! the hook.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;

use crate::control::InputListener;
use crate::control::ListenerId;
use crate::control::ListenerPool;
use crate::control::ValueControl;

// ============================================================================
// SECTION: Custom Control
// ============================================================================

/// Hook invoked with the new value on programmatic assignment.
type SetHook = dyn Fn(&str) + Send + Sync;

/// Closure-backed control for template-specific widgets.
pub struct CustomControl {
    /// Current value of the widget.
    value: Mutex<String>,
    /// Hook run when the mapping assigns a value.
    on_set: Arc<SetHook>,
    /// Input listeners registered on the control.
    listeners: ListenerPool,
}

impl CustomControl {
    /// Creates a custom control with a programmatic-assignment hook.
    pub fn new<F>(on_set: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Self {
            value: Mutex::new(String::new()),
            on_set: Arc::new(on_set),
            listeners: ListenerPool::default(),
        }
    }

    /// Simulates a user gesture: stores the value and fires input listeners.
    pub fn input(&self, value: &str) {
        self.store(value);
        self.listeners.notify(value);
    }

    /// Stores a value without firing listeners or the hook.
    fn store(&self, value: &str) {
        if let Ok(mut stored) = self.value.lock() {
            *stored = value.to_string();
        }
    }
}

impl ValueControl for CustomControl {
    fn value(&self) -> String {
        self.value.lock().map(|value| value.clone()).unwrap_or_default()
    }

    fn set_value(&self, value: &str) {
        self.store(value);
        (self.on_set)(value);
    }

    fn subscribe(&self, listener: InputListener) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    fn unsubscribe(&self, listener: ListenerId) {
        self.listeners.unsubscribe(listener);
    }
}
