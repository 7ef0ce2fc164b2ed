// crates/guest-form-bridge/src/control/mod.rs
// ============================================================================
// Module: Guest Form Controls
// Description: Capability trait and registry for panel controls.
// Purpose: Give the mapping a uniform get/set-value contract over widgets.
// Dependencies: std
// ============================================================================

//! ## Overview
//! A [`ValueControl`] is anything on the panel with a readable and settable
//! string value and user-input notifications: a text input, a checkbox, or a
//! template-specific custom widget. The capability is resolved once per
//! control at bind time through the [`ControlPanel`] registry instead of
//! structurally at each event.
//! Invariants:
//! - [`ValueControl::set_value`] is programmatic and never fires listeners,
//!   matching assignment semantics on form elements.
//! - Listener identifiers are unique per control for its lifetime.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

// ============================================================================
// SECTION: Listener Types
// ============================================================================

/// Listener invoked with the control's new value on user input.
pub type InputListener = Arc<dyn Fn(&str) + Send + Sync>;

/// Handle identifying one listener subscription on one control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Pool of input listeners shared by the control implementations.
#[derive(Default)]
pub(crate) struct ListenerPool {
    /// Monotonic counter used for unique listener identifiers.
    next: AtomicU64,
    /// Registered listeners in subscription order.
    listeners: Mutex<Vec<(ListenerId, InputListener)>>,
}

impl ListenerPool {
    /// Registers a listener and returns its handle.
    pub(crate) fn subscribe(&self, listener: InputListener) -> ListenerId {
        let id = ListenerId(self.next.fetch_add(1, Ordering::Relaxed) + 1);
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push((id, listener));
        }
        id
    }

    /// Removes the listener with the given handle, if still registered.
    pub(crate) fn unsubscribe(&self, id: ListenerId) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.retain(|(registered, _)| *registered != id);
        }
    }

    /// Invokes every registered listener with the new value.
    ///
    /// Listeners are cloned out of the lock before running so a listener may
    /// call back into the control or the mapping.
    pub(crate) fn notify(&self, value: &str) {
        let snapshot: Vec<InputListener> = match self.listeners.lock() {
            Ok(listeners) => listeners.iter().map(|(_, listener)| Arc::clone(listener)).collect(),
            Err(_) => return,
        };
        for listener in snapshot {
            listener(value);
        }
    }
}

// ============================================================================
// SECTION: Value Control Trait
// ============================================================================

/// Panel control with a uniform string value contract.
pub trait ValueControl: Send + Sync {
    /// Returns the control's current value.
    fn value(&self) -> String;

    /// Assigns the control's value programmatically without firing listeners.
    fn set_value(&self, value: &str);

    /// Registers an input listener and returns its handle.
    fn subscribe(&self, listener: InputListener) -> ListenerId;

    /// Removes a previously registered input listener.
    fn unsubscribe(&self, listener: ListenerId);
}

// ============================================================================
// SECTION: Control Panel
// ============================================================================

/// Registry mapping element identifiers to panel controls.
///
/// # Invariants
/// - Later registrations with the same identifier overwrite earlier ones.
#[derive(Default)]
pub struct ControlPanel {
    /// Registered controls keyed by element identifier.
    controls: Mutex<BTreeMap<String, Arc<dyn ValueControl>>>,
}

impl ControlPanel {
    /// Creates an empty panel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a control under an element identifier.
    pub fn register(&self, id: impl Into<String>, control: Arc<dyn ValueControl>) {
        if let Ok(mut controls) = self.controls.lock() {
            controls.insert(id.into(), control);
        }
    }

    /// Returns the control registered under the identifier, if any.
    #[must_use]
    pub fn lookup(&self, id: &str) -> Option<Arc<dyn ValueControl>> {
        self.controls.lock().ok()?.get(id).map(Arc::clone)
    }
}

// ============================================================================
// SECTION: Implementations
// ============================================================================

pub mod checkbox;
pub mod custom;
pub mod text;

pub use checkbox::Checkbox;
pub use custom::CustomControl;
pub use text::TextInput;
