// crates/guest-form-bridge/src/port/callback.rs
// ============================================================================
// Module: Guest Form Callback Port
// Description: Callback-based port for synchronous delivery.
// Purpose: Invoke a user-provided function with outbound messages.
// Dependencies: guest-form-core, guest-form-protocol, std
// ============================================================================

//! ## Overview
//! [`CallbackPort`] delivers messages by invoking a user-supplied function,
//! the shape a real embedding uses to hand messages to its window glue.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use guest_form_core::HostOrigin;
use guest_form_protocol::GuestMessage;

use crate::port::HostPort;
use crate::port::PortError;

// ============================================================================
// SECTION: Callback Port
// ============================================================================

/// Callback handler signature used by the port.
type CallbackHandler =
    dyn Fn(Option<&HostOrigin>, &GuestMessage) -> Result<(), PortError> + Send + Sync;

/// Callback-based host port.
#[derive(Clone)]
pub struct CallbackPort {
    /// Handler invoked with the origin and message.
    handler: Arc<CallbackHandler>,
}

impl CallbackPort {
    /// Creates a callback port from a handler function.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(Option<&HostOrigin>, &GuestMessage) -> Result<(), PortError> + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
        }
    }
}

impl HostPort for CallbackPort {
    fn post(&self, origin: Option<&HostOrigin>, message: &GuestMessage) -> Result<(), PortError> {
        (self.handler)(origin, message)
    }
}
