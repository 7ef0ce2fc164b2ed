// crates/guest-form-bridge/src/port/channel.rs
// ============================================================================
// Module: Guest Form Channel Port
// Description: Channel-based port for harness-observed delivery.
// Purpose: Send outbound messages through a Tokio mpsc channel.
// Dependencies: guest-form-core, guest-form-protocol, tokio
// ============================================================================

//! ## Overview
//! [`ChannelPort`] delivers messages by sending [`OutboundEnvelope`] values
//! into a `tokio::sync::mpsc` channel. The receiving side plays the host
//! window in tests and demos.
//! Invariants:
//! - Each successful post enqueues exactly one envelope.

// ============================================================================
// SECTION: Imports
// ============================================================================

use guest_form_core::HostOrigin;
use guest_form_protocol::GuestMessage;
use tokio::sync::mpsc::Sender;

use crate::port::HostPort;
use crate::port::OutboundEnvelope;
use crate::port::PortError;

// ============================================================================
// SECTION: Channel Port
// ============================================================================

/// Channel-based host port.
#[derive(Debug)]
pub struct ChannelPort {
    /// Sender used to enqueue outbound envelopes.
    sender: Sender<OutboundEnvelope>,
}

impl ChannelPort {
    /// Creates a channel port from a sender.
    #[must_use]
    pub fn new(sender: Sender<OutboundEnvelope>) -> Self {
        Self { sender }
    }
}

impl HostPort for ChannelPort {
    fn post(&self, origin: Option<&HostOrigin>, message: &GuestMessage) -> Result<(), PortError> {
        let envelope = OutboundEnvelope {
            origin: origin.cloned(),
            message: message.clone(),
        };
        self.sender.try_send(envelope).map_err(|err| PortError::DeliveryFailed(err.to_string()))
    }
}
