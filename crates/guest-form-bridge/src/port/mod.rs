// crates/guest-form-bridge/src/port/mod.rs
// ============================================================================
// Module: Guest Form Host Ports
// Description: Port trait and reference implementations for host delivery.
// Purpose: Deliver outbound guest messages to the payload editor host.
// Dependencies: guest-form-core, guest-form-protocol, thiserror
// ============================================================================

//! ## Overview
//! Ports carry [`GuestMessage`] values to the host window, targeted at the
//! session's host origin. The origin is optional: when discovery failed the
//! envelope carries `None` and the host integration decides how to treat the
//! untargeted message, matching the environment's own targeting rules.
//! Invariants:
//! - Successful posts deliver exactly one message.
//! - Delivery failures surface as errors; ports never drop silently.

// ============================================================================
// SECTION: Imports
// ============================================================================

use guest_form_core::HostOrigin;
use guest_form_protocol::GuestMessage;
use thiserror::Error;

// ============================================================================
// SECTION: Port Errors
// ============================================================================

/// Errors emitted by host ports.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum PortError {
    /// Message delivery failed.
    #[error("message delivery failed: {0}")]
    DeliveryFailed(String),
    /// Log port failed to write.
    #[error("log write failed: {0}")]
    LogWriteFailed(String),
}

// ============================================================================
// SECTION: Port Trait
// ============================================================================

/// Delivers outbound guest messages to the host.
pub trait HostPort: Send + Sync {
    /// Posts a message targeted at the host origin.
    ///
    /// # Errors
    ///
    /// Returns [`PortError`] when delivery fails.
    fn post(&self, origin: Option<&HostOrigin>, message: &GuestMessage) -> Result<(), PortError>;
}

// ============================================================================
// SECTION: Outbound Envelope
// ============================================================================

/// Outbound message paired with its target origin.
///
/// # Invariants
/// - `origin` is `None` only when host origin discovery failed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEnvelope {
    /// Host origin the message targets.
    pub origin: Option<HostOrigin>,
    /// Message body.
    pub message: GuestMessage,
}

// ============================================================================
// SECTION: Implementations
// ============================================================================

pub mod callback;
pub mod channel;
pub mod log;

pub use callback::CallbackPort;
pub use channel::ChannelPort;
pub use log::LogPort;
