// crates/guest-form-protocol/src/lib.rs
// ============================================================================
// Module: Guest Form Protocol Library
// Description: Wire message types exchanged between guest form and host.
// Purpose: Provide the canonical tagged-union shapes for host messaging.
// Dependencies: guest-form-core, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Guest Form Protocol formalizes the window-messaging contract between a
//! guest form and its payload editor host as serde tagged unions. Inbound
//! messages carry a `type` tag of `set_payload`; outbound messages carry
//! `payload_guest_loaded` or `payload_changed` with the guest identifier
//! echoed verbatim.
//! Invariants:
//! - Wire tag and field names are fixed; the live format carries no version
//!   field, and none is added here.
//! - Unknown inbound types classify as recoverable, not as parse failures.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod messages;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use messages::GuestMessage;
pub use messages::HostMessage;
pub use messages::ProtocolError;
