// crates/guest-form-bridge/src/lib.rs
// ============================================================================
// Module: Guest Form Bridge Library
// Description: Field mapping, controls, host ports, and session bootstrap.
// Purpose: Bind payload fields to panel controls and relay edits to the host.
// Dependencies: guest-form-core, guest-form-protocol, log, tokio, url
// ============================================================================

//! ## Overview
//! Guest Form Bridge wires a parsed payload document to a control panel and
//! a host messaging channel. [`FieldMapping`] owns the bound document and
//! the field index, dispatches inbound payloads to registered setters or
//! panel controls, and pushes edits back as full-document `payload_changed`
//! messages. [`bind_fields`] is the template-facing entry point.
//! Invariants:
//! - Listener registrations are torn down and rebuilt on every received
//!   payload; stale controls never fire into a superseded bind.
//! - Outbound updates for identifiers absent from the current index are
//!   silent no-ops.
//! - A malformed inbound payload aborts the rebind and leaves the previous
//!   bound state untouched.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod control;
pub mod mapping;
pub mod port;
pub mod session;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use control::Checkbox;
pub use control::ControlPanel;
pub use control::CustomControl;
pub use control::InputListener;
pub use control::ListenerId;
pub use control::TextInput;
pub use control::ValueControl;
pub use mapping::FieldMapping;
pub use mapping::ListSetter;
pub use mapping::MappingConfig;
pub use mapping::MappingError;
pub use mapping::SubsetSetter;
pub use mapping::ValueSetter;
pub use port::CallbackPort;
pub use port::ChannelPort;
pub use port::HostPort;
pub use port::LogPort;
pub use port::OutboundEnvelope;
pub use port::PortError;
pub use session::InboundHandler;
pub use session::MessageHub;
pub use session::SessionParams;
pub use session::bind_fields;
pub use session::guest_identifier;
pub use session::host_origin;
