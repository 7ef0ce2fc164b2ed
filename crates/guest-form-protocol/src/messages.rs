// crates/guest-form-protocol/src/messages.rs
// ============================================================================
// Module: Guest Form Wire Messages
// Description: Tagged-union message shapes for host and guest directions.
// Purpose: Serialize and classify the window-messaging contract.
// Dependencies: guest-form-core, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! One enum per message direction, externally tagged by the `type` field.
//! [`HostMessage::classify`] separates the three inbound outcomes the
//! mapping layer distinguishes: a well-formed known message, an unknown
//! type (logged and ignored by the receiver), and a malformed envelope.

// ============================================================================
// SECTION: Imports
// ============================================================================

use guest_form_core::GuestId;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Protocol Errors
// ============================================================================

/// Errors produced while classifying inbound messages.
///
/// # Invariants
/// - Variants are stable for programmatic handling;
///   [`ProtocolError::UnknownType`] is the only recoverable variant.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Message carries no `type` field.
    #[error("message from host has no type field")]
    MissingType,
    /// Message carries a `type` this guest does not understand.
    #[error("unknown message type from host: {message_type}")]
    UnknownType {
        /// The unrecognized `type` value.
        message_type: String,
    },
    /// Message carries a known `type` but an invalid body.
    #[error("malformed {message_type} message: {detail}")]
    Malformed {
        /// The `type` value of the malformed message.
        message_type: String,
        /// Deserialization failure detail.
        detail: String,
    },
}

// ============================================================================
// SECTION: Host Messages
// ============================================================================

/// Messages sent by the payload editor host to the guest.
///
/// # Invariants
/// - Externally tagged by `type` with snake_case names; `set_payload` is the
///   only type the guest acts on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostMessage {
    /// Replace the guest's bound payload with the given XML document.
    SetPayload {
        /// Payload document as an XML wire string.
        xml: String,
    },
}

impl HostMessage {
    /// Classifies a raw inbound message value.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MissingType`] when no `type` field is
    /// present, [`ProtocolError::UnknownType`] for types this guest does not
    /// understand, and [`ProtocolError::Malformed`] when a known type has an
    /// invalid body.
    pub fn classify(message: &Value) -> Result<Self, ProtocolError> {
        let message_type = message
            .get("type")
            .and_then(Value::as_str)
            .ok_or(ProtocolError::MissingType)?;
        match message_type {
            "set_payload" => {
                serde_json::from_value(message.clone()).map_err(|err| ProtocolError::Malformed {
                    message_type: message_type.to_string(),
                    detail: err.to_string(),
                })
            }
            other => Err(ProtocolError::UnknownType {
                message_type: other.to_string(),
            }),
        }
    }
}

// ============================================================================
// SECTION: Guest Messages
// ============================================================================

/// Messages sent by the guest to the payload editor host.
///
/// # Invariants
/// - Externally tagged by `type` with snake_case names; `guestid` is echoed
///   verbatim from the session and serializes as `null` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GuestMessage {
    /// Announces that the guest form finished loading and is ready to bind.
    PayloadGuestLoaded {
        /// Correlation token discovered from the page URL.
        guestid: Option<GuestId>,
    },
    /// Carries the full serialized payload after an outbound update.
    PayloadChanged {
        /// Correlation token discovered from the page URL.
        guestid: Option<GuestId>,
        /// Entire payload document as an XML wire string.
        xml: String,
    },
}
