// crates/guest-form-bridge/src/session.rs
// ============================================================================
// Module: Guest Form Session Bootstrap
// Description: Query-parameter discovery, inbound registration, bind entry.
// Purpose: Wire a new field mapping to the page and announce readiness.
// Dependencies: guest-form-core, guest-form-protocol, log, url
// ============================================================================

//! ## Overview
//! The session layer discovers the host origin and guest identifier from the
//! guest page URL, registers the mapping to receive every inbound message
//! for the lifetime of the page through a [`MessageHub`], and announces
//! `payload_guest_loaded` to the host. [`bind_fields`] is the single entry
//! point a template calls on load.
//! Invariants:
//! - A missing host origin is a configuration problem of the embedding; it
//!   is warned about at startup and surfaced to the port, never handled
//!   here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;

use guest_form_core::GuestId;
use guest_form_core::HostOrigin;
use guest_form_protocol::GuestMessage;
use log::warn;
use serde_json::Value;
use url::Url;

use crate::control::ControlPanel;
use crate::mapping::FieldMapping;
use crate::mapping::MappingConfig;
use crate::mapping::MappingError;
use crate::port::HostPort;

// ============================================================================
// SECTION: Query Parameters
// ============================================================================

/// Query parameter carrying the host origin.
const HOST_ORIGIN_PARAMETER: &str = "payload_host_origin";

/// Query parameter carrying the guest identifier.
const GUEST_ID_PARAMETER: &str = "guestid";

/// Returns the first value of a query parameter, percent-decoded.
fn query_parameter(page_url: &Url, name: &str) -> Option<String> {
    page_url
        .query_pairs()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.into_owned())
}

/// Returns the host origin named by the page URL, if any.
#[must_use]
pub fn host_origin(page_url: &Url) -> Option<HostOrigin> {
    query_parameter(page_url, HOST_ORIGIN_PARAMETER).map(HostOrigin::new)
}

/// Returns the guest identifier named by the page URL, if any.
#[must_use]
pub fn guest_identifier(page_url: &Url) -> Option<GuestId> {
    query_parameter(page_url, GUEST_ID_PARAMETER).map(GuestId::new)
}

// ============================================================================
// SECTION: Session Parameters
// ============================================================================

/// Session tokens discovered from the guest page URL.
#[derive(Debug, Clone, Default)]
pub struct SessionParams {
    /// Host origin targeted by outbound messages.
    pub host_origin: Option<HostOrigin>,
    /// Guest identifier echoed in outbound messages.
    pub guest_id: Option<GuestId>,
}

impl SessionParams {
    /// Discovers session parameters from the guest page URL.
    ///
    /// Logs a warning when the host origin is absent; outbound messages then
    /// carry no target origin and the host integration decides their fate.
    #[must_use]
    pub fn from_url(page_url: &Url) -> Self {
        let params = Self {
            host_origin: host_origin(page_url),
            guest_id: guest_identifier(page_url),
        };
        if params.host_origin.is_none() {
            warn!("no {HOST_ORIGIN_PARAMETER} query parameter; outbound messages are untargeted");
        }
        params
    }
}

// ============================================================================
// SECTION: Message Hub
// ============================================================================

/// Receiver of inbound host messages.
pub trait InboundHandler: Send + Sync {
    /// Handles one inbound message.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError`] when the handler rejects the message.
    fn on_message(&self, message: &Value) -> Result<(), MappingError>;
}

impl InboundHandler for FieldMapping {
    fn on_message(&self, message: &Value) -> Result<(), MappingError> {
        self.on_message_from_host(message)
    }
}

/// Registration point standing in for the page's global message listener.
///
/// # Invariants
/// - Handlers receive every delivered message in attachment order for the
///   lifetime of the hub.
#[derive(Default)]
pub struct MessageHub {
    /// Attached handlers in registration order.
    handlers: Mutex<Vec<Arc<dyn InboundHandler>>>,
}

impl MessageHub {
    /// Creates an empty hub.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a handler for the lifetime of the hub.
    pub fn attach(&self, handler: Arc<dyn InboundHandler>) {
        if let Ok(mut handlers) = self.handlers.lock() {
            handlers.push(handler);
        }
    }

    /// Delivers one inbound message to every attached handler in order.
    ///
    /// # Errors
    ///
    /// Returns the first handler error; later handlers are not invoked.
    pub fn deliver(&self, message: &Value) -> Result<(), MappingError> {
        let snapshot: Vec<Arc<dyn InboundHandler>> = self
            .handlers
            .lock()
            .map_err(|_| MappingError::LockPoisoned)?
            .iter()
            .map(Arc::clone)
            .collect();
        for handler in snapshot {
            handler.on_message(message)?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Bind Entry Point
// ============================================================================

/// Binds a new field mapping to the page and announces guest readiness.
///
/// Constructs the mapping over the panel and port, attaches it to the hub so
/// it receives all incoming messages, and immediately posts
/// `payload_guest_loaded` to the discovered host origin. The returned
/// mapping is kept by the template to push user edits through the outbound
/// operations.
///
/// # Errors
///
/// Returns [`MappingError::Port`] when the readiness announcement cannot be
/// delivered.
pub fn bind_fields(
    config: MappingConfig,
    panel: Arc<ControlPanel>,
    port: Arc<dyn HostPort>,
    hub: &MessageHub,
    params: &SessionParams,
) -> Result<FieldMapping, MappingError> {
    let mapping = FieldMapping::new(config, panel, Arc::clone(&port), params);
    hub.attach(Arc::new(mapping.clone()));
    let message = GuestMessage::PayloadGuestLoaded {
        guestid: params.guest_id.clone(),
    };
    port.post(params.host_origin.as_ref(), &message)?;
    Ok(mapping)
}
