// system-tests/src/lib.rs
// ============================================================================
// Module: Guest Form System Test Support
// Description: Harness playing both sides of the guest embedding.
// Purpose: Drive a fully wired guest from tests the way a host would.
// Dependencies: guest-form-bridge, serde_json, tokio, url
// ============================================================================

//! ## Overview
//! [`GuestHarness`] stands in for the payload editor host: it boots a guest
//! with [`guest_form_bridge::bind_fields`] from a page URL, injects inbound
//! window messages through the hub, and observes outbound messages through a
//! channel port.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use guest_form_bridge::ChannelPort;
use guest_form_bridge::ControlPanel;
use guest_form_bridge::FieldMapping;
use guest_form_bridge::MappingConfig;
use guest_form_bridge::MappingError;
use guest_form_bridge::MessageHub;
use guest_form_bridge::OutboundEnvelope;
use guest_form_bridge::SessionParams;
use guest_form_bridge::bind_fields;
use serde_json::json;
use tokio::sync::mpsc::Receiver;
use url::Url;

// ============================================================================
// SECTION: Harness Errors
// ============================================================================

/// Errors raised while booting or driving the harness.
#[derive(Debug)]
pub enum HarnessError {
    /// Guest page URL failed to parse.
    PageUrl(url::ParseError),
    /// Guest-side mapping rejected an operation.
    Mapping(MappingError),
}

impl From<url::ParseError> for HarnessError {
    fn from(err: url::ParseError) -> Self {
        Self::PageUrl(err)
    }
}

impl From<MappingError> for HarnessError {
    fn from(err: MappingError) -> Self {
        Self::Mapping(err)
    }
}

// ============================================================================
// SECTION: Guest Harness
// ============================================================================

/// Host-side harness around one fully wired guest form.
pub struct GuestHarness {
    /// Inbound registration point (the page's message listener).
    hub: MessageHub,
    /// Mapping handle returned to the template by `bind_fields`.
    mapping: FieldMapping,
    /// Receiver observing everything the guest posts to the host.
    outbound: Receiver<OutboundEnvelope>,
}

impl GuestHarness {
    /// Boots a guest from a page URL, configuration, and panel.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when the page URL is invalid or the guest
    /// fails to announce readiness.
    pub fn start(
        page_url: &str,
        config: MappingConfig,
        panel: Arc<ControlPanel>,
    ) -> Result<Self, HarnessError> {
        let params = SessionParams::from_url(&Url::parse(page_url)?);
        let (tx, outbound) = tokio::sync::mpsc::channel::<OutboundEnvelope>(32);
        let hub = MessageHub::new();
        let mapping = bind_fields(config, panel, Arc::new(ChannelPort::new(tx)), &hub, &params)?;
        Ok(Self {
            hub,
            mapping,
            outbound,
        })
    }

    /// Returns the mapping handle the template keeps.
    #[must_use]
    pub fn mapping(&self) -> &FieldMapping {
        &self.mapping
    }

    /// Delivers a `set_payload` message from the host.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Mapping`] when the guest rejects the payload.
    pub fn host_sends_payload(&self, xml: &str) -> Result<(), HarnessError> {
        self.hub.deliver(&json!({"type": "set_payload", "xml": xml}))?;
        Ok(())
    }

    /// Delivers an arbitrary raw message from the host.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Mapping`] when the guest rejects the message.
    pub fn host_sends_raw(&self, message: &serde_json::Value) -> Result<(), HarnessError> {
        self.hub.deliver(message)?;
        Ok(())
    }

    /// Returns the next outbound message, if the guest posted one.
    pub fn next_outbound(&mut self) -> Option<OutboundEnvelope> {
        self.outbound.try_recv().ok()
    }
}
