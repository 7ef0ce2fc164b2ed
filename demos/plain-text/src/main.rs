// demos/plain-text/src/main.rs
// ============================================================================
// Module: Plain Text Template Demo
// Description: Plain text template wired to in-memory controls.
// Purpose: Demonstrate setter-mapped text and checkbox fields.
// Dependencies: guest-form-bridge, guest-form-core, tokio, url
// ============================================================================

//! ## Overview
//! Reproduces the plain-text template's wiring: a text field and a blackback
//! checkbox, both mapped through setters, plus a concept/variant subset.

use std::error::Error;
use std::io;
use std::io::Write;
use std::sync::Arc;

use guest_form_bridge::Checkbox;
use guest_form_bridge::ChannelPort;
use guest_form_bridge::ControlPanel;
use guest_form_bridge::MappingConfig;
use guest_form_bridge::MessageHub;
use guest_form_bridge::OutboundEnvelope;
use guest_form_bridge::SessionParams;
use guest_form_bridge::TextInput;
use guest_form_bridge::ValueControl;
use guest_form_bridge::bind_fields;
use guest_form_core::FieldId;
use guest_form_core::SubsetFields;
use log::warn;
use serde_json::json;
use tokio::sync::mpsc::Receiver;
use url::Url;

/// Page URL a hosting editor would load this template with.
const PAGE_URL: &str = "https://guest.example/plaintext.html?payload_host_origin=https%3A%2F%2Fhost.example&guestid=plain-demo";

/// Payload the host pushes when the template loads.
const SAMPLE_PAYLOAD: &str = r#"<payload xmlns="http://www.vizrt.com/types">
    <field name="01-text"><value>Hello World</value></field>
    <field name="02-blackback"><value>0</value></field>
    <field name="-concept-variant-choice">
        <field name="concept"><value>Default</value></field>
        <field name="variant"><value>Default</value></field>
    </field>
</payload>"#;

/// Drains and prints every queued outbound message.
fn drain(out: &mut impl Write, rx: &mut Receiver<OutboundEnvelope>) -> io::Result<()> {
    while let Ok(envelope) = rx.try_recv() {
        let origin = envelope
            .origin
            .map_or_else(|| "(untargeted)".to_string(), |origin| origin.to_string());
        let body = serde_json::to_string(&envelope.message)?;
        writeln!(out, "-> {origin}: {body}")?;
    }
    Ok(())
}

/// Runs the simulated plain text template session.
fn main() -> Result<(), Box<dyn Error>> {
    let mut out = io::stdout();
    let params = SessionParams::from_url(&Url::parse(PAGE_URL)?);
    let (tx, mut rx) = tokio::sync::mpsc::channel::<OutboundEnvelope>(32);
    let hub = MessageHub::new();

    let text_field = Arc::new(TextInput::new());
    let blackback = Arc::new(Checkbox::new());

    let text_target = Arc::clone(&text_field);
    let blackback_target = Arc::clone(&blackback);
    let config = MappingConfig::new()
        .setter("field_01-text", move |value: &str| text_target.set_value(value))
        .setter("field_02-blackback", move |value: &str| blackback_target.set_value(value))
        .subset_setter("field_-concept-variant-choice", |_subset: &SubsetFields| {});

    let mapping = bind_fields(
        config,
        Arc::new(ControlPanel::new()),
        Arc::new(ChannelPort::new(tx)),
        &hub,
        &params,
    )?;

    let push_text = mapping.clone();
    text_field.subscribe(Arc::new(move |value: &str| {
        if let Err(err) = push_text.set_text_value(&FieldId::new("field_01-text"), value) {
            warn!("text update failed: {err}");
        }
    }));
    let push_blackback = mapping.clone();
    blackback.subscribe(Arc::new(move |value: &str| {
        if let Err(err) = push_blackback.set_text_value(&FieldId::new("field_02-blackback"), value)
        {
            warn!("blackback update failed: {err}");
        }
    }));

    writeln!(out, "plain text template loaded")?;
    drain(&mut out, &mut rx)?;

    hub.deliver(&json!({"type": "set_payload", "xml": SAMPLE_PAYLOAD}))?;
    writeln!(out, "payload bound: text={}", text_field.value())?;

    text_field.input("Good evening");
    blackback.toggle();
    drain(&mut out, &mut rx)?;

    Ok(())
}
