// demos/stamp/src/main.rs
// ============================================================================
// Module: Stamp Template Demo
// Description: Stamp template wired to in-memory controls.
// Purpose: Demonstrate value mapping plus a rotation subset slider.
// Dependencies: guest-form-bridge, guest-form-core, tokio, url
// ============================================================================

//! ## Overview
//! Reproduces the stamp template's wiring: a stamp text field mapped through
//! a setter and a rotation slider backed by a rotation subset. The rotation
//! value keeps its `x y z` shape; the slider edits the z component only.

use std::error::Error;
use std::io;
use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;

use guest_form_bridge::ChannelPort;
use guest_form_bridge::ControlPanel;
use guest_form_bridge::CustomControl;
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
const PAGE_URL: &str = "https://guest.example/stamp.html?payload_host_origin=https%3A%2F%2Fhost.example&guestid=stamp-demo";

/// Payload the host pushes when the template loads.
const SAMPLE_PAYLOAD: &str = r#"<payload xmlns="http://www.vizrt.com/types">
    <field name="01-stamp"><value>Approved</value></field>
    <field name="03-rotation">
        <field name="rotation"><value>0 0 45</value></field>
    </field>
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

/// Runs the simulated stamp template session.
fn main() -> Result<(), Box<dyn Error>> {
    let mut out = io::stdout();
    let params = SessionParams::from_url(&Url::parse(PAGE_URL)?);
    let (tx, mut rx) = tokio::sync::mpsc::channel::<OutboundEnvelope>(32);
    let hub = MessageHub::new();

    let stamp_field = Arc::new(TextInput::new());
    let rotation_slider = Arc::new(CustomControl::new(|_value: &str| {}));
    let rotation_subset: Arc<Mutex<SubsetFields>> = Arc::new(Mutex::new(SubsetFields::new()));

    let stamp_target = Arc::clone(&stamp_field);
    let slider_target = Arc::clone(&rotation_slider);
    let rotation_store = Arc::clone(&rotation_subset);
    let config = MappingConfig::new()
        .setter("field_01-stamp", move |value: &str| stamp_target.set_value(value))
        .subset_setter("field_-concept-variant-choice", |_subset: &SubsetFields| {})
        .subset_setter("field_03-rotation", move |subset: &SubsetFields| {
            if let Some(rotation) = subset.get("rotation") {
                // The slider shows the z component of "x y z".
                if let Some(degrees) = rotation.split(' ').nth(2) {
                    slider_target.set_value(degrees);
                }
            }
            if let Ok(mut stored) = rotation_store.lock() {
                *stored = subset.clone();
            }
        });

    let mapping = bind_fields(
        config,
        Arc::new(ControlPanel::new()),
        Arc::new(ChannelPort::new(tx)),
        &hub,
        &params,
    )?;

    let push_stamp = mapping.clone();
    stamp_field.subscribe(Arc::new(move |value: &str| {
        if let Err(err) = push_stamp.set_text_value(&FieldId::new("field_01-stamp"), value) {
            warn!("stamp update failed: {err}");
        }
    }));
    let push_rotation = mapping.clone();
    let rotation_source = Arc::clone(&rotation_subset);
    rotation_slider.subscribe(Arc::new(move |value: &str| {
        let mut subset = rotation_source.lock().map(|stored| stored.clone()).unwrap_or_default();
        subset.insert("rotation".to_string(), format!("0 0 {value}"));
        if let Err(err) = push_rotation.set_subset_fields(&FieldId::new("field_03-rotation"), &subset)
        {
            warn!("rotation update failed: {err}");
        }
    }));

    writeln!(out, "stamp template loaded")?;
    drain(&mut out, &mut rx)?;

    hub.deliver(&json!({"type": "set_payload", "xml": SAMPLE_PAYLOAD}))?;
    writeln!(out, "payload bound: slider={}", rotation_slider.value())?;

    stamp_field.input("Rejected");
    rotation_slider.input("90");
    drain(&mut out, &mut rx)?;

    Ok(())
}
