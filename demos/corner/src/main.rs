// demos/corner/src/main.rs
// ============================================================================
// Module: Corner Template Demo
// Description: Corner-bug template wired to in-memory controls.
// Purpose: Demonstrate value, checkbox, and subset mapping end to end.
// Dependencies: guest-form-bridge, guest-form-core, tokio, url
// ============================================================================

//! ## Overview
//! Reproduces the corner template's wiring: a segmented corner picker, a
//! bound text field, a plate checkbox, and a zoom slider backed by a scale
//! subset. Host traffic is simulated on stdin-free channels and outbound
//! messages are printed as JSON lines.

use std::error::Error;
use std::io;
use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;

use guest_form_bridge::Checkbox;
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
const PAGE_URL: &str = "https://guest.example/corner.html?payload_host_origin=https%3A%2F%2Fhost.example&guestid=corner-demo";

/// Payload the host pushes when the template loads.
const SAMPLE_PAYLOAD: &str = r#"<payload xmlns="http://www.vizrt.com/types">
    <field name="01-corner"><value>TopLeft</value></field>
    <field name="02-text"><value>Breaking News</value></field>
    <field name="05-plate"><value>1</value></field>
    <field name="06-scale">
        <field name="scaling"><value>1 1 0</value></field>
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

/// Runs the simulated corner template session.
fn main() -> Result<(), Box<dyn Error>> {
    let mut out = io::stdout();
    let params = SessionParams::from_url(&Url::parse(PAGE_URL)?);
    let (tx, mut rx) = tokio::sync::mpsc::channel::<OutboundEnvelope>(32);
    let hub = MessageHub::new();

    // Widgets of the control panel.
    let corner_segments = Arc::new(CustomControl::new(|_value: &str| {}));
    let plate_checkbox = Arc::new(Checkbox::new());
    let text_field = Arc::new(TextInput::new());
    let zoom_slider = Arc::new(CustomControl::new(|_value: &str| {}));
    let scale_subset: Arc<Mutex<SubsetFields>> = Arc::new(Mutex::new(SubsetFields::new()));

    // Payload projections, mirroring the template's setter table.
    let text_target = Arc::clone(&text_field);
    let corner_target = Arc::clone(&corner_segments);
    let plate_target = Arc::clone(&plate_checkbox);
    let slider_target = Arc::clone(&zoom_slider);
    let scale_store = Arc::clone(&scale_subset);
    let config = MappingConfig::new()
        .setter("field_02-text", move |value: &str| text_target.set_value(value))
        .setter("field_01-corner", move |value: &str| corner_target.set_value(value))
        .setter("field_05-plate", move |value: &str| plate_target.set_value(value))
        .subset_setter("field_-concept-variant-choice", |_subset: &SubsetFields| {})
        .subset_setter("field_06-scale", move |subset: &SubsetFields| {
            if let Some(scaling) = subset.get("scaling") {
                slider_target.set_value(scaling);
            }
            if let Ok(mut stored) = scale_store.lock() {
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

    // Template-side handlers pushing user gestures back to the payload.
    let push_corner = mapping.clone();
    corner_segments.subscribe(Arc::new(move |value: &str| {
        if let Err(err) = push_corner.set_text_value(&FieldId::new("field_01-corner"), value) {
            warn!("corner update failed: {err}");
        }
    }));
    let push_plate = mapping.clone();
    plate_checkbox.subscribe(Arc::new(move |value: &str| {
        if let Err(err) = push_plate.set_text_value(&FieldId::new("field_05-plate"), value) {
            warn!("plate update failed: {err}");
        }
    }));
    let push_text = mapping.clone();
    text_field.subscribe(Arc::new(move |value: &str| {
        if let Err(err) = push_text.set_text_value(&FieldId::new("field_02-text"), value) {
            warn!("text update failed: {err}");
        }
    }));
    let push_scale = mapping.clone();
    let scale_source = Arc::clone(&scale_subset);
    zoom_slider.subscribe(Arc::new(move |value: &str| {
        let mut subset = scale_source.lock().map(|stored| stored.clone()).unwrap_or_default();
        subset.insert("scaling".to_string(), format!("{value} {value} 0"));
        if let Err(err) = push_scale.set_subset_fields(&FieldId::new("field_06-scale"), &subset) {
            warn!("scale update failed: {err}");
        }
    }));

    writeln!(out, "corner template loaded")?;
    drain(&mut out, &mut rx)?;

    // Host pushes the initial payload.
    hub.deliver(&json!({"type": "set_payload", "xml": SAMPLE_PAYLOAD}))?;
    writeln!(out, "payload bound: corner={}", corner_segments.value())?;

    // Simulated user gestures.
    corner_segments.input("TopRight");
    plate_checkbox.toggle();
    text_field.input("Now: weather");
    zoom_slider.input("2");
    drain(&mut out, &mut rx)?;

    Ok(())
}
