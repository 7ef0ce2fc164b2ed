// system-tests/tests/lifecycle.rs
// ============================================================================
// Module: Guest Lifecycle Tests
// Description: End-to-end tests over the full guest wiring.
// Purpose: Exercise announce, bind, edit round-trip, and supersession.
// ============================================================================
//! ## Overview
//! Drives a complete guest the way a payload editor host would: boot,
//! payload delivery, user edits, payload replacement, and failure handling.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use guest_form_bridge::ControlPanel;
use guest_form_bridge::MappingConfig;
use guest_form_bridge::TextInput;
use guest_form_bridge::ValueControl;
use guest_form_core::FieldId;
use guest_form_core::GuestId;
use guest_form_core::HostOrigin;
use guest_form_core::PayloadDocument;
use guest_form_core::field_value;
use guest_form_core::subset_fields;
use guest_form_protocol::GuestMessage;
use guest_form_system_tests::GuestHarness;
use serde_json::json;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Page URL carrying both session query parameters.
const PAGE_URL: &str = "https://guest.example/corner.html?payload_host_origin=https%3A%2F%2Fhost.example&guestid=guest-7";

/// Initial payload with scalar, bound-text, and subset fields.
const FIRST_PAYLOAD: &str = r#"<payload xmlns="http://www.vizrt.com/types">
    <field name="corner"><value>TopLeft</value></field>
    <field name="text"><value>Breaking News</value></field>
    <field name="scale">
        <field name="scaling"><value>1 1 0</value></field>
        <field name="pivot"><value>center</value></field>
    </field>
</payload>"#;

/// Replacement payload with a disjoint field set.
const SECOND_PAYLOAD: &str = r#"<payload xmlns="http://www.vizrt.com/types">
    <field name="headline"><value>Weather</value></field>
</payload>"#;

/// Returns the XML body of a payload_changed message.
fn changed_xml(message: &GuestMessage) -> &str {
    match message {
        GuestMessage::PayloadChanged { xml, .. } => xml,
        other => panic!("expected payload_changed, got {other:?}"),
    }
}

/// Extracts one named field's value from an outbound payload string.
fn extracted_value(xml: &str, name: &str) -> String {
    let document = PayloadDocument::parse(xml).expect("parse outbound payload");
    let wanted = FieldId::new(format!("field_{name}"));
    let (_, path) = document
        .field_index()
        .into_iter()
        .find(|(id, _)| *id == wanted)
        .expect("field present");
    field_value(path.resolve(document.root()).expect("resolve field"))
}

// ============================================================================
// SECTION: Lifecycle Tests
// ============================================================================

/// Tests the full guest lifecycle from announce to edit round-trip.
#[test]
fn guest_lifecycle_round_trips_edits() {
    let corners = Arc::new(Mutex::new(Vec::new()));
    let corner_sink = Arc::clone(&corners);
    let config = MappingConfig::new().setter("field_corner", move |value: &str| {
        corner_sink.lock().expect("corner sink").push(value.to_string());
    });
    let panel = Arc::new(ControlPanel::new());
    let text = Arc::new(TextInput::new());
    panel.register("field_text", Arc::clone(&text) as Arc<dyn ValueControl>);

    let mut harness = GuestHarness::start(PAGE_URL, config, panel).expect("start guest");

    // The guest announces itself before any payload arrives.
    let loaded = harness.next_outbound().expect("loaded envelope");
    assert_eq!(loaded.origin, Some(HostOrigin::new("https://host.example")));
    assert_eq!(
        loaded.message,
        GuestMessage::PayloadGuestLoaded {
            guestid: Some(GuestId::new("guest-7"))
        }
    );

    // Payload delivery projects fields onto the setter and the text input.
    harness.host_sends_payload(FIRST_PAYLOAD).expect("first payload");
    assert_eq!(*corners.lock().expect("corners"), vec!["TopLeft".to_string()]);
    assert_eq!(text.value(), "Breaking News");

    // A user edit in the bound control posts the updated document.
    text.input("Hello");
    let changed = harness.next_outbound().expect("changed envelope");
    assert_eq!(
        changed.origin,
        Some(HostOrigin::new("https://host.example"))
    );
    assert_eq!(extracted_value(changed_xml(&changed.message), "text"), "Hello");
    assert_eq!(extracted_value(changed_xml(&changed.message), "corner"), "TopLeft");
}

/// Tests template-driven subset replacement drops omitted entries.
#[test]
fn subset_push_replaces_wholesale() {
    let harness_panel = Arc::new(ControlPanel::new());
    let mut harness =
        GuestHarness::start(PAGE_URL, MappingConfig::new(), harness_panel).expect("start guest");
    harness.next_outbound().expect("loaded envelope");
    harness.host_sends_payload(FIRST_PAYLOAD).expect("first payload");

    let replacement: BTreeMap<String, String> =
        [("scaling".to_string(), "2 2 0".to_string())].into();
    harness
        .mapping()
        .set_subset_fields(&FieldId::new("field_scale"), &replacement)
        .expect("push subset");

    let changed = harness.next_outbound().expect("changed envelope");
    let document = PayloadDocument::parse(changed_xml(&changed.message)).expect("parse outbound");
    let (_, path) = document
        .field_index()
        .into_iter()
        .find(|(id, _)| id.as_str() == "field_scale")
        .expect("scale field");
    let subset = subset_fields(path.resolve(document.root()));
    // The omitted pivot entry is deleted, not preserved.
    assert_eq!(subset, replacement);
}

/// Tests a replacement payload fully supersedes the previous bind.
#[test]
fn second_payload_supersedes_first() {
    let panel = Arc::new(ControlPanel::new());
    let text = Arc::new(TextInput::new());
    panel.register("field_text", Arc::clone(&text) as Arc<dyn ValueControl>);
    let mut harness =
        GuestHarness::start(PAGE_URL, MappingConfig::new(), panel).expect("start guest");
    harness.next_outbound().expect("loaded envelope");

    harness.host_sends_payload(FIRST_PAYLOAD).expect("first payload");
    harness.host_sends_payload(SECOND_PAYLOAD).expect("second payload");

    // Identifiers from the first payload no longer resolve.
    harness
        .mapping()
        .set_text_value(&FieldId::new("field_corner"), "BottomLeft")
        .expect("stale identifier no-op");
    assert!(harness.next_outbound().is_none());

    // Stale control listeners no longer push edits.
    text.input("orphaned");
    assert!(harness.next_outbound().is_none());

    // The replacement payload's own fields are live.
    harness
        .mapping()
        .set_text_value(&FieldId::new("field_headline"), "Sports")
        .expect("current identifier");
    let changed = harness.next_outbound().expect("changed envelope");
    assert_eq!(extracted_value(changed_xml(&changed.message), "headline"), "Sports");
}

/// Tests the guest survives unknown messages and malformed payloads.
#[test]
fn guest_recovers_from_bad_inbound_traffic() {
    let mut harness =
        GuestHarness::start(PAGE_URL, MappingConfig::new(), Arc::new(ControlPanel::new()))
            .expect("start guest");
    harness.next_outbound().expect("loaded envelope");
    harness.host_sends_payload(FIRST_PAYLOAD).expect("first payload");

    // Unknown message types are logged and ignored.
    harness.host_sends_raw(&json!({"type": "finish_edit"})).expect("unknown type ignored");

    // A malformed payload aborts loudly without losing the previous bind.
    assert!(harness.host_sends_payload("<payload xmlns=").is_err());
    harness
        .mapping()
        .set_text_value(&FieldId::new("field_corner"), "BottomRight")
        .expect("previous bind intact");
    let changed = harness.next_outbound().expect("changed envelope");
    assert_eq!(extracted_value(changed_xml(&changed.message), "corner"), "BottomRight");
}
