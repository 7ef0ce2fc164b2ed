// crates/guest-form-core/tests/mutation.rs
// ============================================================================
// Module: Field Mutation Tests
// Description: Tests for value, list, and subset replacement.
// Purpose: Pin the full-replace contracts of the mutation operations.
// ============================================================================
//! ## Overview
//! Validates in-place field rewrites and their interaction with extraction.

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

use guest_form_core::Element;
use guest_form_core::NamespaceFilter;
use guest_form_core::PAYLOAD_NAMESPACE;
use guest_form_core::child_elements;
use guest_form_core::field_value;
use guest_form_core::key_value_list;
use guest_form_core::replace_key_value_list;
use guest_form_core::replace_subset_fields;
use guest_form_core::replace_value;
use guest_form_core::subset_fields;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses an XML fragment into its root element.
fn parse(xml: &str) -> Element {
    Element::parse(xml.as_bytes()).expect("parse fragment")
}

/// Builds an owned string map from borrowed entries.
fn map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries.iter().map(|(key, value)| ((*key).to_string(), (*value).to_string())).collect()
}

// ============================================================================
// SECTION: Value Replacement Tests
// ============================================================================

/// Tests replacing an existing value keeps its position among siblings.
#[test]
fn replace_value_keeps_position() {
    let mut field = parse(
        r#"<field xmlns="http://www.vizrt.com/types" name="corner"><value>TopLeft</value><list/></field>"#,
    );
    replace_value(&mut field, "BottomRight");
    assert_eq!(field_value(&field), "BottomRight");
    let first = field.children[0].as_element().expect("element child");
    assert_eq!(first.name, "value");
}

/// Tests a missing value child is created.
#[test]
fn replace_value_creates_missing_child() {
    let mut field = parse(r#"<field xmlns="http://www.vizrt.com/types" name="corner"/>"#);
    replace_value(&mut field, "TopLeft");
    assert_eq!(field_value(&field), "TopLeft");
}

/// Tests the created value element lives in the payload namespace.
#[test]
fn replace_value_uses_payload_namespace() {
    let mut field = parse(r#"<field xmlns="http://www.vizrt.com/types" name="corner"/>"#);
    replace_value(&mut field, "TopLeft");
    let value = field.children[0].as_element().expect("value child");
    assert_eq!(value.namespace.as_deref(), Some(PAYLOAD_NAMESPACE));
}

// ============================================================================
// SECTION: List Replacement Tests
// ============================================================================

/// Tests list replacement is a full replace visible to extraction.
#[test]
fn replace_key_value_list_round_trips() {
    let mut field = parse(
        r#"<field xmlns="http://www.vizrt.com/types" name="scores">
            <list>
                <payload><field name="stale"><value>x</value></field></payload>
            </list>
        </field>"#,
    );
    let records = vec![map(&[("team", "Home"), ("points", "3")]), map(&[("team", "Away")])];
    replace_key_value_list(&mut field, &records);
    assert_eq!(key_value_list(&field), records);
}

/// Tests an empty replacement empties the list.
#[test]
fn replace_key_value_list_with_empty_clears() {
    let mut field = parse(
        r#"<field xmlns="http://www.vizrt.com/types" name="scores">
            <list>
                <payload><field name="stale"><value>x</value></field></payload>
            </list>
        </field>"#,
    );
    replace_key_value_list(&mut field, &[]);
    assert!(key_value_list(&field).is_empty());
}

/// Tests a missing list child is created.
#[test]
fn replace_key_value_list_creates_missing_child() {
    let mut field = parse(r#"<field xmlns="http://www.vizrt.com/types" name="scores"/>"#);
    let records = vec![map(&[("team", "Home")])];
    replace_key_value_list(&mut field, &records);
    assert_eq!(key_value_list(&field), records);
}

// ============================================================================
// SECTION: Subset Replacement Tests
// ============================================================================

/// Tests subset replacement drops every omitted field.
#[test]
fn replace_subset_fields_drops_omitted_entries() {
    let mut field = parse(
        r#"<field xmlns="http://www.vizrt.com/types" name="scale">
            <field name="a"><value>1</value></field>
            <field name="b"><value>2</value></field>
        </field>"#,
    );
    replace_subset_fields(&mut field, &map(&[("a", "3")]));
    let subset = subset_fields(Some(&field));
    assert_eq!(subset, map(&[("a", "3")]));
    let children: Vec<&Element> =
        child_elements(&field, NamespaceFilter::Uri(PAYLOAD_NAMESPACE), "field").collect();
    assert_eq!(children.len(), 1);
}

/// Tests subset replacement removes non-field children as well.
#[test]
fn replace_subset_fields_clears_all_children() {
    let mut field = parse(
        r#"<field xmlns="http://www.vizrt.com/types" name="scale">
            <value>stray</value>
            <field name="a"><value>1</value></field>
        </field>"#,
    );
    replace_subset_fields(&mut field, &map(&[("b", "2")]));
    assert_eq!(field_value(&field), "");
    assert_eq!(subset_fields(Some(&field)), map(&[("b", "2")]));
}

/// Tests each created subset entry holds its value in a value child.
#[test]
fn replace_subset_fields_builds_value_children() {
    let mut field = parse(r#"<field xmlns="http://www.vizrt.com/types" name="scale"/>"#);
    replace_subset_fields(&mut field, &map(&[("scaling", "2 2 0")]));
    let entry = first_field(&field);
    assert_eq!(entry.attributes.get("name").map(String::as_str), Some("scaling"));
    assert_eq!(field_value(entry), "2 2 0");
}

/// Returns the first subset entry of a field.
fn first_field(field: &Element) -> &Element {
    child_elements(field, NamespaceFilter::Uri(PAYLOAD_NAMESPACE), "field")
        .next()
        .expect("subset entry")
}
