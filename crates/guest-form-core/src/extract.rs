// crates/guest-form-core/src/extract.rs
// ============================================================================
// Module: Guest Form Field Extraction
// Description: Scalar, key-value list, and subset extraction from fields.
// Purpose: Project payload field elements onto plain Rust values.
// Dependencies: xmltree, crate::traverse
// ============================================================================

//! ## Overview
//! Extraction projects a `field` element onto one of three shapes: a scalar
//! text value (its `value` child), an ordered list of key-value records (its
//! `list` child), or a flat subset map (its direct `field` children). Each
//! extractor looks only for its own expected child shape and ignores the
//! others; exclusivity is not enforced.
//! Invariants:
//! - Extraction never mutates the document.
//! - Duplicate field names within a record or subset overwrite in document
//!   order (last wins); fields without a `name` attribute are skipped.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use xmltree::Element;
use xmltree::XMLNode;

use crate::PAYLOAD_NAMESPACE;
use crate::traverse::NamespaceFilter;
use crate::traverse::child_elements;
use crate::traverse::first_child;

// ============================================================================
// SECTION: Extracted Shapes
// ============================================================================

/// One record of a field's key-value list, keyed by inner field name.
pub type KeyValueRecord = BTreeMap<String, String>;

/// Flat name-to-value map over a field's direct `field` children.
pub type SubsetFields = BTreeMap<String, String>;

// ============================================================================
// SECTION: Extraction Functions
// ============================================================================

/// Returns the concatenated text-node children of a parent element.
///
/// Only text nodes contribute, in document order; CDATA sections, comments,
/// and child elements are skipped.
#[must_use]
pub fn text_content(parent: &Element) -> String {
    let mut result = String::new();
    for node in &parent.children {
        if let XMLNode::Text(text) = node {
            result.push_str(text);
        }
    }
    result
}

/// Returns the scalar text value of a field.
///
/// The value is the text content of the field's first `value` child, or the
/// empty string when no `value` child exists.
#[must_use]
pub fn field_value(field: &Element) -> String {
    first_child(field, NamespaceFilter::Uri(PAYLOAD_NAMESPACE), "value")
        .map(text_content)
        .unwrap_or_default()
}

/// Returns the ordered key-value records of a field's `list` child.
///
/// Each `payload` child of the list becomes one record keyed by its direct
/// `field` children's `name` attributes, valued by [`field_value`]. Returns
/// an empty vector when the field has no `list` child.
#[must_use]
pub fn key_value_list(field: &Element) -> Vec<KeyValueRecord> {
    let Some(list) = first_child(field, NamespaceFilter::Uri(PAYLOAD_NAMESPACE), "list") else {
        return Vec::new();
    };
    let mut records = Vec::new();
    for item in child_elements(list, NamespaceFilter::Uri(PAYLOAD_NAMESPACE), "payload") {
        records.push(record_fields(item));
    }
    records
}

/// Returns the flat subset map over a field's direct `field` children.
///
/// Returns an empty map when no field is given.
#[must_use]
pub fn subset_fields(field: Option<&Element>) -> SubsetFields {
    field.map(record_fields).unwrap_or_default()
}

/// Collects the named direct `field` children of a parent into a map.
fn record_fields(parent: &Element) -> BTreeMap<String, String> {
    let mut record = BTreeMap::new();
    for field in child_elements(parent, NamespaceFilter::Uri(PAYLOAD_NAMESPACE), "field") {
        if let Some(name) = field.attributes.get("name") {
            record.insert(name.clone(), field_value(field));
        }
    }
    record
}
