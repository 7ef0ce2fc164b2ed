// crates/guest-form-core/src/mutate.rs
// ============================================================================
// Module: Guest Form Payload Mutation
// Description: In-place replacement of field values, lists, and subsets.
// Purpose: Rewrite one field of the in-memory document before serialization.
// Dependencies: xmltree, crate::extract
// ============================================================================

//! ## Overview
//! Mutation rewrites exactly one `field` element of the bound document. All
//! three operations are full replacements: the caller supplies the complete
//! desired content, and anything omitted is dropped rather than merged.
//! Invariants:
//! - A replaced `value` or `list` child keeps its position among the field's
//!   children; a missing one is appended.
//! - [`replace_subset_fields`] removes every existing child first; omitted
//!   subset entries are deleted, not preserved.
//! - Created elements live in the payload namespace.

// ============================================================================
// SECTION: Imports
// ============================================================================

use xmltree::Element;
use xmltree::XMLNode;

use crate::PAYLOAD_NAMESPACE;
use crate::extract::KeyValueRecord;
use crate::extract::SubsetFields;

// ============================================================================
// SECTION: Element Construction
// ============================================================================

/// Creates an empty element in the payload namespace.
fn payload_element(name: &str) -> Element {
    let mut element = Element::new(name);
    element.namespace = Some(PAYLOAD_NAMESPACE.to_string());
    element
}

/// Creates a `value` element holding a single text node.
fn value_element(text: &str) -> Element {
    let mut value = payload_element("value");
    value.children.push(XMLNode::Text(text.to_string()));
    value
}

/// Creates a named `field` element holding a `value` child.
fn field_with_value(name: &str, text: &str) -> Element {
    let mut field = payload_element("field");
    field.attributes.insert("name".to_string(), name.to_string());
    field.children.push(XMLNode::Element(value_element(text)));
    field
}

/// Returns the position of the first payload-namespace child with the name.
fn child_position(parent: &Element, name: &str) -> Option<usize> {
    parent.children.iter().position(|node| {
        node.as_element().is_some_and(|element| {
            element.namespace.as_deref() == Some(PAYLOAD_NAMESPACE) && element.name == name
        })
    })
}

/// Replaces the first matching child in place or appends a new one.
fn replace_or_append(parent: &mut Element, name: &str, replacement: Element) {
    let node = XMLNode::Element(replacement);
    match child_position(parent, name) {
        Some(position) => parent.children[position] = node,
        None => parent.children.push(node),
    }
}

// ============================================================================
// SECTION: Mutation Operations
// ============================================================================

/// Replaces (or creates) the field's `value` child with the new text.
pub fn replace_value(field: &mut Element, new_value: &str) {
    replace_or_append(field, "value", value_element(new_value));
}

/// Replaces (or creates) the field's `list` child from the given records.
///
/// This is a full replace: list items absent from `records` are dropped, so
/// callers always pass the complete desired list, never a delta.
pub fn replace_key_value_list(field: &mut Element, records: &[KeyValueRecord]) {
    let mut list = payload_element("list");
    for record in records {
        let mut item = payload_element("payload");
        for (name, value) in record {
            item.children.push(XMLNode::Element(field_with_value(name, value)));
        }
        list.children.push(XMLNode::Element(item));
    }
    replace_or_append(field, "list", list);
}

/// Removes all children of the field and appends one `field` per entry.
///
/// This is a full replace with the same supply-everything contract as
/// [`replace_key_value_list`]: any field previously present and omitted from
/// `subset` is deleted, not preserved.
pub fn replace_subset_fields(field: &mut Element, subset: &SubsetFields) {
    field.children.clear();
    for (name, value) in subset {
        field.children.push(XMLNode::Element(field_with_value(name, value)));
    }
}
