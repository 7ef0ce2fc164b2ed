// crates/guest-form-core/src/lib.rs
// ============================================================================
// Module: Guest Form Core Library
// Description: Payload document model for guest form templates.
// Purpose: Parse, traverse, extract, and mutate host payload documents.
// Dependencies: xmltree, serde, thiserror, log
// ============================================================================

//! ## Overview
//! Guest Form Core owns the XML payload document exchanged between a guest
//! form and its payload editor host. It provides the traversal iterators used
//! to locate `payload`, `field`, `value`, and `list` elements, the extraction
//! rules that project a field onto a scalar value, a key-value record list,
//! or a flat subset map, and the mutation operations that rewrite a field in
//! place before the whole document is serialized back to the host.
//! Invariants:
//! - Payload elements live in the namespace [`PAYLOAD_NAMESPACE`].
//! - Extraction never mutates; mutation goes through [`NodePath`] resolution
//!   under an exclusive borrow.
//! - A document is always parsed fresh and swapped in whole; a parse failure
//!   leaves prior state untouched.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod document;
pub mod extract;
pub mod identifiers;
pub mod mutate;
pub mod traverse;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use document::NodePath;
pub use document::PayloadDocument;
pub use document::PayloadError;
pub use extract::KeyValueRecord;
pub use extract::SubsetFields;
pub use extract::field_value;
pub use extract::key_value_list;
pub use extract::subset_fields;
pub use extract::text_content;
pub use identifiers::FieldId;
pub use identifiers::FieldName;
pub use identifiers::GuestId;
pub use identifiers::HostOrigin;
pub use mutate::replace_key_value_list;
pub use mutate::replace_subset_fields;
pub use mutate::replace_value;
pub use traverse::NamespaceFilter;
pub use traverse::child_elements;
pub use traverse::descend;
pub use traverse::first_child;
pub use xmltree::Element;
pub use xmltree::XMLNode;

// ============================================================================
// SECTION: Namespace
// ============================================================================

/// Namespace URI for all payload document elements.
pub const PAYLOAD_NAMESPACE: &str = "http://www.vizrt.com/types";
