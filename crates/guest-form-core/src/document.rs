// crates/guest-form-core/src/document.rs
// ============================================================================
// Module: Guest Form Payload Document
// Description: Owned payload document with parse, index, and serialize.
// Purpose: Hold the in-memory XML document exchanged with the host.
// Dependencies: xmltree, thiserror, log, crate::{identifiers, traverse}
// ============================================================================

//! ## Overview
//! [`PayloadDocument`] owns one parsed payload document. It is always built
//! fresh from the host's XML string and swapped in whole; mutation happens
//! in place through [`NodePath`] resolution under an exclusive borrow, after
//! which the entire document is serialized back for the host.
//! Invariants:
//! - A parse failure produces no document; callers keep their prior state.
//! - Node paths are only valid for the document they were indexed from; the
//!   field index is rebuilt from scratch for every received payload.
//! - Serialization omits the XML declaration, matching the wire format the
//!   host expects.

// ============================================================================
// SECTION: Imports
// ============================================================================

use log::warn;
use thiserror::Error;
use xmltree::Element;
use xmltree::EmitterConfig;
use xmltree::XMLNode;

use crate::PAYLOAD_NAMESPACE;
use crate::identifiers::FieldId;
use crate::identifiers::FieldName;

// ============================================================================
// SECTION: Payload Errors
// ============================================================================

/// Errors produced while parsing or serializing a payload document.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// Inbound payload XML failed to parse.
    #[error("payload parse failure: {0}")]
    Parse(#[from] xmltree::ParseError),
    /// Payload document failed to serialize.
    #[error("payload serialize failure: {0}")]
    Serialize(#[from] xmltree::Error),
    /// Serialized payload bytes were not valid UTF-8.
    #[error("payload is not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

// ============================================================================
// SECTION: Node Paths
// ============================================================================

/// Path of child-node indices locating an element under the document root.
///
/// # Invariants
/// - Indices count all child nodes (elements and text alike) so a path stays
///   stable as long as the document shape it was indexed from is unchanged
///   above the target element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// Creates a path from root-relative child indices.
    #[must_use]
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// Resolves the path to a shared element reference.
    #[must_use]
    pub fn resolve<'a>(&self, root: &'a Element) -> Option<&'a Element> {
        let mut current = root;
        for &index in &self.0 {
            current = current.children.get(index)?.as_element()?;
        }
        Some(current)
    }

    /// Resolves the path to an exclusive element reference.
    pub fn resolve_mut<'a>(&self, root: &'a mut Element) -> Option<&'a mut Element> {
        let mut current = root;
        for &index in &self.0 {
            current = current.children.get_mut(index)?.as_mut_element()?;
        }
        Some(current)
    }
}

// ============================================================================
// SECTION: Payload Document
// ============================================================================

/// Owned payload document exchanged between guest and host.
#[derive(Debug)]
pub struct PayloadDocument {
    /// Root element of the document (the top-level `payload` element).
    root: Element,
}

impl PayloadDocument {
    /// Parses a payload document from its XML wire string.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Parse`] when the XML is malformed; no partial
    /// document is produced.
    pub fn parse(xml: &str) -> Result<Self, PayloadError> {
        let root = Element::parse(xml.as_bytes())?;
        Ok(Self { root })
    }

    /// Serializes the entire document to its XML wire string.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Serialize`] when the emitter fails and
    /// [`PayloadError::Utf8`] when the emitted bytes are not UTF-8.
    pub fn to_xml(&self) -> Result<String, PayloadError> {
        let mut buffer = Vec::new();
        let config = EmitterConfig::new().write_document_declaration(false);
        self.root.write_with_config(&mut buffer, config)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Returns the document root element.
    #[must_use]
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Returns the document root element for mutation.
    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Returns the top-level `payload` elements of the document.
    ///
    /// A well-formed document has exactly one root element, so this yields
    /// the root when it is a `payload` element in the payload namespace and
    /// nothing otherwise.
    pub fn payload_elements(&self) -> impl Iterator<Item = &Element> {
        std::iter::once(&self.root).filter(|element| {
            element.namespace.as_deref() == Some(PAYLOAD_NAMESPACE) && element.name == "payload"
        })
    }

    /// Returns the named `field` entries of all payload elements, in
    /// document order.
    ///
    /// Entries keep duplicates so that every parsed field is dispatched to
    /// its setter; callers building a lookup map apply last-wins. Fields
    /// without a `name` attribute are skipped with a warning.
    #[must_use]
    pub fn field_index(&self) -> Vec<(FieldId, NodePath)> {
        let mut entries = Vec::new();
        for payload in self.payload_elements() {
            for (index, node) in payload.children.iter().enumerate() {
                let Some(field) = field_element(node) else {
                    continue;
                };
                match field.attributes.get("name") {
                    Some(name) => {
                        let id = FieldId::from_name(&FieldName::new(name.clone()));
                        entries.push((id, NodePath::new(vec![index])));
                    }
                    None => warn!("payload field without a name attribute skipped"),
                }
            }
        }
        entries
    }
}

/// Returns the node as a payload-namespace `field` element, if it is one.
fn field_element(node: &XMLNode) -> Option<&Element> {
    let element = node.as_element()?;
    let in_namespace = element.namespace.as_deref() == Some(PAYLOAD_NAMESPACE);
    (in_namespace && element.name == "field").then_some(element)
}
