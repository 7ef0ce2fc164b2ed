// crates/guest-form-core/src/identifiers.rs
// ============================================================================
// Module: Guest Form Identifiers
// Description: Canonical opaque identifiers for guest form payload mapping.
// Purpose: Provide strongly typed, serializable identifiers with stable wire forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! This module defines the identifiers used throughout the guest form
//! mapping layer. Field identifiers join payload fields to panel controls
//! and setter registrations; guest identifiers and host origins are opaque
//! session tokens discovered from the page URL and echoed on the wire.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Field Identifiers
// ============================================================================

/// Prefix joining a payload field name to its panel identifier.
const FIELD_ID_PREFIX: &str = "field_";

/// Payload field name as carried in the `name` attribute.
///
/// # Invariants
/// - Opaque UTF-8 string; no normalization or validation is applied by this type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldName(String);

impl FieldName {
    /// Creates a new field name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for FieldName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for FieldName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Field identifier joining payload fields to controls and setters.
///
/// # Invariants
/// - Wire form is `"field_" + name`; [`FieldId::from_name`] is the only
///   derivation, [`FieldId::new`] accepts an already-derived identifier.
/// - Unique within one payload; the last-parsed field with a given
///   identifier wins in the runtime field index.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    /// Creates a field identifier from an already-derived identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derives the field identifier for a payload field name.
    #[must_use]
    pub fn from_name(name: &FieldName) -> Self {
        Self(format!("{FIELD_ID_PREFIX}{name}"))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for FieldId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for FieldId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Session Identifiers
// ============================================================================

/// Guest identifier correlating outbound messages with a host-side editor.
///
/// # Invariants
/// - Opaque UTF-8 string; echoed verbatim in every outbound message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestId(String);

impl GuestId {
    /// Creates a new guest identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for GuestId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for GuestId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Host origin targeted by outbound messages.
///
/// # Invariants
/// - Opaque UTF-8 string (scheme+domain+port); no validation is applied by
///   this type. Targeting rules belong to the host environment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostOrigin(String);

impl HostOrigin {
    /// Creates a new host origin.
    #[must_use]
    pub fn new(origin: impl Into<String>) -> Self {
        Self(origin.into())
    }

    /// Returns the origin as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HostOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for HostOrigin {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for HostOrigin {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
