// crates/guest-form-bridge/src/mapping.rs
// ============================================================================
// Module: Guest Form Field Mapping
// Description: Bidirectional binding between payload fields and the panel.
// Purpose: Dispatch inbound payloads and push edits back to the host.
// Dependencies: guest-form-core, guest-form-protocol, log, serde_json
// ============================================================================

//! ## Overview
//! [`FieldMapping`] is the guest's state machine. Uninitialized until the
//! host sends `set_payload`, then bound: the payload is parsed into a fresh
//! document, prior control listeners are torn down, the field index is
//! rebuilt, and every field is dispatched in priority order to a registered
//! value setter, key-value list setter, subset setter, or a matching panel
//! control. Outbound operations mutate the bound document in place,
//! serialize the whole document, and post `payload_changed` to the host.
//! Invariants:
//! - A parse failure aborts the rebind before any state is touched.
//! - Setter callbacks run after the internal swap completes, so a callback
//!   may immediately call the outbound operations.
//! - Outbound operations are silent no-ops for identifiers absent from the
//!   current index.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use guest_form_core::Element;
use guest_form_core::FieldId;
use guest_form_core::GuestId;
use guest_form_core::HostOrigin;
use guest_form_core::KeyValueRecord;
use guest_form_core::NodePath;
use guest_form_core::PayloadDocument;
use guest_form_core::PayloadError;
use guest_form_core::SubsetFields;
use guest_form_core::field_value;
use guest_form_core::key_value_list;
use guest_form_core::replace_key_value_list;
use guest_form_core::replace_subset_fields;
use guest_form_core::replace_value;
use guest_form_core::subset_fields;
use guest_form_protocol::GuestMessage;
use guest_form_protocol::HostMessage;
use guest_form_protocol::ProtocolError;
use log::debug;
use log::warn;
use serde_json::Value;
use thiserror::Error;

use crate::control::ControlPanel;
use crate::control::InputListener;
use crate::control::ListenerId;
use crate::control::ValueControl;
use crate::port::HostPort;
use crate::port::PortError;
use crate::session::SessionParams;

// ============================================================================
// SECTION: Mapping Errors
// ============================================================================

/// Errors surfaced by the field mapping.
///
/// # Invariants
/// - Unknown inbound message types and unknown outbound field identifiers
///   are not errors; both are handled locally.
#[derive(Debug, Error)]
pub enum MappingError {
    /// Payload document failed to parse or serialize.
    #[error(transparent)]
    Payload(#[from] PayloadError),
    /// Inbound message carried a known type with an invalid body.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    /// Outbound port failed to deliver a message.
    #[error(transparent)]
    Port(#[from] PortError),
    /// Mapping state lock was poisoned by a panicked holder.
    #[error("mapping state lock poisoned")]
    LockPoisoned,
}

// ============================================================================
// SECTION: Setter Registrations
// ============================================================================

/// Setter invoked with a field's scalar text value.
pub type ValueSetter = Arc<dyn Fn(&str) + Send + Sync>;

/// Setter invoked with a field's key-value records.
pub type ListSetter = Arc<dyn Fn(&[KeyValueRecord]) + Send + Sync>;

/// Setter invoked with a field's subset map.
pub type SubsetSetter = Arc<dyn Fn(&SubsetFields) + Send + Sync>;

/// Mapping configuration declaring how field identifiers are projected.
///
/// # Invariants
/// - For each field, the first matching registration wins in fixed priority
///   order: value setter, key-value list setter, subset setter, then the
///   panel control fallback.
#[derive(Default)]
pub struct MappingConfig {
    /// Value setters keyed by field identifier.
    setters: BTreeMap<FieldId, ValueSetter>,
    /// Key-value list setters keyed by field identifier.
    key_value_list_setters: BTreeMap<FieldId, ListSetter>,
    /// Subset setters keyed by field identifier.
    subset_setters: BTreeMap<FieldId, SubsetSetter>,
}

impl MappingConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a value setter for a field identifier.
    #[must_use]
    pub fn setter<F>(mut self, id: impl Into<FieldId>, setter: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.setters.insert(id.into(), Arc::new(setter));
        self
    }

    /// Registers a key-value list setter for a field identifier.
    #[must_use]
    pub fn key_value_list_setter<F>(mut self, id: impl Into<FieldId>, setter: F) -> Self
    where
        F: Fn(&[KeyValueRecord]) + Send + Sync + 'static,
    {
        self.key_value_list_setters.insert(id.into(), Arc::new(setter));
        self
    }

    /// Registers a subset setter for a field identifier.
    #[must_use]
    pub fn subset_setter<F>(mut self, id: impl Into<FieldId>, setter: F) -> Self
    where
        F: Fn(&SubsetFields) + Send + Sync + 'static,
    {
        self.subset_setters.insert(id.into(), Arc::new(setter));
        self
    }
}

// ============================================================================
// SECTION: Pending Dispatches
// ============================================================================

/// Setter invocation collected during rebind and run after the state swap.
enum Dispatch {
    /// Value setter with the field's extracted text.
    Value(ValueSetter, String),
    /// List setter with the field's extracted records.
    List(ListSetter, Vec<KeyValueRecord>),
    /// Subset setter with the field's extracted map.
    Subset(SubsetSetter, SubsetFields),
}

impl Dispatch {
    /// Invokes the collected setter.
    fn run(self) {
        match self {
            Self::Value(setter, value) => setter(&value),
            Self::List(setter, records) => setter(&records),
            Self::Subset(setter, subset) => setter(&subset),
        }
    }
}

// ============================================================================
// SECTION: Field Mapping
// ============================================================================

/// Control listener attached for the current payload.
struct ControlBinding {
    /// Control the listener is attached to.
    control: Arc<dyn ValueControl>,
    /// Subscription handle for teardown.
    listener: ListenerId,
}

/// Mutable mapping state guarded by the handle's mutex.
struct MappingState {
    /// Projection configuration supplied at construction.
    config: MappingConfig,
    /// Panel consulted for the control fallback.
    panel: Arc<ControlPanel>,
    /// Port carrying outbound messages to the host.
    port: Arc<dyn HostPort>,
    /// Host origin targeted by outbound messages.
    host_origin: Option<HostOrigin>,
    /// Guest identifier echoed in outbound messages.
    guest_id: Option<GuestId>,
    /// Currently bound payload document, if any.
    document: Option<PayloadDocument>,
    /// Field index of the bound document (last duplicate wins).
    fields: BTreeMap<FieldId, NodePath>,
    /// Control listeners attached for the bound document.
    bindings: Vec<ControlBinding>,
}

impl MappingState {
    /// Detaches every control listener registered for the previous payload.
    fn teardown_bindings(&mut self) {
        for binding in self.bindings.drain(..) {
            binding.control.unsubscribe(binding.listener);
        }
    }

    /// Mutates one bound field, then serializes and posts the document.
    ///
    /// Unknown identifiers and unresolvable paths are silent no-ops.
    fn update_field<F>(&mut self, field_id: &FieldId, mutate: F) -> Result<(), MappingError>
    where
        F: FnOnce(&mut Element),
    {
        let Some(path) = self.fields.get(field_id).cloned() else {
            return Ok(());
        };
        let Some(document) = self.document.as_mut() else {
            return Ok(());
        };
        let Some(field) = path.resolve_mut(document.root_mut()) else {
            return Ok(());
        };
        mutate(field);
        let xml = document.to_xml()?;
        let message = GuestMessage::PayloadChanged {
            guestid: self.guest_id.clone(),
            xml,
        };
        self.port.post(self.host_origin.as_ref(), &message)?;
        Ok(())
    }
}

/// Cloneable handle mapping payload fields to setters and panel controls.
#[derive(Clone)]
pub struct FieldMapping {
    /// Shared mapping state.
    inner: Arc<Mutex<MappingState>>,
}

impl FieldMapping {
    /// Creates an uninitialized mapping bound to a panel and a host port.
    #[must_use]
    pub fn new(
        config: MappingConfig,
        panel: Arc<ControlPanel>,
        port: Arc<dyn HostPort>,
        params: &SessionParams,
    ) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MappingState {
                config,
                panel,
                port,
                host_origin: params.host_origin.clone(),
                guest_id: params.guest_id.clone(),
                document: None,
                fields: BTreeMap::new(),
                bindings: Vec::new(),
            })),
        }
    }

    /// Identifies and dispatches one message from the payload editor host.
    ///
    /// Unknown message types are logged and ignored without touching state.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::Payload`] when a `set_payload` body fails to
    /// parse (the previous bind stays intact) and [`MappingError::Protocol`]
    /// when a known message type carries an invalid body.
    pub fn on_message_from_host(&self, message: &Value) -> Result<(), MappingError> {
        match HostMessage::classify(message) {
            Ok(HostMessage::SetPayload { xml }) => self.bind_payload(&xml),
            Err(err @ (ProtocolError::UnknownType { .. } | ProtocolError::MissingType)) => {
                warn!("{err}");
                Ok(())
            }
            Err(err) => Err(MappingError::Protocol(err)),
        }
    }

    /// Sets an updated text value on a field and notifies the host.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError`] when serialization or delivery fails.
    pub fn set_text_value(&self, field_id: &FieldId, new_value: &str) -> Result<(), MappingError> {
        self.lock()?.update_field(field_id, |field| replace_value(field, new_value))
    }

    /// Sets an updated key-value list on a field and notifies the host.
    ///
    /// This is a full replace: records absent from `records` are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError`] when serialization or delivery fails.
    pub fn set_key_value_list(
        &self,
        field_id: &FieldId,
        records: &[KeyValueRecord],
    ) -> Result<(), MappingError> {
        self.lock()?.update_field(field_id, |field| replace_key_value_list(field, records))
    }

    /// Replaces all subset fields of a field and notifies the host.
    ///
    /// This is a full replace: any field previously present and omitted from
    /// `subset` is deleted, not preserved.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError`] when serialization or delivery fails.
    pub fn set_subset_fields(
        &self,
        field_id: &FieldId,
        subset: &SubsetFields,
    ) -> Result<(), MappingError> {
        self.lock()?.update_field(field_id, |field| replace_subset_fields(field, subset))
    }

    /// Parses a payload and rebinds the mapping to it.
    fn bind_payload(&self, xml: &str) -> Result<(), MappingError> {
        // Parse into a fresh document before touching any state so a
        // malformed payload leaves the previous bind intact.
        let document = PayloadDocument::parse(xml)?;
        let mut dispatches = Vec::new();
        {
            let mut state = self.lock()?;
            state.teardown_bindings();
            state.fields.clear();
            for (id, path) in document.field_index() {
                let Some(field) = path.resolve(document.root()) else {
                    continue;
                };
                state.fields.insert(id.clone(), path);
                if let Some(setter) = state.config.setters.get(&id) {
                    dispatches.push(Dispatch::Value(Arc::clone(setter), field_value(field)));
                } else if let Some(setter) = state.config.key_value_list_setters.get(&id) {
                    dispatches.push(Dispatch::List(Arc::clone(setter), key_value_list(field)));
                } else if let Some(setter) = state.config.subset_setters.get(&id) {
                    dispatches
                        .push(Dispatch::Subset(Arc::clone(setter), subset_fields(Some(field))));
                } else if let Some(control) = state.panel.lookup(id.as_str()) {
                    control.set_value(&field_value(field));
                    let listener = control.subscribe(self.input_listener(id));
                    state.bindings.push(ControlBinding { control, listener });
                }
            }
            state.document = Some(document);
            debug!("bound payload with {} fields", state.fields.len());
        }
        for dispatch in dispatches {
            dispatch.run();
        }
        Ok(())
    }

    /// Creates the input listener pushing a control's edits back to the host.
    fn input_listener(&self, field_id: FieldId) -> InputListener {
        let weak = Arc::downgrade(&self.inner);
        Arc::new(move |new_value: &str| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let mapping = Self { inner };
            if let Err(err) = mapping.set_text_value(&field_id, new_value) {
                warn!("failed to push edit for {field_id}: {err}");
            }
        })
    }

    /// Locks the mapping state.
    fn lock(&self) -> Result<MutexGuard<'_, MappingState>, MappingError> {
        self.inner.lock().map_err(|_| MappingError::LockPoisoned)
    }
}
