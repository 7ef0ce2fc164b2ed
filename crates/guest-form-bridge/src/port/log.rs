// crates/guest-form-bridge/src/port/log.rs
// ============================================================================
// Module: Guest Form Log Port
// Description: Log-only port writing one JSON record per message.
// Purpose: Record outbound traffic without a host on the other side.
// Dependencies: guest-form-protocol, serde_json, std
// ============================================================================

//! ## Overview
//! `LogPort` writes a JSON line for each posted message and reports success.
//! It does not deliver messages to an external host; demos use it to show
//! outbound traffic on a writer.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::sync::Mutex;

use guest_form_core::HostOrigin;
use guest_form_protocol::GuestMessage;
use serde_json::json;

use crate::port::HostPort;
use crate::port::PortError;

// ============================================================================
// SECTION: Log Port
// ============================================================================

/// Log-only host port.
pub struct LogPort<W: Write + Send> {
    /// Output writer for message records.
    writer: Mutex<W>,
}

impl<W: Write + Send> LogPort<W> {
    /// Creates a log port over a writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl<W: Write + Send> HostPort for LogPort<W> {
    fn post(&self, origin: Option<&HostOrigin>, message: &GuestMessage) -> Result<(), PortError> {
        let record = json!({
            "origin": origin,
            "message": message,
        });
        let mut guard = self
            .writer
            .lock()
            .map_err(|_| PortError::LogWriteFailed("log writer mutex poisoned".to_string()))?;
        serde_json::to_writer(&mut *guard, &record)
            .map_err(|err| PortError::LogWriteFailed(err.to_string()))?;
        guard.write_all(b"\n").map_err(|err| PortError::LogWriteFailed(err.to_string()))?;
        drop(guard);
        Ok(())
    }
}
