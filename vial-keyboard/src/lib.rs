//! High-level Vial keyboard interface
//!
//! This crate provides the editable model for Vial-protocol keyboards on
//! top of any transport layer: keycode parsing and stringification,
//! modifier-mask composition, interactive tap binding, and the dynamic
//! entry (tap-dance) sync protocol.

pub mod binding;
pub mod error;
pub mod keycode;
pub mod modifier;
pub mod tapdance;

pub use binding::{BindKind, TapBindingSession};
pub use error::KeyboardError;
pub use keycode::{resolve_placeholder, KeyCode};
pub use modifier::{Modifier, ModifierSet};
pub use tapdance::TapDance;

use std::sync::Arc;

use tracing::{debug, info};

use vial_transport::protocol::{cmd, dynamic, vial};
use vial_transport::Transport;

/// How many slots the firmware reserves per dynamic entry family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DynamicEntryCounts {
    pub tapdance: u8,
    pub combo: u8,
    pub key_override: u8,
}

/// Identity block reported by the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardId {
    pub vial_protocol: u32,
    pub uid: u64,
}

/// High-level keyboard interface using any transport
pub struct VialKeyboard {
    transport: Arc<dyn Transport>,
}

impl VialKeyboard {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Get the underlying transport
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Get the Vial protocol version and keyboard UID
    pub async fn keyboard_id(&self) -> Result<KeyboardId, KeyboardError> {
        let resp = self
            .transport
            .query_command(cmd::VIAL_PREFIX, &[vial::GET_KEYBOARD_ID])
            .await?;
        if resp.len() < 12 {
            return Err(KeyboardError::UnexpectedResponse(
                "short keyboard ID response".into(),
            ));
        }
        Ok(KeyboardId {
            vial_protocol: u32::from_le_bytes([resp[0], resp[1], resp[2], resp[3]]),
            uid: u64::from_le_bytes([
                resp[4], resp[5], resp[6], resp[7], resp[8], resp[9], resp[10], resp[11],
            ]),
        })
    }

    /// Get the slot counts for every dynamic entry family
    pub async fn dynamic_entry_counts(&self) -> Result<DynamicEntryCounts, KeyboardError> {
        let resp = self
            .transport
            .query_command(
                cmd::VIAL_PREFIX,
                &[vial::DYNAMIC_ENTRY_OP, dynamic::GET_NUMBER_OF_ENTRIES],
            )
            .await?;
        if resp.len() < 3 {
            return Err(KeyboardError::UnexpectedResponse(
                "short dynamic entry count response".into(),
            ));
        }
        Ok(DynamicEntryCounts {
            tapdance: resp[0],
            combo: resp[1],
            key_override: resp[2],
        })
    }

    /// Fetch every tap-dance slot the firmware reports.
    pub async fn get_tapdances(&self) -> Result<Vec<TapDance>, KeyboardError> {
        let counts = self.dynamic_entry_counts().await?;
        self.get_tapdance_table(counts.tapdance).await
    }

    /// Fetch tap-dance slots 0..count, strictly in order. Any failed
    /// fetch aborts the whole table; no partial result is ever returned.
    pub async fn get_tapdance_table(&self, count: u8) -> Result<Vec<TapDance>, KeyboardError> {
        let mut table = Vec::with_capacity(count as usize);
        for tdid in 0..count {
            let resp = self
                .transport
                .query_command(
                    cmd::VIAL_PREFIX,
                    &[vial::DYNAMIC_ENTRY_OP, dynamic::TAP_DANCE_GET, tdid],
                )
                .await?;
            let td = TapDance::from_entry_bytes(tdid, &resp)?;
            debug!(tdid, tap = %td.tap, hold = %td.hold, "fetched tap-dance slot");
            table.push(td);
        }
        info!(count = table.len(), "tap-dance table loaded");
        Ok(table)
    }

    /// Push one tap-dance slot to the firmware. Fire-and-forget: the
    /// device applies the write without acknowledging it.
    pub async fn push_tapdance(&self, td: &TapDance) -> Result<(), KeyboardError> {
        let mut data = vec![vial::DYNAMIC_ENTRY_OP];
        data.extend_from_slice(&td.to_set_payload()?);
        self.transport.send_command(cmd::VIAL_PREFIX, &data).await?;
        info!(tdid = td.tdid, "tap-dance slot pushed");
        Ok(())
    }
}
