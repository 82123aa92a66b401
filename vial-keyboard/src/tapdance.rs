//! Tap-dance records and their 11-byte wire form.
//!
//! Firmware stores each tap-dance slot as five little-endian u16 keycodes
//! behind a marker byte:
//!
//! ```text
//! offset  0    1..3  3..5  5..7       7..9      9..11
//! field   mark tap   hold  doubletap  taphold   term_ms
//! ```
//!
//! On fetch the marker is a status/reserved byte; on push it carries the
//! slot index so the whole payload stays one contiguous structure.

use serde::Serialize;
use zerocopy::little_endian::U16;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::error::KeyboardError;
use crate::keycode::KeyCode;
use vial_transport::protocol::dynamic;

/// Raw wire layout of one tap-dance slot. `U16` is alignment-1, so the
/// struct is exactly 11 bytes with no padding.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
struct WireEntry {
    marker: u8,
    tap: U16,
    hold: U16,
    doubletap: U16,
    taphold: U16,
    tapping_term: U16,
}

/// One tap-dance slot in editable form: keycodes as canonical strings,
/// tapping term in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TapDance {
    pub tdid: u8,
    pub tap: String,
    pub hold: String,
    pub doubletap: String,
    pub taphold: String,
    pub tapping_term: u16,
}

impl TapDance {
    /// Decode a fetch response body into an editable record.
    ///
    /// `data` is the response starting at the status byte; anything past
    /// the 11-byte entry is padding and ignored.
    pub fn from_entry_bytes(tdid: u8, data: &[u8]) -> Result<Self, KeyboardError> {
        let (entry, _) = WireEntry::read_from_prefix(data).map_err(|_| {
            KeyboardError::UnexpectedResponse(format!(
                "tap-dance {tdid}: short entry ({} bytes)",
                data.len()
            ))
        })?;
        Ok(TapDance {
            tdid,
            tap: KeyCode(entry.tap.get()).to_string(),
            hold: KeyCode(entry.hold.get()).to_string(),
            doubletap: KeyCode(entry.doubletap.get()).to_string(),
            taphold: KeyCode(entry.taphold.get()).to_string(),
            tapping_term: entry.tapping_term.get(),
        })
    }

    /// Encode the push payload: set sub-opcode, slot index, then the five
    /// little-endian fields. Fails on any unparseable keycode string; a
    /// record that round-tripped through [`from_entry_bytes`] always
    /// encodes (hex literals parse back).
    ///
    /// [`from_entry_bytes`]: TapDance::from_entry_bytes
    pub fn to_set_payload(&self) -> Result<Vec<u8>, KeyboardError> {
        let entry = WireEntry {
            marker: self.tdid,
            tap: U16::new(self.tap.parse::<KeyCode>()?.0),
            hold: U16::new(self.hold.parse::<KeyCode>()?.0),
            doubletap: U16::new(self.doubletap.parse::<KeyCode>()?.0),
            taphold: U16::new(self.taphold.parse::<KeyCode>()?.0),
            tapping_term: U16::new(self.tapping_term),
        };
        let mut payload = Vec::with_capacity(1 + size_of::<WireEntry>());
        payload.push(dynamic::TAP_DANCE_SET);
        payload.extend_from_slice(entry.as_bytes());
        Ok(payload)
    }
}
