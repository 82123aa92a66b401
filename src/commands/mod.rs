//! Command handlers for the CLI application.
//!
//! This module organizes command handlers by category:
//! - `query`: Read-only commands (info, tapdance)
//! - `set`: Setting commands (set-tapdance)
//! - `utility`: Utility commands (list, keycode)

pub mod query;
pub mod set;
pub mod utility;

use std::sync::Arc;

use vial_keyboard::VialKeyboard;
use vial_transport::HidDiscovery;

/// Result type for command handlers
pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Open the first Vial raw HID interface found.
pub fn open_keyboard() -> Result<VialKeyboard, Box<dyn std::error::Error>> {
    let discovery = HidDiscovery::new();
    let transport = discovery.open_first()?;
    Ok(VialKeyboard::new(Arc::new(transport)))
}
