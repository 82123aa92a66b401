//! Utility command handlers.

use super::CommandResult;
use vial_keyboard::{KeyCode, Modifier, ModifierSet};
use vial_transport::HidDiscovery;

/// List connected Vial raw HID interfaces
pub fn list() -> CommandResult {
    let devices = HidDiscovery::new().list_devices()?;
    if devices.is_empty() {
        println!("No Vial keyboards found");
        return Ok(());
    }
    for dev in devices {
        println!(
            "{:04X}:{:04X}  {}  {}",
            dev.vid,
            dev.pid,
            dev.label(),
            dev.device_path
        );
    }
    Ok(())
}

/// Parse or stringify a keycode, optionally composing modifiers onto it
pub fn keycode(input: &str, mods: &[String]) -> CommandResult {
    let mut set = ModifierSet::new();
    for name in mods {
        set.toggle(name.parse::<Modifier>()?);
    }

    let base = input.parse::<KeyCode>()?;
    let composed = base.compose(set.mask());

    println!("Input:    {input}");
    println!("Code:     0x{:04x}", base.0);
    println!("Name:     {base}");
    if !set.is_empty() {
        println!("Mask:     0x{:04x} ({set})", set.mask());
        println!("Composed: 0x{:04x}  {composed}", composed.0);
        if !composed.is_known() {
            println!("Note:     composed code has no canonical name");
        }
    }
    Ok(())
}
