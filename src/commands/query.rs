//! Query (read-only) command handlers.

use super::{open_keyboard, CommandResult};
use vial_keyboard::TapDance;

/// Get keyboard identity and dynamic entry counts
pub async fn info() -> CommandResult {
    let keyboard = open_keyboard()?;
    let dev = keyboard.transport().device_info();
    println!(
        "Device:        {} (VID={:04X} PID={:04X})",
        dev.label(),
        dev.vid,
        dev.pid
    );

    let id = keyboard.keyboard_id().await?;
    println!("Vial protocol: {}", id.vial_protocol);
    println!("Keyboard UID:  {:016X}", id.uid);

    let counts = keyboard.dynamic_entry_counts().await?;
    println!("Tap-dances:    {}", counts.tapdance);
    println!("Combos:        {}", counts.combo);
    println!("Key overrides: {}", counts.key_override);
    Ok(())
}

/// Get tap-dance slots: the full table, or one slot by index
pub async fn tapdance(tdid: Option<u8>, json: bool) -> CommandResult {
    let keyboard = open_keyboard()?;
    let table = keyboard.get_tapdances().await?;

    let selected: Vec<&TapDance> = match tdid {
        Some(idx) => {
            let td = table
                .iter()
                .find(|td| td.tdid == idx)
                .ok_or_else(|| format!("No tap-dance slot {idx} (device has {})", table.len()))?;
            vec![td]
        }
        None => table.iter().collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
        return Ok(());
    }

    println!("TD  TAP             HOLD            DOUBLETAP       TAPHOLD         TERM");
    for td in selected {
        println!(
            "{:<3} {:<15} {:<15} {:<15} {:<15} {}ms",
            td.tdid, td.tap, td.hold, td.doubletap, td.taphold, td.tapping_term
        );
    }
    Ok(())
}
