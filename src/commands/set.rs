//! Set (write) command handlers.

use super::{open_keyboard, CommandResult};
use vial_keyboard::KeyCode;

/// Patch one tap-dance slot: read-modify-write so unset fields survive.
pub async fn set_tapdance(
    tdid: u8,
    tap: Option<String>,
    hold: Option<String>,
    doubletap: Option<String>,
    taphold: Option<String>,
    term: Option<u16>,
) -> CommandResult {
    let keyboard = open_keyboard()?;
    let counts = keyboard.dynamic_entry_counts().await?;
    if tdid >= counts.tapdance {
        return Err(format!(
            "No tap-dance slot {tdid} (device has {})",
            counts.tapdance
        )
        .into());
    }

    // Validate inputs before touching the device
    for field in [&tap, &hold, &doubletap, &taphold].into_iter().flatten() {
        field.parse::<KeyCode>()?;
    }

    let table = keyboard.get_tapdance_table(counts.tapdance).await?;
    let mut td = table[tdid as usize].clone();
    if let Some(v) = tap {
        td.tap = v;
    }
    if let Some(v) = hold {
        td.hold = v;
    }
    if let Some(v) = doubletap {
        td.doubletap = v;
    }
    if let Some(v) = taphold {
        td.taphold = v;
    }
    if let Some(v) = term {
        td.tapping_term = v;
    }

    keyboard.push_tapdance(&td).await?;
    println!(
        "TD{}: tap={} hold={} doubletap={} taphold={} term={}ms",
        td.tdid, td.tap, td.hold, td.doubletap, td.taphold, td.tapping_term
    );
    Ok(())
}
