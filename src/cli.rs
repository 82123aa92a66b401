// CLI definitions using clap

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vialctl")]
#[command(author, version, about = "Vial keyboard tap-dance and keycode tool")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging (repeat for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    // === Query Commands ===
    /// Get Vial protocol version, keyboard UID and dynamic entry counts
    #[command(visible_aliases = ["id", "i"])]
    Info,

    /// Get tap-dance slots (all, or one by index)
    #[command(visible_aliases = ["td", "t"])]
    Tapdance {
        /// Slot index; omit for the whole table
        tdid: Option<u8>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    // === Set Commands ===
    /// Set fields of one tap-dance slot (unset fields keep their value)
    #[command(visible_alias = "std")]
    SetTapdance {
        /// Slot index
        tdid: u8,
        /// Keycode on single tap (e.g. KC_A, LSFT(KC_A), 0x0204)
        #[arg(long)]
        tap: Option<String>,
        /// Keycode while held
        #[arg(long)]
        hold: Option<String>,
        /// Keycode on double tap
        #[arg(long)]
        doubletap: Option<String>,
        /// Keycode on tap then hold
        #[arg(long)]
        taphold: Option<String>,
        /// Tapping term in milliseconds
        #[arg(long)]
        term: Option<u16>,
    },

    // === Utility Commands ===
    /// List connected Vial raw HID interfaces
    #[command(visible_aliases = ["ls", "l"])]
    List,

    /// Parse or stringify a keycode, optionally composing modifiers onto it
    #[command(visible_aliases = ["kc", "k"])]
    Keycode {
        /// Keycode name, wrapper expression or hex literal
        input: String,
        /// Modifiers to compose (ctrl, shift, alt, gui, rhs, mtap)
        #[arg(short, long, value_delimiter = ',')]
        mods: Vec<String>,
    },
}
