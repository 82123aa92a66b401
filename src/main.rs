//! Vial Keyboard CLI
//!
//! A command-line interface for inspecting and editing tap-dance slots
//! on Vial-compatible keyboards.

use clap::Parser;
use tracing_subscriber::EnvFilter;

// CLI definitions
mod cli;
use cli::{Cli, Commands};

// Command handlers (split from main.rs)
mod commands;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        None => {
            // Default: show device info
            commands::query::info().await?;
        }

        // === Query Commands ===
        Some(Commands::Info) => {
            commands::query::info().await?;
        }
        Some(Commands::Tapdance { tdid, json }) => {
            commands::query::tapdance(tdid, json).await?;
        }

        // === Set Commands ===
        Some(Commands::SetTapdance {
            tdid,
            tap,
            hold,
            doubletap,
            taphold,
            term,
        }) => {
            commands::set::set_tapdance(tdid, tap, hold, doubletap, taphold, term).await?;
        }

        // === Utility Commands ===
        Some(Commands::List) => {
            commands::utility::list()?;
        }
        Some(Commands::Keycode { input, mods }) => {
            commands::utility::keycode(&input, &mods)?;
        }
    }

    Ok(())
}
