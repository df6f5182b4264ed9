//! homelink - an interactive command-line client for the smart-home
//! REST service.
//!
//! The shell reads one command per line, performs the corresponding
//! authenticated HTTP call, and prints the result. Access-token expiry
//! is handled transparently by the core client.

mod commands;

use std::io::{self, Write};

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use homelink_core::{ApiClient, Config};

/// License text bundled into the binary, shown by the `license`
/// command. Startup refuses to continue without it.
pub const LICENSE_TEXT: &str = include_str!("../../../LICENSE");

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    if LICENSE_TEXT.trim().is_empty() {
        eprintln!("homelink: bundled license text is missing");
        std::process::exit(1);
    }

    init_tracing();
    info!("homelink starting");

    let mut config = Config::load()?;
    let client = ApiClient::new(&config)?;

    println!("homelink {}", env!("CARGO_PKG_VERSION"));
    println!("This program comes with ABSOLUTELY NO WARRANTY; type `license` for details.");
    println!("Type `help` for the command list.");
    println!();

    loop {
        print!(">>> ");
        io::stdout().flush()?;
        // Lock stdin per read; commands prompt for input themselves
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            // EOF ends the shell like an explicit exit
            break;
        }
        match commands::dispatch(&client, &mut config, &line).await {
            commands::LoopAction::Continue => {}
            commands::LoopAction::Quit => break,
        }
    }

    info!("homelink shutting down");
    Ok(())
}
