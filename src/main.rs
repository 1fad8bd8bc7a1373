use clap::Parser;
use ticklist::cli::commands::Cli;
use ticklist::cli::handlers;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so they never mix with command output.
/// Filter comes from `TICK_LOG` (e.g. `TICK_LOG=ticklist=debug`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("TICK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}
