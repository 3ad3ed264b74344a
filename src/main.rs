//! pcf - plugin option store CLI
//!
//! A stand-in host for plugconf-based plugins: opens a JSON option store,
//! drives a plugin's configuration through it, and inspects the persisted
//! options.

use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use plugconf::cli::Cli;

fn main() {
    init_logging();

    let cli = Cli::parse();

    if let Err(e) = cli.execute() {
        error!("Command failed: {}", e);
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "plugconf=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
