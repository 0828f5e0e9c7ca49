// Allow common clippy pedantic lints
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]

//! ga-activity-loader CLI
//!
//! Loads per-client Google Analytics activity into a new warehouse table

use clap::Parser;
use ga_activity_loader::cli::{Cli, Runner};
use ga_activity_loader::config::Settings;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Diagnostics on stderr; stdout carries the load progress
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    let result = match Settings::from_env() {
        Ok(settings) => Runner::new(cli, settings).run().await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
