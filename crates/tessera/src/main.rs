mod cli;
mod models;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{App, Commands};

fn main() -> Result<()> {
    let app = App::parse();

    // Completions must work even when the config is broken.
    if let Commands::Completions(arg) = &app.cmd {
        cli::setup::completions(arg);
        return Ok(());
    }

    let settings = tessera_config::load(app.config.as_deref()).context("failed to load settings")?;
    init_logging(&settings.log.level, app.verbose);
    tracing::debug!(?settings, "settings loaded");

    cli::dispatch(app.cmd, &settings)
}

/// `RUST_LOG` wins; otherwise the configured level, raised by `-v`.
fn init_logging(level: &str, verbose: u8) {
    let level = match verbose {
        0 => level,
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
