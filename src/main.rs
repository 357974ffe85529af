//! Console Othello.

mod cli;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use othello::Session;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config();
    config.validate().context("invalid game settings")?;
    info!(?config, "starting game");

    let stdin = io::stdin();
    let mut session = Session::new(&config, stdin.lock(), io::stdout())?;
    session.run().context("console I/O failed")?;

    Ok(())
}
