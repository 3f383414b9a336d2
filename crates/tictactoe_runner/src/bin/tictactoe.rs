//! Headless tic-tac-toe runner.
//!
//! Plays the configured number of rounds between two random players and
//! prints each round's outcome to stdout. Logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use tictactoe_runner::{Cli, Runner};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.resolve_config().context("Failed to resolve configuration")?;
    info!(
        board_size = config.board_size(),
        rounds = config.rounds(),
        "Starting tic-tac-toe runner"
    );

    let json = *config.json();
    let mut runner = Runner::new(config)?;
    let tally = runner.run(|summary| {
        if json {
            match serde_json::to_string(summary) {
                Ok(line) => println!("{}", line),
                Err(e) => warn!(error = %e, "Failed to serialize round summary"),
            }
        } else {
            println!("{}\n", summary);
        }
    })?;

    if !json {
        println!("{}", tally);
    }
    Ok(())
}
