//! Command-line interface for the headless runner.

use crate::{ConfigError, RunnerConfig};
use clap::Parser;
use std::path::PathBuf;
use tracing::instrument;

/// Plays tic-tac-toe rounds between two random-move players
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "tictactoe")]
#[command(about = "Headless NxN tic-tac-toe between random players", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Board dimension N (overrides config)
    #[arg(short, long)]
    pub size: Option<usize>,

    /// Number of rounds to play (overrides config)
    #[arg(short, long)]
    pub rounds: Option<usize>,

    /// Seed for reproducible runs (overrides config)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pause between rounds in milliseconds (overrides config)
    #[arg(long)]
    pub tick_millis: Option<u64>,

    /// Print round summaries as JSON lines
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Resolves the effective configuration: file (or defaults), then flags.
    #[instrument(skip(self))]
    pub fn resolve_config(&self) -> Result<RunnerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => RunnerConfig::from_file(path)?,
            None => RunnerConfig::default(),
        };
        if let Some(size) = self.size {
            config = config.with_board_size(size);
        }
        if let Some(rounds) = self.rounds {
            config = config.with_rounds(rounds);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(tick) = self.tick_millis {
            config = config.with_tick_millis(tick);
        }
        if self.json {
            config = config.with_json(true);
        }
        config.validate()?;
        Ok(config)
    }
}
