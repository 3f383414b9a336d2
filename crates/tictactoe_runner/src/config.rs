//! Runner configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strum::IntoEnumIterator;
use tictactoe_board::{BoardPiece, Glyphs};
use tracing::{debug, info, instrument};

/// Settings for a headless run.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Board dimension N.
    board_size: usize,

    /// Number of rounds to play.
    rounds: usize,

    /// Seed for reproducible runs; OS entropy when absent.
    seed: Option<u64>,

    /// Pause between rounds in milliseconds.
    tick_millis: u64,

    /// Glyphs used for the final board rendering.
    glyphs: Glyphs,

    /// Emit round summaries as JSON lines instead of text.
    json: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            board_size: 3,
            rounds: 1,
            seed: None,
            tick_millis: 0,
            glyphs: Glyphs::default(),
            json: false,
        }
    }
}

impl RunnerConfig {
    /// Loads configuration from a TOML file. Missing keys take their defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        info!(board_size = config.board_size, rounds = config.rounds, "Config loaded successfully");
        Ok(config)
    }

    /// Checks the board size and that every piece renders to a distinct glyph.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size == 0 {
            return Err(ConfigError::new("board_size must be at least 1"));
        }
        let glyphs: Vec<char> = BoardPiece::iter().map(|p| self.glyphs.glyph(p)).collect();
        for (i, glyph) in glyphs.iter().enumerate() {
            if glyphs[i + 1..].contains(glyph) {
                return Err(ConfigError::new(format!("Glyph {:?} is used for two pieces", glyph)));
            }
        }
        Ok(())
    }

    /// Overrides the board size.
    pub fn with_board_size(mut self, board_size: usize) -> Self {
        self.board_size = board_size;
        self
    }

    /// Overrides the number of rounds.
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    /// Overrides the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Overrides the pause between rounds.
    pub fn with_tick_millis(mut self, tick_millis: u64) -> Self {
        self.tick_millis = tick_millis;
        self
    }

    /// Switches summaries to JSON lines.
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error at the caller's location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
