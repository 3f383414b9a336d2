//! Headless orchestrator for repeated tic-tac-toe rounds.
//!
//! Two random-move players are seated each round, play until the board
//! reports a finish, and the board is reset for the next round.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod error;
mod runner;

pub use cli::Cli;
pub use config::{ConfigError, RunnerConfig};
pub use error::RunnerError;
pub use runner::{RoundSummary, Runner, Tally};
