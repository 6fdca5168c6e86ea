use crate::agents::PlayerModelKind;
use std::path::PathBuf;

/// Most players one 52-card deck can serve: 23 * 2 hole cards + 5 on board.
pub const MAX_PLAYERS: usize = 23;
pub const MIN_PLAYERS: usize = 2;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("players must be between 2 and 23, got {0}")]
    Players(usize),
    #[error("iterations must be greater than zero")]
    Iterations,
    #[error("invalid output directory '{}'", .0.display())]
    OutputDir(PathBuf),
}

/// Settings for one simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    pub players: usize,
    pub iterations: u64,
    pub output_dir: PathBuf,
    /// Append distribution rows to existing report files instead of
    /// rewriting them with a header.
    pub append_output: bool,
    pub stats_winning_hand: bool,
    pub stats_hole_cards: bool,
    pub player_model: PlayerModelKind,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            players: 10,
            iterations: 100_000_000,
            output_dir: PathBuf::from("."),
            append_output: false,
            stats_winning_hand: false,
            stats_hole_cards: false,
            player_model: PlayerModelKind::Showdown,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.players) {
            return Err(ConfigError::Players(self.players));
        }
        if self.iterations == 0 {
            return Err(ConfigError::Iterations);
        }
        Ok(())
    }

    /// Reports are written after the whole run, so check the directory first.
    pub fn check_output_dir(&self) -> Result<(), ConfigError> {
        if self.output_dir.is_dir() {
            Ok(())
        } else {
            Err(ConfigError::OutputDir(self.output_dir.clone()))
        }
    }
}
