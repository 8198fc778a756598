//! Match configuration.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Fewest characters a match accepts.
pub const MIN_PLAYERS: usize = 2;

/// Most characters a match accepts.
pub const MAX_PLAYERS: usize = 4;

/// Match configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Number of full rounds before the match is decided on health.
    pub max_rounds: u32,

    /// Seed for the match RNG.
    /// Same seed and same decisions replay the same match.
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_rounds: 10,
            seed: 42,
        }
    }
}

impl MatchConfig {
    /// Set the round limit.
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = rounds;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check this configuration against a roster size.
    pub fn validate(&self, player_count: usize) -> Result<(), ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
            return Err(ConfigError::PlayerCount {
                count: player_count,
                min: MIN_PLAYERS,
                max: MAX_PLAYERS,
            });
        }
        if self.max_rounds == 0 {
            return Err(ConfigError::NoRounds);
        }
        Ok(())
    }
}
