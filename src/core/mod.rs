//! Core engine types: players, roster, actions, errors, RNG, configuration.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;

pub use player::{PlayerId, Roster};
pub use rng::{GameRng, GameRngState, RandomSource, ScriptedRolls};
pub use config::{MatchConfig, MAX_PLAYERS, MIN_PLAYERS};
pub use action::{Action, ActionOutcome, ActionRecord};
pub use error::{ActionError, ConfigError};
