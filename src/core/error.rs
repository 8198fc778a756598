//! Error types.
//!
//! Every error here is retryable: a rejected action leaves the match
//! untouched and the caller simply chooses again.

use serde::{Deserialize, Serialize};

/// Why a submitted action was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ActionError {
    /// Out-of-range ability or target index, or a target the action
    /// cannot be aimed at.
    #[error("Invalid selection: {reason}")]
    InvalidSelection { reason: String },

    /// The ability has no uses left.
    #[error("{ability} has no uses remaining")]
    AbilityExhausted { ability: String },

    /// A target is required but every other character is dead.
    #[error("No valid target")]
    NoValidTarget,

    /// No actor is waiting for an action (match not started,
    /// between turns, or already over).
    #[error("No turn in progress")]
    NoTurnInProgress,
}

impl ActionError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidSelection {
            reason: reason.into(),
        }
    }
}

/// Rejected match setup.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Match needs {min}-{max} players, got {count}")]
    PlayerCount { count: usize, min: usize, max: usize },

    #[error("Match needs at least one round")]
    NoRounds,
}
