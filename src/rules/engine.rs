//! Match results and the decision-provider seam.
//!
//! The engine never reads input itself. Whoever drives a match (a menu,
//! a test script) implements `DecisionProvider` and is asked for exactly
//! one action per turn, as many times as it takes to get a valid one.

use serde::{Deserialize, Serialize};

use crate::core::{Action, ActionError, ActionOutcome, PlayerId, Roster};
use crate::effects::TickReport;

/// How a finished match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    /// Everyone else died.
    Elimination { winner: PlayerId },
    /// Round limit reached; `winner` had the most health.
    /// Ties go to the earliest character in roster order.
    RoundLimit { winner: PlayerId, health: u32 },
    /// Nobody is left standing.
    NoSurvivors,
}

impl MatchResult {
    /// The winner, if there is one.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            MatchResult::Elimination { winner } | MatchResult::RoundLimit { winner, .. } => {
                Some(*winner)
            }
            MatchResult::NoSurvivors => None,
        }
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner() == Some(player)
    }
}

/// Source of player decisions.
///
/// ## Implementation Notes
///
/// - `decide`: called until the engine accepts an action; may block
/// - `rejected`: explains why the last action was refused
/// - `turn_started` / `resolved`: notifications for display, no-ops by default
pub trait DecisionProvider {
    /// Choose an action for `actor`.
    fn decide(&mut self, roster: &Roster, actor: PlayerId) -> Action;

    /// The last action from `decide` was refused; `decide` will be asked again.
    fn rejected(&mut self, _actor: PlayerId, _action: &Action, _error: &ActionError) {}

    /// `actor`'s start-of-turn effects were resolved.
    fn turn_started(&mut self, _roster: &Roster, _actor: PlayerId, _ticks: &[TickReport]) {}

    /// An action was accepted and applied.
    fn resolved(&mut self, _roster: &Roster, _actor: PlayerId, _outcome: &ActionOutcome) {}
}

impl<F> DecisionProvider for F
where
    F: FnMut(&Roster, PlayerId) -> Action,
{
    fn decide(&mut self, roster: &Roster, actor: PlayerId) -> Action {
        self(roster, actor)
    }
}
