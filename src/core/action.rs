//! Actions a character can take on its turn, and what came of them.
//!
//! Exactly one action is accepted per turn:
//! - "Attack" = basic attack on a living opponent
//! - "Use ability" = one ability slot, with a target when the ability needs one
//! - "Pass" = do nothing

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::characters::AttackOutcome;
use crate::effects::{AbilityKind, AbilityOutcome};

/// A player's chosen action.
///
/// ## Example
///
/// ```
/// use turn_arena::core::{Action, PlayerId};
///
/// let hit = Action::attack(PlayerId::new(1));
/// let burn = Action::ability_on(1, PlayerId::new(1));
/// let heal = Action::ability(0); // self-targeting abilities need no target
///
/// assert_eq!(hit.target(), Some(PlayerId::new(1)));
/// assert_eq!(heal.target(), None);
/// assert!(Action::Pass.is_pass());
/// # let _ = burn;
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Basic attack.
    Attack { target: PlayerId },
    /// Use the ability in `slot` (0-based).
    /// `target` may be omitted for abilities that act on their user.
    UseAbility {
        slot: usize,
        target: Option<PlayerId>,
    },
    /// Skip the action phase.
    Pass,
}

impl Action {
    /// Basic attack on `target`.
    #[must_use]
    pub fn attack(target: PlayerId) -> Self {
        Self::Attack { target }
    }

    /// Ability use without an explicit target.
    #[must_use]
    pub fn ability(slot: usize) -> Self {
        Self::UseAbility { slot, target: None }
    }

    /// Ability use aimed at `target`.
    #[must_use]
    pub fn ability_on(slot: usize, target: PlayerId) -> Self {
        Self::UseAbility {
            slot,
            target: Some(target),
        }
    }

    /// The explicitly chosen target, if any.
    #[must_use]
    pub fn target(&self) -> Option<PlayerId> {
        match self {
            Action::Attack { target } => Some(*target),
            Action::UseAbility { target, .. } => *target,
            Action::Pass => None,
        }
    }

    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Action::Pass)
    }
}

/// What an accepted action did.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ActionOutcome {
    Attacked {
        target: PlayerId,
        attack: AttackOutcome,
    },
    AbilityUsed {
        slot: usize,
        ability: AbilityKind,
        /// Who the ability landed on (the actor for self-targeting abilities).
        target: PlayerId,
        outcome: AbilityOutcome,
        uses_remaining: u32,
    },
    Passed,
}

/// An accepted action with its context, kept in match history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Round the action was taken in (starts at 1).
    pub round: u32,

    /// Who acted.
    pub actor: PlayerId,

    /// The action as submitted.
    pub action: Action,

    /// What it did.
    pub outcome: ActionOutcome,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(round: u32, actor: PlayerId, action: Action, outcome: ActionOutcome) -> Self {
        Self {
            round,
            actor,
            action,
            outcome,
        }
    }
}
