//! Who an ability lands on.

use serde::{Deserialize, Serialize};

use crate::characters::Character;

/// Static targeting rule of an ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetSpec {
    /// Lands on the user; the caller never prompts for a target.
    Actor,
    /// Lands on one living opponent.
    Opponent,
}

impl TargetSpec {
    #[must_use]
    pub fn needs_target(self) -> bool {
        matches!(self, TargetSpec::Opponent)
    }
}

/// The concrete target handed to an ability use.
///
/// A character cannot be borrowed as both actor and target, so
/// self-targeting is spelled `Actor` rather than passing the user twice.
pub enum AbilityTarget<'a> {
    Actor,
    Other(&'a mut Character),
}

impl AbilityTarget<'_> {
    /// Whether this target satisfies `spec`.
    #[must_use]
    pub fn matches(&self, spec: TargetSpec) -> bool {
        matches!(
            (self, spec),
            (AbilityTarget::Actor, TargetSpec::Actor) | (AbilityTarget::Other(_), TargetSpec::Opponent)
        )
    }
}

impl std::fmt::Debug for AbilityTarget<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbilityTarget::Actor => f.write_str("Actor"),
            AbilityTarget::Other(c) => f.debug_tuple("Other").field(&c.name()).finish(),
        }
    }
}
