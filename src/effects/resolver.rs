//! Ability resolution - applying payloads to characters.
//!
//! The `EffectResolver` turns an [`AbilityPayload`] into state changes on
//! the actor and its target. It never touches usage budgets; the owning
//! character spends a use only after resolution succeeds.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ability::AbilityPayload;
use super::targeting::AbilityTarget;
use crate::characters::{Character, HitOutcome};
use crate::core::{ActionError, RandomSource};

/// What a resolved ability did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityOutcome {
    /// A direct hit, parried or not.
    Struck(HitOutcome),
    /// An effect was attached (to the target or to the actor).
    EffectAttached { effect: String, turns: u32 },
    /// The actor healed by `amount` (after the max-health clamp).
    Healed { amount: u32, health: u32 },
}

/// Applies ability payloads.
pub struct EffectResolver;

impl EffectResolver {
    /// Resolve `payload` from `actor` onto `target`.
    ///
    /// Fails without mutating anything when the payload needs an opponent
    /// but got the actor.
    pub fn resolve<R: RandomSource>(
        payload: AbilityPayload,
        actor: &mut Character,
        target: AbilityTarget<'_>,
        rng: &mut R,
    ) -> Result<AbilityOutcome, ActionError> {
        match payload {
            AbilityPayload::Strike { damage } => {
                let AbilityTarget::Other(target) = target else {
                    return Err(ActionError::invalid("this ability needs an opponent"));
                };
                debug!(actor = actor.name(), target = target.name(), damage, "ability strike");
                Ok(AbilityOutcome::Struck(target.take_damage(damage, rng)))
            }

            AbilityPayload::Afflict(effect) => {
                let AbilityTarget::Other(target) = target else {
                    return Err(ActionError::invalid("this ability needs an opponent"));
                };
                let outcome = AbilityOutcome::EffectAttached {
                    effect: effect.name().to_string(),
                    turns: effect.turns_remaining(),
                };
                debug!(target = target.name(), effect = effect.name(), "effect attached");
                target.attach_effect(effect);
                Ok(outcome)
            }

            AbilityPayload::Fortify(effect) => {
                let outcome = AbilityOutcome::EffectAttached {
                    effect: effect.name().to_string(),
                    turns: effect.turns_remaining(),
                };
                debug!(actor = actor.name(), effect = effect.name(), "buff attached");
                actor.attach_effect(effect);
                Ok(outcome)
            }

            AbilityPayload::Restore { amount } => {
                let healed = actor.heal(amount);
                debug!(actor = actor.name(), healed, health = actor.health(), "healed");
                Ok(AbilityOutcome::Healed {
                    amount: healed,
                    health: actor.health(),
                })
            }
        }
    }
}
