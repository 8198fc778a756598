//! The fixed ability catalog and per-character usage budgets.
//!
//! Each [`AbilityKind`] only knows what it does ([`AbilityPayload`]);
//! the usage bookkeeping lives once in [`Ability`].

use serde::{Deserialize, Serialize};

use super::effect::{Effect, Stat};
use super::targeting::TargetSpec;
use crate::core::ActionError;

/// How many times an ability may be used in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Usage {
    /// Exactly one use.
    SingleUse,
    /// A fixed number of uses.
    MultiUse(u32),
}

impl Usage {
    /// Uses available at match start.
    #[must_use]
    pub fn initial_uses(self) -> u32 {
        match self {
            Usage::SingleUse => 1,
            Usage::MultiUse(n) => n,
        }
    }
}

/// The eight abilities of the class catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityKind {
    CritBurst,
    PoisonBlade,
    ShieldUp,
    Crush,
    Fireball,
    Burn,
    Heal,
    HolyGuard,
}

/// What a resolved ability does, before defense is applied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AbilityPayload {
    /// Direct hit on the target; subject to parry.
    Strike { damage: u32 },
    /// Attach an effect to the target.
    Afflict(Effect),
    /// Attach an effect to the actor.
    Fortify(Effect),
    /// Heal the actor, up to max health.
    Restore { amount: u32 },
}

const HEAL_AMOUNT: u32 = 30;

impl AbilityKind {
    /// All abilities in class-catalog order.
    pub const ALL: [AbilityKind; 8] = [
        AbilityKind::CritBurst,
        AbilityKind::PoisonBlade,
        AbilityKind::ShieldUp,
        AbilityKind::Crush,
        AbilityKind::Fireball,
        AbilityKind::Burn,
        AbilityKind::Heal,
        AbilityKind::HolyGuard,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            AbilityKind::CritBurst => "Crit Burst",
            AbilityKind::PoisonBlade => "Poison Blade",
            AbilityKind::ShieldUp => "Shield Up",
            AbilityKind::Crush => "Crush",
            AbilityKind::Fireball => "Fireball",
            AbilityKind::Burn => "Burn",
            AbilityKind::Heal => "Heal",
            AbilityKind::HolyGuard => "Holy Guard",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            AbilityKind::CritBurst => "Heavy single-use damage",
            AbilityKind::PoisonBlade => "Poisons the target for 3 turns",
            AbilityKind::ShieldUp => "Raises parry for 2 turns",
            AbilityKind::Crush => "Heavy damage, several uses",
            AbilityKind::Fireball => "Heavy single-use damage",
            AbilityKind::Burn => "Burns the target for 2 turns",
            AbilityKind::Heal => "Heals the user",
            AbilityKind::HolyGuard => "Raises parry for 2 turns",
        }
    }

    #[must_use]
    pub fn usage(self) -> Usage {
        match self {
            AbilityKind::CritBurst | AbilityKind::Fireball => Usage::SingleUse,
            _ => Usage::MultiUse(2),
        }
    }

    /// Who the ability lands on.
    #[must_use]
    pub fn target_spec(self) -> TargetSpec {
        match self {
            AbilityKind::ShieldUp | AbilityKind::Heal | AbilityKind::HolyGuard => TargetSpec::Actor,
            _ => TargetSpec::Opponent,
        }
    }

    /// Build the payload for a user with `base_damage`.
    #[must_use]
    pub fn payload(self, base_damage: u32) -> AbilityPayload {
        match self {
            AbilityKind::CritBurst | AbilityKind::Fireball => AbilityPayload::Strike {
                damage: base_damage.saturating_mul(3),
            },
            AbilityKind::Crush => AbilityPayload::Strike {
                damage: base_damage.saturating_mul(2),
            },
            AbilityKind::PoisonBlade => {
                AbilityPayload::Afflict(Effect::damage_over_time("Poison", 5, 3))
            }
            AbilityKind::Burn => AbilityPayload::Afflict(Effect::damage_over_time("Burn", 7, 2)),
            AbilityKind::ShieldUp => {
                AbilityPayload::Fortify(Effect::stat_buff("Shield Up", Stat::Parry, 0.25, 2))
            }
            AbilityKind::HolyGuard => {
                AbilityPayload::Fortify(Effect::stat_buff("Holy Guard", Stat::Parry, 0.20, 2))
            }
            AbilityKind::Heal => AbilityPayload::Restore {
                amount: HEAL_AMOUNT,
            },
        }
    }
}

impl std::fmt::Display for AbilityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An ability owned by a character, with its remaining budget.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    kind: AbilityKind,
    uses_remaining: u32,
}

impl Ability {
    /// A fresh ability with its full budget.
    #[must_use]
    pub fn new(kind: AbilityKind) -> Self {
        Self {
            kind,
            uses_remaining: kind.usage().initial_uses(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> AbilityKind {
        self.kind
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    #[must_use]
    pub fn uses_remaining(&self) -> u32 {
        self.uses_remaining
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.uses_remaining == 0
    }

    /// Err with `AbilityExhausted` when no uses are left.
    pub fn ensure_available(&self) -> Result<(), ActionError> {
        if self.is_exhausted() {
            return Err(ActionError::AbilityExhausted {
                ability: self.name().to_string(),
            });
        }
        Ok(())
    }

    /// Spend one use after a successful execution.
    pub(crate) fn consume(&mut self) {
        self.uses_remaining = match self.kind.usage() {
            Usage::SingleUse => 0,
            Usage::MultiUse(_) => self.uses_remaining.saturating_sub(1),
        };
    }

    /// Menu entry for this ability.
    #[must_use]
    pub fn listing(&self) -> AbilityListing {
        AbilityListing {
            name: self.name(),
            uses_remaining: self.uses_remaining,
            description: self.kind.description(),
        }
    }
}

/// One row of a character's ability menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AbilityListing {
    pub name: &'static str,
    pub uses_remaining: u32,
    pub description: &'static str,
}

impl std::fmt::Display for AbilityListing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.uses_remaining == 0 {
            write!(f, "{} - (EXHAUSTED) - {}", self.name, self.description)
        } else {
            write!(
                f,
                "{} - uses: {} - {}",
                self.name, self.uses_remaining, self.description
            )
        }
    }
}
