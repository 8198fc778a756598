//! Characters - runtime combatant state.
//!
//! A `Character` owns its vitals, its active effects (oldest first) and its
//! two abilities. All rule resolution that touches a single combatant lives
//! here: start-of-turn ticks, parry, crit, damage and ability use.
//!
//! ## Health
//!
//! Health is clamped to `0..=max_health` by every operation. A character at
//! 0 health is dead for the rest of the match: it can neither act nor be
//! targeted.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info};

use super::class::CharacterClass;
use crate::core::{ActionError, RandomSource};
use crate::effects::{
    Ability, AbilityListing, AbilityOutcome, AbilityTarget, Effect, EffectKind, EffectResolver,
    Stat, TargetSpec, TickChange, TickReport,
};

/// Ceiling for parry and crit after buffs.
pub const PROBABILITY_CAP: f64 = 0.95;

/// Result of one incoming hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitOutcome {
    /// The hit was fully negated.
    Parried,
    /// `amount` health was actually lost (clamped at 0), leaving `health`.
    Damaged { amount: u32, health: u32 },
}

impl HitOutcome {
    #[must_use]
    pub fn is_parried(&self) -> bool {
        matches!(self, HitOutcome::Parried)
    }
}

/// Result of a basic attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    /// Whether the crit roll succeeded.
    pub critical: bool,
    /// Damage sent at the target before parry.
    pub damage: u32,
    /// How the target took it.
    pub hit: HitOutcome,
}

/// A combatant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Character {
    name: String,
    class: CharacterClass,
    max_health: u32,
    health: u32,
    base_damage: u32,
    base_parry: f64,
    base_crit: f64,
    /// Active effects in attach order.
    effects: SmallVec<[Effect; 4]>,
    abilities: SmallVec<[Ability; 2]>,
}

impl Character {
    /// Create a character from its class preset, at full health.
    pub fn new(class: CharacterClass, name: impl Into<String>) -> Self {
        let preset = class.preset();
        Self {
            name: name.into(),
            class,
            max_health: preset.max_health,
            health: preset.max_health,
            base_damage: preset.base_damage,
            base_parry: preset.parry,
            base_crit: preset.crit,
            effects: SmallVec::new(),
            abilities: preset.abilities.into_iter().map(Ability::new).collect(),
        }
    }

    // === Vitals ===

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn class(&self) -> CharacterClass {
        self.class
    }

    #[must_use]
    pub fn health(&self) -> u32 {
        self.health
    }

    #[must_use]
    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    #[must_use]
    pub fn base_damage(&self) -> u32 {
        self.base_damage
    }

    #[must_use]
    pub fn base_parry(&self) -> f64 {
        self.base_parry
    }

    #[must_use]
    pub fn base_crit(&self) -> f64 {
        self.base_crit
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Set health directly, clamped to max health. A dead character
    /// stays dead.
    ///
    /// Scenario setup only; combat goes through
    /// [`take_damage`](Self::take_damage) and [`heal`](Self::heal).
    #[cfg(any(test, feature = "test-util"))]
    pub fn set_health(&mut self, health: u32) {
        if self.is_alive() {
            self.health = health.min(self.max_health);
        }
    }

    /// Restore up to `amount` health. Returns what was actually gained.
    /// The dead gain nothing.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        let before = self.health;
        self.health = self.health.saturating_add(amount).min(self.max_health);
        self.health - before
    }

    /// Returns what was actually lost.
    fn lose_health(&mut self, amount: u32) -> u32 {
        let before = self.health;
        self.health = self.health.saturating_sub(amount);
        before - self.health
    }

    // === Effects ===

    /// Active effects, oldest first.
    #[must_use]
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// Attach an effect. It ticks at this character's next turn start.
    pub(crate) fn attach_effect(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    /// Attach an effect outside of ability resolution.
    #[cfg(any(test, feature = "test-util"))]
    pub fn add_effect(&mut self, effect: Effect) {
        self.attach_effect(effect);
    }

    /// Base value of `stat` plus every active buff to it, capped at 0.95.
    #[must_use]
    pub fn current_stat(&self, stat: Stat) -> f64 {
        let base = match stat {
            Stat::Parry => self.base_parry,
            Stat::Crit => self.base_crit,
        };
        let bonus: f64 = self.effects.iter().map(|e| e.bonus_for(stat)).sum();
        (base + bonus).min(PROBABILITY_CAP)
    }

    #[must_use]
    pub fn current_parry(&self) -> f64 {
        self.current_stat(Stat::Parry)
    }

    #[must_use]
    pub fn current_crit(&self) -> f64 {
        self.current_stat(Stat::Crit)
    }

    /// Tick every active effect once, oldest first, then drop the ones
    /// that ran out.
    ///
    /// Damage ticks are never parried. Each effect loses one turn; an
    /// effect on its last turn still applies before it is removed.
    pub fn resolve_start_of_turn(&mut self) -> Vec<TickReport> {
        let was_alive = self.is_alive();
        let mut reports = Vec::with_capacity(self.effects.len());

        for i in 0..self.effects.len() {
            let change = match self.effects[i].kind() {
                EffectKind::DamageOverTime { per_turn } => {
                    TickChange::Damage(self.lose_health(per_turn))
                }
                EffectKind::HealOverTime { per_turn } => TickChange::Heal(self.heal(per_turn)),
                EffectKind::StatBuff { .. } => TickChange::None,
            };

            let effect = &mut self.effects[i];
            effect.tick_down();
            debug!(
                character = %self.name,
                effect = effect.name(),
                ?change,
                health = self.health,
                turns_remaining = effect.turns_remaining(),
                "effect tick"
            );
            reports.push(TickReport {
                effect: effect.name().to_string(),
                change,
                health: self.health,
                expired: effect.is_expired(),
            });
        }

        self.effects.retain(|e| !e.is_expired());

        if was_alive && !self.is_alive() {
            info!(character = %self.name, "died from effects");
        }
        reports
    }

    // === Combat ===

    /// Receive one hit of `amount`. Draws one roll for the parry check.
    ///
    /// A dead character draws nothing and loses nothing.
    pub fn take_damage<R: RandomSource>(&mut self, amount: u32, rng: &mut R) -> HitOutcome {
        if !self.is_alive() {
            return HitOutcome::Damaged {
                amount: 0,
                health: 0,
            };
        }

        let roll = rng.roll();
        if roll <= self.current_parry() {
            debug!(character = %self.name, roll, "parried");
            return HitOutcome::Parried;
        }

        let lost = self.lose_health(amount);
        debug!(character = %self.name, amount, lost, health = self.health, "took damage");
        if !self.is_alive() {
            info!(character = %self.name, "defeated");
        }
        HitOutcome::Damaged {
            amount: lost,
            health: self.health,
        }
    }

    /// Basic attack on `target`: one crit roll, then the target's parry roll.
    pub fn perform_basic_attack<R: RandomSource>(
        &self,
        target: &mut Character,
        rng: &mut R,
    ) -> Result<AttackOutcome, ActionError> {
        self.ensure_can_act()?;
        ensure_targetable(target)?;

        let critical = rng.roll() <= self.current_crit();
        let damage = if critical {
            self.base_damage.saturating_mul(2)
        } else {
            self.base_damage
        };
        debug!(attacker = %self.name, target = %target.name, critical, damage, "basic attack");

        let hit = target.take_damage(damage, rng);
        Ok(AttackOutcome {
            critical,
            damage,
            hit,
        })
    }

    // === Abilities ===

    #[must_use]
    pub fn abilities(&self) -> &[Ability] {
        &self.abilities
    }

    #[must_use]
    pub fn ability(&self, slot: usize) -> Option<&Ability> {
        self.abilities.get(slot)
    }

    /// Ability menu rows in slot order.
    #[must_use]
    pub fn list_abilities(&self) -> Vec<AbilityListing> {
        self.abilities.iter().map(Ability::listing).collect()
    }

    /// Use the ability in `slot` on `target`.
    ///
    /// Rejected without side effects when the slot is out of range, the
    /// ability is exhausted, or the target does not fit the ability. A use
    /// is spent only after the ability resolved.
    pub fn use_ability<R: RandomSource>(
        &mut self,
        slot: usize,
        target: AbilityTarget<'_>,
        rng: &mut R,
    ) -> Result<AbilityOutcome, ActionError> {
        self.ensure_can_act()?;

        let ability = self.abilities.get(slot).ok_or_else(|| {
            ActionError::invalid(format!(
                "ability slot {slot} out of range (have {})",
                self.abilities.len()
            ))
        })?;
        ability.ensure_available()?;
        let kind = ability.kind();

        if !target.matches(kind.target_spec()) {
            return Err(ActionError::invalid(match kind.target_spec() {
                TargetSpec::Actor => format!("{kind} can only target its user"),
                TargetSpec::Opponent => format!("{kind} needs an opponent"),
            }));
        }
        if let AbilityTarget::Other(other) = &target {
            ensure_targetable(other)?;
        }

        debug!(actor = %self.name, ability = %kind, ?target, "using ability");
        let outcome = EffectResolver::resolve(kind.payload(self.base_damage), self, target, rng)?;
        self.abilities[slot].consume();
        Ok(outcome)
    }

    fn ensure_can_act(&self) -> Result<(), ActionError> {
        if self.is_alive() {
            Ok(())
        } else {
            Err(ActionError::invalid(format!("{} is dead and cannot act", self.name)))
        }
    }

    // === Display ===

    /// Name, health, base damage, current parry and crit.
    #[must_use]
    pub fn status_line(&self) -> String {
        format!(
            "{} HP:{}/{} DMG:{} PAR:{:.2} CRIT:{:.2}",
            self.name,
            self.health,
            self.max_health,
            self.base_damage,
            self.current_parry(),
            self.current_crit()
        )
    }
}

fn ensure_targetable(target: &Character) -> Result<(), ActionError> {
    if target.is_alive() {
        Ok(())
    } else {
        Err(ActionError::invalid(format!("{} is dead", target.name)))
    }
}

impl std::fmt::Display for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.status_line())
    }
}
