//! Timed effects attached to characters.
//!
//! An effect is fixed once created except for its turn counter, which
//! its owner winds down at every start-of-turn resolution.

use serde::{Deserialize, Serialize};

/// Probability stat a buff can raise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Parry,
    Crit,
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stat::Parry => write!(f, "parry"),
            Stat::Crit => write!(f, "crit"),
        }
    }
}

/// What an effect does while active.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Loses `per_turn` health at each tick. Never parried.
    DamageOverTime { per_turn: u32 },
    /// Regains `per_turn` health at each tick, up to max health.
    HealOverTime { per_turn: u32 },
    /// Raises `stat` by `bonus` while active. No per-tick value.
    StatBuff { stat: Stat, bonus: f64 },
}

/// An active timed effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    name: String,
    kind: EffectKind,
    turns_remaining: u32,
}

impl Effect {
    /// Damage-over-time effect.
    pub fn damage_over_time(name: impl Into<String>, per_turn: u32, turns: u32) -> Self {
        Self::new(name, EffectKind::DamageOverTime { per_turn }, turns)
    }

    /// Heal-over-time effect.
    pub fn heal_over_time(name: impl Into<String>, per_turn: u32, turns: u32) -> Self {
        Self::new(name, EffectKind::HealOverTime { per_turn }, turns)
    }

    /// Stat buff effect.
    pub fn stat_buff(name: impl Into<String>, stat: Stat, bonus: f64, turns: u32) -> Self {
        Self::new(name, EffectKind::StatBuff { stat, bonus }, turns)
    }

    /// Create an effect. `turns` is raised to 1 if zero so every effect
    /// ticks at least once.
    pub fn new(name: impl Into<String>, kind: EffectKind, turns: u32) -> Self {
        Self {
            name: name.into(),
            kind,
            turns_remaining: turns.max(1),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    #[must_use]
    pub fn turns_remaining(&self) -> u32 {
        self.turns_remaining
    }

    /// Bonus this effect adds to `stat` (0.0 unless it is a matching buff).
    #[must_use]
    pub fn bonus_for(&self, stat: Stat) -> f64 {
        match self.kind {
            EffectKind::StatBuff { stat: s, bonus } if s == stat => bonus,
            _ => 0.0,
        }
    }

    /// Count down one turn.
    pub(crate) fn tick_down(&mut self) {
        self.turns_remaining = self.turns_remaining.saturating_sub(1);
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.turns_remaining == 0
    }
}

/// Health change applied by one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickChange {
    Damage(u32),
    Heal(u32),
    /// Buffs have no tick value.
    None,
}

/// One effect's contribution to a start-of-turn resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// Effect name.
    pub effect: String,
    /// Health actually changed by the tick, after clamping.
    pub change: TickChange,
    /// Owner's health right after this tick.
    pub health: u32,
    /// Whether the effect ran out and was removed in this pass.
    pub expired: bool,
}
