//! Class presets - static character data.
//!
//! A `CharacterClass` fixes a character's stats and ability pair at
//! creation. Runtime state (health, effects, uses left) lives in
//! [`Character`].

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::character::Character;
use crate::core::ActionError;
use crate::effects::AbilityKind;

/// The four playable classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    Rogue,
    Tank,
    Wizard,
    Paladin,
}

/// Stats and abilities a class starts with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassPreset {
    pub max_health: u32,
    pub base_damage: u32,
    pub parry: f64,
    pub crit: f64,
    pub abilities: [AbilityKind; 2],
}

impl CharacterClass {
    /// All classes in menu order.
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Rogue,
        CharacterClass::Tank,
        CharacterClass::Wizard,
        CharacterClass::Paladin,
    ];

    #[must_use]
    pub fn preset(self) -> ClassPreset {
        match self {
            CharacterClass::Rogue => ClassPreset {
                max_health: 80,
                base_damage: 25,
                parry: 0.05,
                crit: 0.25,
                abilities: [AbilityKind::CritBurst, AbilityKind::PoisonBlade],
            },
            CharacterClass::Tank => ClassPreset {
                max_health: 220,
                base_damage: 12,
                parry: 0.25,
                crit: 0.05,
                abilities: [AbilityKind::ShieldUp, AbilityKind::Crush],
            },
            CharacterClass::Wizard => ClassPreset {
                max_health: 70,
                base_damage: 18,
                parry: 0.05,
                crit: 0.18,
                abilities: [AbilityKind::Fireball, AbilityKind::Burn],
            },
            CharacterClass::Paladin => ClassPreset {
                max_health: 150,
                base_damage: 16,
                parry: 0.15,
                crit: 0.08,
                abilities: [AbilityKind::Heal, AbilityKind::HolyGuard],
            },
        }
    }

    /// Create a character of this class.
    ///
    /// ```
    /// use turn_arena::characters::CharacterClass;
    ///
    /// let tank = CharacterClass::Tank.create("Bo");
    /// assert_eq!(tank.health(), 220);
    /// assert_eq!(tank.abilities().len(), 2);
    /// ```
    #[must_use]
    pub fn create(self, name: impl Into<String>) -> Character {
        Character::new(self, name)
    }

    /// Resolve a 1-based menu choice ("1" = Rogue ... "4" = Paladin).
    pub fn from_menu_choice(choice: &str) -> Result<Self, ActionError> {
        choice
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| ActionError::invalid(format!("no class for menu choice {choice:?}")))
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            CharacterClass::Rogue => "Rogue",
            CharacterClass::Tank => "Tank",
            CharacterClass::Wizard => "Wizard",
            CharacterClass::Paladin => "Paladin",
        }
    }
}

impl FromStr for CharacterClass {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rogue" => Ok(CharacterClass::Rogue),
            "tank" => Ok(CharacterClass::Tank),
            "wizard" => Ok(CharacterClass::Wizard),
            "paladin" => Ok(CharacterClass::Paladin),
            _ => Err(ActionError::invalid(format!("unknown class {s:?}"))),
        }
    }
}

impl std::fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
