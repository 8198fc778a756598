//! Player identification and the match roster.
//!
//! ## PlayerId
//!
//! Type-safe index of a character in roster (insertion) order.
//!
//! ## Roster
//!
//! The fixed, ordered set of characters in a match. Characters are never
//! removed; dead characters stay in place so indices remain stable.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::characters::Character;

/// Roster index of a character.
///
/// Indices are 0-based: the first player is `PlayerId(0)`. Menus usually
/// show them 1-based, see [`PlayerId::ordinal`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw roster index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// 1-based position for display.
    #[must_use]
    pub const fn ordinal(self) -> usize {
        self.0 as usize + 1
    }

    /// Iterate over all player IDs for a roster of `player_count` characters.
    ///
    /// ```
    /// use turn_arena::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.ordinal())
    }
}

/// Ordered characters of a match, addressed by [`PlayerId`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Roster {
    characters: Vec<Character>,
}

impl Roster {
    /// Wrap characters in roster order.
    pub fn new(characters: Vec<Character>) -> Self {
        Self { characters }
    }

    /// Number of characters, living or dead.
    #[must_use]
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Whether `player` addresses a roster slot.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.index() < self.characters.len()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&Character> {
        self.characters.get(player.index())
    }

    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut Character> {
        self.characters.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &Character) pairs in roster order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &Character)> {
        self.characters
            .iter()
            .enumerate()
            .map(|(i, c)| (PlayerId(i as u8), c))
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.characters.len())
    }

    /// Living characters in roster order.
    pub fn alive_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.iter().filter(|(_, c)| c.is_alive()).map(|(id, _)| id)
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.characters.iter().filter(|c| c.is_alive()).count()
    }

    /// Living characters other than `excluding`, in roster order.
    #[must_use]
    pub fn alive_targets(&self, excluding: PlayerId) -> Vec<PlayerId> {
        self.alive_ids().filter(|&id| id != excluding).collect()
    }

    /// Borrow two distinct characters mutably at once.
    ///
    /// Returns `None` if the ids are equal or either is out of range.
    pub fn pair_mut(
        &mut self,
        first: PlayerId,
        second: PlayerId,
    ) -> Option<(&mut Character, &mut Character)> {
        let (a, b) = (first.index(), second.index());
        if a == b || a >= self.characters.len() || b >= self.characters.len() {
            return None;
        }

        if a < b {
            let (head, tail) = self.characters.split_at_mut(b);
            Some((&mut head[a], &mut tail[0]))
        } else {
            let (head, tail) = self.characters.split_at_mut(a);
            Some((&mut tail[0], &mut head[b]))
        }
    }
}

impl Index<PlayerId> for Roster {
    type Output = Character;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.characters[player.index()]
    }
}

impl IndexMut<PlayerId> for Roster {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.characters[player.index()]
    }
}
