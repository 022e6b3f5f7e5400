use std::collections::{HashMap, HashSet};

use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

use crate::error::{CornerError, CornerResult};

pub type PlayerId = i64;
pub type CharacterId = i64;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, SimpleObject)]
pub struct Player {
    /// The ID of the player
    pub id: PlayerId,
    /// The player's name, unique among players
    pub name: String,
    /// Whether the player can approve and edit events
    #[serde(default)]
    pub admin: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, SimpleObject)]
pub struct Character {
    /// The ID of the character
    pub id: CharacterId,
    /// The in-game name of the character
    pub name: String,
    /// The player who owns this character
    pub player: PlayerId,
    /// Whether the character can still be added to new events
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Players and their characters, indexed for attribution lookups.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    players: HashMap<PlayerId, Player>,
    characters: HashMap<CharacterId, Character>,
    characters_by_player: HashMap<PlayerId, Vec<CharacterId>>,
}

impl Roster {
    pub fn new(players: Vec<Player>, characters: Vec<Character>) -> CornerResult<Self> {
        let mut names = HashSet::new();
        let mut roster = Self::default();

        for player in players {
            if !names.insert(player.name.clone()) {
                return Err(CornerError::DataIntegrity(format!(
                    "more than one player is named {}",
                    player.name
                )));
            }
            if let Some(existing) = roster.players.insert(player.id, player) {
                return Err(CornerError::DataIntegrity(format!(
                    "more than one player has id {}",
                    existing.id
                )));
            }
        }

        let mut active_names = HashSet::new();
        for character in characters {
            if !roster.players.contains_key(&character.player) {
                return Err(CornerError::DataIntegrity(format!(
                    "character {} belongs to unknown player {}",
                    character.name, character.player
                )));
            }
            if character.active && !active_names.insert(character.name.clone()) {
                return Err(CornerError::DataIntegrity(format!(
                    "more than one active character is named {}",
                    character.name
                )));
            }

            roster
                .characters_by_player
                .entry(character.player)
                .or_default()
                .push(character.id);
            if let Some(existing) = roster.characters.insert(character.id, character) {
                return Err(CornerError::DataIntegrity(format!(
                    "more than one character has id {}",
                    existing.id
                )));
            }
        }

        Ok(roster)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn player_named(&self, name: &str) -> Option<&Player> {
        self.players.values().find(|player| player.name == name)
    }

    /// All players, ordered by name.
    pub fn players(&self) -> Vec<&Player> {
        let mut players = self.players.values().collect::<Vec<_>>();
        players.sort_by(|left, right| left.name.cmp(&right.name).then(left.id.cmp(&right.id)));
        players
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(&id)
    }

    /// The player credited for a character's attendance. Inactive characters
    /// still credit their owner.
    pub fn owner_of(&self, character: CharacterId) -> Option<PlayerId> {
        self.characters.get(&character).map(|c| c.player)
    }

    pub fn characters_of(&self, player: PlayerId) -> impl Iterator<Item = &Character> {
        self.characters_by_player
            .get(&player)
            .into_iter()
            .flatten()
            .filter_map(|id| self.characters.get(id))
    }

    pub fn active_characters_of(&self, player: PlayerId) -> Vec<&Character> {
        self.characters_of(player)
            .filter(|character| character.active)
            .collect()
    }

    pub fn active_character_named(&self, name: &str) -> Option<&Character> {
        self.characters
            .values()
            .find(|character| character.active && character.name == name)
    }
}
