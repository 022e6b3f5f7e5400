use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{CornerError, CornerResult};
use crate::models::event::EventId;
use crate::models::player::{CharacterId, PlayerId, Roster};

/// A character was present at an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attendance {
    pub character: CharacterId,
    pub event: EventId,
}

/// Who was at each event, resolved once per report so lookups don't walk
/// player -> character -> attendance for every question.
#[derive(Clone, Debug, Default)]
pub struct AttendanceIndex {
    players: HashMap<EventId, Vec<PlayerId>>,
    characters: HashMap<EventId, Vec<CharacterId>>,
}

impl AttendanceIndex {
    pub fn build<'a>(
        attendances: impl IntoIterator<Item = &'a Attendance>,
        roster: &Roster,
    ) -> CornerResult<Self> {
        let mut seen = HashSet::new();
        let mut index = Self::default();

        for attendance in attendances {
            if !seen.insert(*attendance) {
                continue;
            }

            let player = roster.owner_of(attendance.character).ok_or_else(|| {
                CornerError::DataIntegrity(format!(
                    "event {} has an attendance for unknown character {}",
                    attendance.event, attendance.character
                ))
            })?;

            index
                .characters
                .entry(attendance.event)
                .or_default()
                .push(attendance.character);
            index
                .players
                .entry(attendance.event)
                .or_default()
                .push(player);
        }

        for players in index.players.values_mut() {
            players.sort_unstable();
            players.dedup();
        }
        for characters in index.characters.values_mut() {
            characters.sort_unstable();
        }

        Ok(index)
    }

    /// The distinct players at an event, in ID order.
    pub fn players_at(&self, event: EventId) -> &[PlayerId] {
        self.players.get(&event).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn characters_at(&self, event: EventId) -> &[CharacterId] {
        self.characters.get(&event).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn attended(&self, player: PlayerId, event: EventId) -> bool {
        self.players_at(event).binary_search(&player).is_ok()
    }

    /// A player with several characters at one event counts once.
    pub fn distinct_player_count(&self, event: EventId) -> usize {
        self.players_at(event).len()
    }

    /// Every player with at least one character at any of the given events.
    pub fn players_across(&self, events: impl IntoIterator<Item = EventId>) -> HashSet<PlayerId> {
        events
            .into_iter()
            .flat_map(|event| self.players_at(event).iter().copied())
            .collect()
    }
}
