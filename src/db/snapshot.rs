use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use time::OffsetDateTime;

use crate::db::Ledger;
use crate::error::{CornerError, CornerResult};
use crate::models::event::attendance::Attendance;
use crate::models::event::{Event, EventId};
use crate::models::player::{Character, Player, Roster};
use crate::models::settings::Settings;

/// A ledger held entirely in memory, usually loaded from a JSON export.
#[derive(Clone, Debug)]
pub struct Snapshot {
    roster: Roster,
    events: Vec<Event>,
    attendances: Vec<Attendance>,
    settings: Option<Settings>,
}

#[derive(Deserialize)]
struct SnapshotFile {
    players: Vec<Player>,
    #[serde(default)]
    characters: Vec<Character>,
    #[serde(default)]
    events: Vec<Event>,
    #[serde(default)]
    attendances: Vec<Attendance>,
    #[serde(default)]
    settings: Option<Settings>,
}

impl Snapshot {
    pub fn new(
        roster: Roster,
        mut events: Vec<Event>,
        attendances: Vec<Attendance>,
        settings: Option<Settings>,
    ) -> CornerResult<Self> {
        if let Some(settings) = &settings {
            settings.validate()?;
        }
        let default_settings = Settings::default();
        let categories = &settings.as_ref().unwrap_or(&default_settings).categories;

        let mut event_ids = HashSet::with_capacity(events.len());
        for event in &events {
            if !event_ids.insert(event.id) {
                return Err(CornerError::DataIntegrity(format!(
                    "more than one event has id {}",
                    event.id
                )));
            }
            event.class(categories)?;
        }
        Event::sort_chronologically(&mut events);

        let mut seen = HashSet::with_capacity(attendances.len());
        let mut kept = Vec::with_capacity(attendances.len());
        for attendance in attendances {
            if !event_ids.contains(&attendance.event) {
                return Err(CornerError::DataIntegrity(format!(
                    "attendance of character {} at unknown event {}",
                    attendance.character, attendance.event
                )));
            }
            if roster.character(attendance.character).is_none() {
                return Err(CornerError::DataIntegrity(format!(
                    "attendance of unknown character {} at event {}",
                    attendance.character, attendance.event
                )));
            }
            if seen.insert(attendance) {
                kept.push(attendance);
            }
        }

        Ok(Self {
            roster,
            events,
            attendances: kept,
            settings,
        })
    }

    pub fn from_json(json: &str) -> CornerResult<Self> {
        let file: SnapshotFile = serde_json::from_str(json)?;
        let roster = Roster::new(file.players, file.characters)?;

        Self::new(roster, file.events, file.attendances, file.settings)
    }

    pub fn load(path: impl AsRef<Path>) -> CornerResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| CornerError::Io {
            path: path.to_owned(),
            source,
        })?;

        Self::from_json(&json)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

impl Ledger for Snapshot {
    fn roster(&self) -> &Roster {
        &self.roster
    }

    fn settings(&self) -> Option<Settings> {
        self.settings.clone()
    }

    fn events_between(
        &self,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> CornerResult<Vec<Event>> {
        Ok(self
            .events
            .iter()
            .filter(|event| event.time >= start && event.time < end)
            .cloned()
            .collect())
    }

    fn attendances_for(&self, events: &[EventId]) -> CornerResult<Vec<Attendance>> {
        let events: HashSet<EventId> = events.iter().copied().collect();

        Ok(self
            .attendances
            .iter()
            .filter(|attendance| events.contains(&attendance.event))
            .copied()
            .collect())
    }

    fn pending_events(&self) -> CornerResult<Vec<Event>> {
        Ok(self
            .events
            .iter()
            .filter(|event| !event.is_approved())
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    const LEDGER: &str = r#"{
        "players": [
            {"id": 1, "name": "Ayla", "admin": true},
            {"id": 2, "name": "Bram"}
        ],
        "characters": [
            {"id": 10, "name": "Ayla Main", "player": 1},
            {"id": 20, "name": "Bram Main", "player": 2, "active": false}
        ],
        "events": [
            {"id": 2, "description": "Gas harvest", "value": 300.0, "category": "Gas",
             "time": "2024-02-03T15:00:00Z"},
            {"id": 1, "description": "Sleeper cache", "value": 900.0, "category": "C5 Site",
             "time": "2024-02-01T12:00:00Z",
             "approval": {"approver": 1, "time": "2024-02-02T08:00:00Z"}}
        ],
        "attendances": [
            {"character": 10, "event": 1},
            {"character": 20, "event": 1},
            {"character": 20, "event": 1},
            {"character": 20, "event": 2}
        ]
    }"#;

    #[test]
    fn loads_and_orders_events() {
        let snapshot = Snapshot::from_json(LEDGER).unwrap();

        let ids = snapshot.events().iter().map(|e| e.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 2]);
        assert!(snapshot.settings().is_none());
        assert!(!snapshot.roster().character(20).unwrap().active);
        assert_eq!(snapshot.attendances_for(&[1]).unwrap().len(), 2);
    }

    #[test]
    fn window_is_half_open() {
        let snapshot = Snapshot::from_json(LEDGER).unwrap();

        let events = snapshot
            .events_between(
                datetime!(2024-02-01 12:00 UTC),
                datetime!(2024-02-03 15:00 UTC),
            )
            .unwrap();
        assert_eq!(events.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn pending_events_are_unapproved() {
        let snapshot = Snapshot::from_json(LEDGER).unwrap();

        let pending = snapshot.pending_events().unwrap();
        assert_eq!(pending.iter().map(|e| e.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn unknown_category_fails_to_load() {
        let json = LEDGER.replace("\"Gas\"", "\"Incursion\"");
        let err = Snapshot::from_json(&json).unwrap_err();

        assert!(matches!(err, CornerError::UnknownCategory(name) if name == "Incursion"));
    }

    #[test]
    fn categories_come_from_settings() {
        let json = LEDGER.replacen(
            "\"players\"",
            r#""settings": {"minimum_value": 500.0,
                           "categories": [{"name": "Gas", "class": "non-pointable"},
                                          {"name": "C5 Site", "class": "pointable"}]},
               "players""#,
            1,
        );
        let snapshot = Snapshot::from_json(&json).unwrap();
        let settings = snapshot.settings().unwrap();

        assert_eq!(settings.minimum_value, 500.0);
        assert_eq!(settings.categories.all().len(), 2);
    }

    #[test]
    fn orphan_attendance_fails_to_load() {
        let json = LEDGER.replace(
            r#"{"character": 20, "event": 2}"#,
            r#"{"character": 20, "event": 7}"#,
        );
        assert!(matches!(
            Snapshot::from_json(&json),
            Err(CornerError::DataIntegrity(_))
        ));

        let json = LEDGER.replace(
            r#"{"character": 20, "event": 2}"#,
            r#"{"character": 99, "event": 2}"#,
        );
        assert!(matches!(
            Snapshot::from_json(&json),
            Err(CornerError::DataIntegrity(_))
        ));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = Snapshot::load("/nonexistent/ledger.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/ledger.json"));
    }
}
