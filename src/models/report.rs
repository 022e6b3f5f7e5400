use async_graphql::SimpleObject;
use log::info;
use serde::Serialize;

use crate::db::Ledger;
use crate::error::{CornerError, CornerResult};
use crate::models::event::attendance::AttendanceIndex;
use crate::models::event::{Event, EventId};
use crate::models::player::Player;
use crate::models::points::{PointResult, PointsContext};
use crate::util::{month_name, month_window};

/// How much of an event's listed value is expected to actually be realized
/// once the loot is sold.
pub const REALIZED_VALUE_RATIO: f64 = 0.8;

#[derive(Clone, Debug, PartialEq, Serialize, SimpleObject)]
pub struct PlayerPoints {
    /// The player these totals are for
    pub player: Player,
    /// Operational days that met the minimum value
    pub points: u32,
    /// The summed share of the days that earned a point
    pub value: f64,
    /// Approved events of any category the player attended this month
    pub events_attended: u32,
}

/// The characters recorded at one approved event.
#[derive(Clone, Debug, PartialEq, Serialize, SimpleObject)]
pub struct EventAttendees {
    pub event: EventId,
    /// Character names, in character ID order
    pub characters: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, SimpleObject)]
pub struct MonthReport {
    pub month: u8,
    pub year: i32,
    /// The English name of the month
    pub month_name: String,
    /// The minimum value per day this report was computed with
    pub minimum_value: f64,
    /// Approved events of the month, oldest first
    pub events: Vec<Event>,
    /// Who was at each approved event, in the same order as `events`
    pub attendees: Vec<EventAttendees>,
    /// How many events of the month are still waiting on approval
    pub pending_event_count: u32,
    /// Everyone who attended an approved event, ordered by name
    pub players: Vec<PlayerPoints>,
    /// The realized value of every approved event, rounded down
    pub value_total: i64,
    /// Points earned by all players together
    pub point_total: u32,
    /// The most points any single player earned
    pub max_points: u32,
    /// The realized value per point earned, rounded down, or 0 without points
    pub value_per_point: i64,
    /// Approved events nobody was recorded at
    pub unattended_events: Vec<EventId>,
}

impl MonthReport {
    pub fn compute<L: Ledger + ?Sized>(
        ledger: &L,
        month: u8,
        year: i32,
        minimum_value_override: Option<f64>,
    ) -> CornerResult<Self> {
        let settings = ledger.settings().unwrap_or_default();
        let minimum_value = settings.threshold(minimum_value_override)?;
        let (start, end) = month_window(month, year)?;

        let (events, pending): (Vec<Event>, Vec<Event>) = ledger
            .events_between(start, end)?
            .into_iter()
            .partition(Event::is_approved);
        for event in &events {
            event.ensure_positive_value()?;
        }

        let event_ids = events.iter().map(|event| event.id).collect::<Vec<_>>();
        let roster = ledger.roster();
        let attendances = ledger.attendances_for(&event_ids)?;
        let attendance = AttendanceIndex::build(&attendances, roster)?;
        let context = PointsContext::new(&settings.categories, &attendance);

        let mut active_players = attendance
            .players_across(event_ids.iter().copied())
            .into_iter()
            .map(|id| {
                roster.player(id).ok_or_else(|| {
                    CornerError::DataIntegrity(format!("no player with id {}", id))
                })
            })
            .collect::<CornerResult<Vec<_>>>()?;
        active_players.sort_by(|left, right| left.name.cmp(&right.name).then(left.id.cmp(&right.id)));

        let listed_value: f64 = events.iter().map(|event| event.value).sum();
        let value_total = (listed_value * REALIZED_VALUE_RATIO).floor() as i64;

        let mut players = Vec::with_capacity(active_players.len());
        for player in active_players {
            let PointResult { points, value, .. } =
                context.points_for_player(player.id, &events, minimum_value)?;
            let events_attended = event_ids
                .iter()
                .filter(|&&event| attendance.attended(player.id, event))
                .count() as u32;

            players.push(PlayerPoints {
                player: player.clone(),
                points,
                value,
                events_attended,
            });
        }

        let point_total = players.iter().map(|player| player.points).sum::<u32>();
        let max_points = players
            .iter()
            .map(|player| player.points)
            .max()
            .unwrap_or(0);
        let value_per_point = if point_total > 0 {
            value_total / i64::from(point_total)
        } else {
            0
        };
        let unattended_events = event_ids
            .iter()
            .copied()
            .filter(|&event| attendance.distinct_player_count(event) == 0)
            .collect::<Vec<_>>();
        let attendees = event_ids
            .iter()
            .map(|&event| {
                let characters = attendance
                    .characters_at(event)
                    .iter()
                    .map(|&id| {
                        roster.character(id).map(|c| c.name.clone()).ok_or_else(|| {
                            CornerError::DataIntegrity(format!("no character with id {}", id))
                        })
                    })
                    .collect::<CornerResult<Vec<_>>>()?;

                Ok(EventAttendees { event, characters })
            })
            .collect::<CornerResult<Vec<_>>>()?;

        info!(
            "{}/{}: {} approved event(s), {} pending, {} player(s), {} point(s), {} per point",
            year,
            month,
            events.len(),
            pending.len(),
            players.len(),
            point_total,
            value_per_point
        );

        Ok(Self {
            month,
            year,
            month_name: month_name(month)?,
            minimum_value,
            events,
            attendees,
            pending_event_count: pending.len() as u32,
            players,
            value_total,
            point_total,
            max_points,
            value_per_point,
            unattended_events,
        })
    }
}

/// One player's view of a month: what they attended, what's still pending,
/// and the points the approved part earned them.
#[derive(Clone, Debug, PartialEq, Serialize, SimpleObject)]
pub struct PlayerMonth {
    pub player: Player,
    pub month: u8,
    pub year: i32,
    pub month_name: String,
    pub minimum_value: f64,
    /// Approved events the player attended, oldest first
    pub approved_events: Vec<Event>,
    /// Unapproved events the player attended, oldest first
    pub pending_events: Vec<Event>,
    /// Points earned from the approved events
    pub points: PointResult,
}

impl PlayerMonth {
    pub fn compute<L: Ledger + ?Sized>(
        ledger: &L,
        player: &Player,
        month: u8,
        year: i32,
        minimum_value_override: Option<f64>,
    ) -> CornerResult<Self> {
        let settings = ledger.settings().unwrap_or_default();
        let minimum_value = settings.threshold(minimum_value_override)?;
        let (start, end) = month_window(month, year)?;

        let events = ledger.events_between(start, end)?;
        let event_ids = events.iter().map(|event| event.id).collect::<Vec<_>>();
        let attendances = ledger.attendances_for(&event_ids)?;
        let attendance = AttendanceIndex::build(&attendances, ledger.roster())?;

        let (approved_events, pending_events): (Vec<Event>, Vec<Event>) = events
            .into_iter()
            .filter(|event| attendance.attended(player.id, event.id))
            .partition(Event::is_approved);
        for event in &approved_events {
            event.ensure_positive_value()?;
        }

        let context = PointsContext::new(&settings.categories, &attendance);
        let points = context.points_for_player(player.id, &approved_events, minimum_value)?;

        Ok(Self {
            player: player.clone(),
            month,
            year,
            month_name: month_name(month)?,
            minimum_value,
            approved_events,
            pending_events,
            points,
        })
    }
}
