use std::collections::HashSet;

use async_graphql::{ComplexObject, SimpleObject};
use log::{debug, warn};
use serde::Serialize;
use time::Date;

use crate::error::CornerResult;
use crate::models::category::{Categories, CategoryClass};
use crate::models::event::attendance::AttendanceIndex;
use crate::models::event::{Event, EventId};
use crate::models::player::PlayerId;
use crate::models::points::day::group_by_day;
use crate::models::settings::Settings;
use crate::models::GqlDate;

pub mod day;

/// One operational day of a player's pointable events.
#[derive(Clone, Debug, PartialEq, Serialize, SimpleObject)]
#[graphql(complex)]
pub struct DayTotal {
    #[graphql(skip)]
    pub day: Date,
    /// The player's summed share of every event that day
    pub value: f64,
    /// Whether the summed share met the minimum value
    pub earned_point: bool,
    /// The events that made up the day
    pub events: Vec<EventId>,
}

#[ComplexObject]
impl DayTotal {
    /// The operational day
    pub async fn day(&self) -> GqlDate {
        GqlDate(self.day)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, SimpleObject)]
pub struct PointResult {
    /// How many operational days met the minimum value
    pub points: u32,
    /// The summed share of the days that earned a point
    pub value: f64,
    /// Every day the player took part in, earliest first
    pub days: Vec<DayTotal>,
}

/// Everything needed to score players against one fixed set of events.
pub struct PointsContext<'a> {
    pub categories: &'a Categories,
    pub attendance: &'a AttendanceIndex,
}

impl<'a> PointsContext<'a> {
    pub fn new(categories: &'a Categories, attendance: &'a AttendanceIndex) -> Self {
        Self {
            categories,
            attendance,
        }
    }

    /// The events of the given class that any of the player's characters
    /// attended, in input order and without repeats.
    pub fn participated_events<'e>(
        &self,
        player: PlayerId,
        events: &'e [Event],
        class: CategoryClass,
    ) -> CornerResult<Vec<&'e Event>> {
        let mut seen = HashSet::new();
        let mut participated = vec![];

        for event in events {
            if event.class(self.categories)? == class
                && self.attendance.attended(player, event.id)
                && seen.insert(event.id)
            {
                participated.push(event);
            }
        }

        Ok(participated)
    }

    /// An event's value split evenly between the distinct players at it.
    ///
    /// An event with nobody recorded at it is worth nothing to anyone.
    pub fn event_share_value(&self, event: &Event) -> f64 {
        match self.attendance.distinct_player_count(event.id) {
            0 => {
                warn!(
                    "Event {} ({}) has no attendees, so its value is not shared",
                    event.id, event.description
                );
                0.0
            }
            players => event.value / players as f64,
        }
    }

    /// Awards one point for every operational day where the player's
    /// summed share of pointable events reaches `threshold`.
    pub fn points_for_player(
        &self,
        player: PlayerId,
        events: &[Event],
        threshold: f64,
    ) -> CornerResult<PointResult> {
        let threshold = Settings::check_minimum_value(threshold)?;
        let participated = self.participated_events(player, events, CategoryClass::Pointable)?;
        let mut result = PointResult::default();

        for day in group_by_day(participated) {
            let value: f64 = day
                .events
                .iter()
                .map(|event| self.event_share_value(event))
                .sum();
            let earned_point = value >= threshold;

            if earned_point {
                result.points += 1;
                result.value += value;
            }

            result.days.push(DayTotal {
                day: day.day,
                value,
                earned_point,
                events: day.events.iter().map(|event| event.id).collect(),
            });
        }

        debug!(
            "Player {} earned {} point(s) over {} day(s) at a minimum of {}",
            player,
            result.points,
            result.days.len(),
            threshold
        );

        Ok(result)
    }
}
