use std::collections::BTreeMap;

use time::{Date, OffsetDateTime, UtcOffset};

use crate::models::event::Event;

/// The hour (UTC) at which the in-game economy resets each day.
pub const RESET_HOUR: u8 = 11;

/// The day an event counts toward. Anything before the reset hour belongs
/// to the previous day.
pub fn operational_day(time: OffsetDateTime) -> Date {
    let time = time.to_offset(UtcOffset::UTC);
    let date = time.date();

    if time.hour() < RESET_HOUR {
        date.previous_day().unwrap_or(date)
    } else {
        date
    }
}

/// The events one player attended between two resets.
pub struct DayOfEvents<'e> {
    pub day: Date,
    pub events: Vec<&'e Event>,
}

/// Buckets events by operational day, earliest day first. Within a day,
/// events are ordered by time and then ID.
pub fn group_by_day<'e>(events: impl IntoIterator<Item = &'e Event>) -> Vec<DayOfEvents<'e>> {
    let mut days: BTreeMap<Date, Vec<&'e Event>> = BTreeMap::new();
    for event in events {
        days.entry(operational_day(event.time))
            .or_default()
            .push(event);
    }

    days.into_iter()
        .map(|(day, mut events)| {
            events.sort_by(|left, right| left.time.cmp(&right.time).then(left.id.cmp(&right.id)));
            DayOfEvents { day, events }
        })
        .collect()
}
