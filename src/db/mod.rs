//! The storage seam. The engine never queries anything itself; it asks a
//! [Ledger] for fully materialized records and works over those.

use time::OffsetDateTime;

use crate::error::CornerResult;
use crate::models::event::attendance::Attendance;
use crate::models::event::{Event, EventId};
use crate::models::player::Roster;
use crate::models::settings::Settings;

pub mod snapshot;

pub use self::snapshot::Snapshot;

pub trait Ledger {
    /// Every player and character.
    fn roster(&self) -> &Roster;

    /// The stored settings, or `None` if an admin never saved any.
    fn settings(&self) -> Option<Settings>;

    /// Events with `start <= time < end`, ordered by time and then ID.
    fn events_between(&self, start: OffsetDateTime, end: OffsetDateTime)
        -> CornerResult<Vec<Event>>;

    /// Every attendance recorded at any of the given events.
    fn attendances_for(&self, events: &[EventId]) -> CornerResult<Vec<Attendance>>;

    /// Events still waiting on an admin's approval, oldest first.
    fn pending_events(&self) -> CornerResult<Vec<Event>>;
}
