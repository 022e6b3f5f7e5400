use async_graphql::{ComplexObject, SimpleObject};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::{CornerError, CornerResult};
use crate::models::category::{Categories, CategoryClass};
use crate::models::player::PlayerId;
use crate::models::points::day::operational_day;
use crate::models::{GqlDate, GqlDateTime};

pub mod attendance;

pub type EventId = i64;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, SimpleObject)]
#[graphql(complex)]
pub struct Event {
    /// The ID of the event
    pub id: EventId,
    /// What happened
    pub description: String,
    /// The listed value of everything the event brought in
    pub value: f64,
    /// The category the event was filed under
    pub category: String,

    /// When the event happened
    #[graphql(skip)]
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
    #[graphql(skip)]
    #[serde(default)]
    pub approval: Option<Approval>,
    #[graphql(skip)]
    #[serde(default)]
    pub submission: Option<Submission>,
}

/// An admin's confirmation that an event counts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Approval {
    pub approver: PlayerId,
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
}

/// Who filed an event and when.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub submitter: PlayerId,
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
}

#[ComplexObject]
impl Event {
    /// When the event happened
    pub async fn time(&self) -> GqlDateTime {
        GqlDateTime(self.time)
    }

    /// The day after the last reset that this event counts toward
    pub async fn operational_day(&self) -> GqlDate {
        GqlDate(operational_day(self.time))
    }

    /// Whether an admin has approved this event
    pub async fn approved(&self) -> bool {
        self.is_approved()
    }

    /// The admin who approved this event, if approved
    pub async fn approved_by(&self) -> Option<PlayerId> {
        self.approval.as_ref().map(|approval| approval.approver)
    }

    /// The player who submitted this event, if known
    pub async fn submitted_by(&self) -> Option<PlayerId> {
        self.submission.as_ref().map(|submission| submission.submitter)
    }
}

impl Event {
    pub fn is_approved(&self) -> bool {
        self.approval.is_some()
    }

    pub fn class(&self, categories: &Categories) -> CornerResult<CategoryClass> {
        categories.class_of(&self.category)
    }

    /// Events going into a report must carry a positive, finite value.
    pub fn ensure_positive_value(&self) -> CornerResult<()> {
        if self.value.is_finite() && self.value > 0.0 {
            Ok(())
        } else {
            Err(CornerError::NonPositiveValue {
                event: self.id,
                value: self.value,
            })
        }
    }

    /// Orders by time, breaking ties by ID so storage order never leaks through.
    pub fn sort_chronologically(events: &mut [Event]) {
        events.sort_by(|left, right| left.time.cmp(&right.time).then(left.id.cmp(&right.id)));
    }
}
