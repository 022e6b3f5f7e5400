//! Error handling for the points engine.
//!
//! Prefer adding a variant to [CornerError] over squeezing a new failure
//! into [DataIntegrity](CornerError::DataIntegrity). Document each variant
//! with when it is raised.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::event::EventId;

/// The error enum for everything the engine and its loaders can fail with.
#[derive(Debug, Error)]
pub enum CornerError {
    /// A month number outside of 1 through 12 was requested.
    #[error("month {0} is not between 1 and 12")]
    InvalidMonth(i64),
    /// The year and month don't form a representable calendar date.
    #[error("no calendar date exists for {year}-{month:02}-01")]
    InvalidDate { year: i32, month: u8 },
    /// A minimum per-day value that isn't a positive, finite number.
    #[error("the minimum value per day must be positive, got {0}")]
    InvalidThreshold(f64),
    /// An approved event in a report window has a zero or negative value.
    #[error("event {event} has a non-positive value of {value}")]
    NonPositiveValue { event: EventId, value: f64 },
    /// An event's category is not in the category table.
    #[error("unknown event category `{0}`")]
    UnknownCategory(String),
    /// The category table names the same category twice.
    #[error("category `{0}` is declared more than once")]
    DuplicateCategory(String),
    /// The category table has an entry with a blank name.
    #[error("category names cannot be empty")]
    EmptyCategoryName,
    /// The stored records contradict each other, e.g. an attendance for a
    /// character that doesn't exist.
    #[error("data integrity violation: {0}")]
    DataIntegrity(String),
    /// A required environment variable was not set.
    #[error("the environment variable {0} must be set")]
    MissingVariable(&'static str),
    /// An environment variable was set to something unparseable.
    #[error("the environment variable {name} has an invalid value `{value}`")]
    InvalidVariable { name: &'static str, value: String },
    /// The ledger file couldn't be read.
    #[error("couldn't read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The ledger file isn't valid JSON for a snapshot.
    #[error("invalid ledger JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CornerResult<T> = Result<T, CornerError>;
