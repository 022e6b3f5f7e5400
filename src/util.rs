//! Extra utilities for use elsewhere in the crate.

use env_logger::Env;
use time::{Date, Month, OffsetDateTime};

use crate::error::{CornerError, CornerResult};

/// The first instant of the month and the first instant of the month after,
/// both in UTC.
pub fn month_window(month: u8, year: i32) -> CornerResult<(OffsetDateTime, OffsetDateTime)> {
    let month = Month::try_from(month).map_err(|_| CornerError::InvalidMonth(month.into()))?;
    let start = first_of_month(year, month)?;
    let next_year = if month == Month::December {
        year.checked_add(1).ok_or(CornerError::InvalidDate {
            year,
            month: month as u8,
        })?
    } else {
        year
    };
    let end = first_of_month(next_year, month.next())?;

    Ok((start, end))
}

fn first_of_month(year: i32, month: Month) -> CornerResult<OffsetDateTime> {
    Date::from_calendar_date(year, month, 1)
        .map(|date| date.midnight().assume_utc())
        .map_err(|_| CornerError::InvalidDate {
            year,
            month: month as u8,
        })
}

/// Narrows a month number from an outer surface, rejecting anything that
/// isn't 1 through 12.
pub fn month_number(month: i64) -> CornerResult<u8> {
    u8::try_from(month)
        .ok()
        .filter(|month| (1..=12).contains(month))
        .ok_or(CornerError::InvalidMonth(month))
}

pub fn month_name(month: u8) -> CornerResult<String> {
    Month::try_from(month)
        .map(|month| month.to_string())
        .map_err(|_| CornerError::InvalidMonth(month.into()))
}

/// Logs to stderr at `info` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
}
