use crate::util::format_instant_millis;
use std::num::ParseIntError;
use thiserror::Error;
use time::{Date, Duration, Month, UtcDateTime, error::Format};

#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum MonthRangeError {
    #[error("Invalid year: {0}")]
    InvalidYear(ParseIntError),
    #[error("Invalid month: {0}")]
    InvalidMonth(ParseIntError),
    #[error("The month lies outside the supported calendar range")]
    OutOfRange,
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct MonthRange {
    start: UtcDateTime,
    end: UtcDateTime,
}

impl MonthRange {
    /// Months outside `1..=12` roll over into the neighbouring years, so month
    /// 13 of 2024 is January 2025 and month 0 is December of the year before.
    pub fn new(year: i32, month: i32) -> Result<Self, MonthRangeError> {
        let start = month_start(year, month)?;
        // Month filters reach one millisecond before the start.
        start
            .checked_sub(Duration::MILLISECOND)
            .ok_or(MonthRangeError::OutOfRange)?;
        let next_month = month.checked_add(1).ok_or(MonthRangeError::OutOfRange)?;
        let next_start = month_start(year, next_month)?;

        Ok(Self {
            start,
            end: next_start - Duration::MILLISECOND,
        })
    }

    pub fn parse(year: &str, month: &str) -> Result<Self, MonthRangeError> {
        ArchiveMonth::parse(year, month)?.range()
    }

    #[must_use]
    pub fn start(self) -> UtcDateTime {
        self.start
    }

    #[must_use]
    pub fn end(self) -> UtcDateTime {
        self.end
    }

    pub fn start_iso(self) -> Result<String, Format> {
        format_instant_millis(self.start)
    }

    pub fn end_iso(self) -> Result<String, Format> {
        format_instant_millis(self.end)
    }

    #[must_use]
    pub fn contains(self, instant: UtcDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }
}

fn month_start(year: i32, month: i32) -> Result<UtcDateTime, MonthRangeError> {
    let index = i64::from(year) * 12 + i64::from(month) - 1;

    let year = i32::try_from(index.div_euclid(12)).map_err(|_| MonthRangeError::OutOfRange)?;
    let month = u8::try_from(index.rem_euclid(12) + 1).map_err(|_| MonthRangeError::OutOfRange)?;
    let month = Month::try_from(month).map_err(|_| MonthRangeError::OutOfRange)?;

    let date =
        Date::from_calendar_date(year, month, 1).map_err(|_| MonthRangeError::OutOfRange)?;
    Ok(date.midnight().as_utc())
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct ArchiveMonth {
    pub year: i32,
    pub month: i32,
}

impl ArchiveMonth {
    pub fn parse(year: &str, month: &str) -> Result<Self, MonthRangeError> {
        Ok(Self {
            year: year.parse().map_err(MonthRangeError::InvalidYear)?,
            month: month.parse().map_err(MonthRangeError::InvalidMonth)?,
        })
    }

    pub fn range(self) -> Result<MonthRange, MonthRangeError> {
        MonthRange::new(self.year, self.month)
    }
}
