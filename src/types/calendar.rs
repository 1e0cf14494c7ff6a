use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::types::errors::CalendarError;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December"
];

/// An inclusive calendar-date range `[start, end]` used to scope aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CalendarError> {
        if end < start {
            return Err(CalendarError::InvertedWindow { start, end })
        }

        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered, counting both bounds.
    pub fn days(&self) -> i64 {
        self.end.signed_duration_since(self.start).num_days() + 1
    }
}

impl Display for DateWindow {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}..={}", self.start, self.end)
    }
}

/// A calendar month, with the month held as a zero-based index (January = 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct YearMonth {
    year: i32,
    month: u32
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        if month > 11 {
            return Err(CalendarError::InvalidMonth(month))
        }

        Ok(Self { year, month })
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0()
        }
    }

    pub fn today() -> Self {
        Self::of(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn advance(self, delta: i32) -> Result<Self, CalendarError> {
        let (year, month) = advance_month(self.year, self.month, delta)?;
        Ok(Self { year, month })
    }

    pub fn range(&self) -> Result<DateWindow, CalendarError> {
        month_range(self.year, self.month)
    }

    pub fn is_current(&self, today: NaiveDate) -> bool {
        *self == Self::of(today)
    }
}

impl Display for YearMonth {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{} {}", MONTH_NAMES[self.month as usize], self.year)
    }
}

impl FromStr for YearMonth {
    type Err = CalendarError;

    /// Parses `YYYY-MM`, where the month is written one-based as on a calendar.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        let Some((year, month)) = value.rsplit_once('-') else {
            return Err(CalendarError::InvalidFormat(format!("Expected YYYY-MM but found '{value}'")))
        };

        let year: i32 = year.parse()
            .map_err(|error| CalendarError::InvalidFormat(format!("Invalid year in '{value}': {error}")))?;
        let month: u32 = month.parse()
            .map_err(|error| CalendarError::InvalidFormat(format!("Invalid month in '{value}': {error}")))?;

        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidFormat(format!("Month {month} in '{value}' is not a calendar month")))
        }

        Self::new(year, month - 1)
    }
}

/// Moves a `(year, zero-based month)` pair by `delta` months, carrying the year on wrap.
///
/// Fails when the resulting year no longer fits an `i32`.
pub fn advance_month(year: i32, month: u32, delta: i32) -> Result<(i32, u32), CalendarError> {
    let index = i64::from(year) * 12 + i64::from(month) + i64::from(delta);

    let next_year = i32::try_from(index.div_euclid(12)).map_err(|_| CalendarError::OutOfRange { year, month })?;
    let next_month = u32::try_from(index.rem_euclid(12)).map_err(|_| CalendarError::OutOfRange { year, month })?;

    Ok((next_year, next_month))
}

/// First and last calendar day of the given zero-based month.
pub fn month_range(year: i32, month: u32) -> Result<DateWindow, CalendarError> {
    if month > 11 {
        return Err(CalendarError::InvalidMonth(month))
    }

    let start = first_day(year, month)?;
    let (next_year, next_month) = advance_month(year, month, 1)?;

    // Day zero of the following month rolls back to the last day of this one.
    let end = first_day(next_year, next_month)?
        .pred_opt()
        .ok_or(CalendarError::OutOfRange { year, month })?;

    Ok(DateWindow { start, end })
}

fn first_day(year: i32, month: u32) -> Result<NaiveDate, CalendarError> {
    NaiveDate::from_ymd_opt(year, month + 1, 1).ok_or(CalendarError::OutOfRange { year, month })
}
