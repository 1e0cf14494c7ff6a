use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Calendar error: month index {0} is outside 0..=11")]
    InvalidMonth(u32),
    #[error("Calendar error: month index {month} of year {year} is outside the supported date range")]
    OutOfRange {
        year: i32,
        month: u32
    },
    #[error("Calendar error: window end {end} is before its start {start}")]
    InvertedWindow {
        start: NaiveDate,
        end: NaiveDate
    },
    #[error("Calendar error: {0}")]
    InvalidFormat(String)
}
