mod calendar;
mod errors;
mod money;

pub use calendar::{advance_month, month_range, DateWindow, YearMonth};
pub use errors::CalendarError;
pub use money::{format_currency, format_signed, CurrencyFormat};

pub type TransactionId = String;
