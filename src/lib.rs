//! Aggregation and filtering engine behind a personal-finance dashboard.
//!
//! The storage side hands over already-fetched transaction snapshots; the
//! engine turns them into monthly summaries, category breakdowns, burn
//! rates, filtered and sorted list views and grouped sub-reports.

pub mod engine;
pub mod models;
pub mod session;
pub mod storage;
pub mod types;
