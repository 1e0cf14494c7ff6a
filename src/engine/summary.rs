use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

use crate::models::TransactionRecord;
use crate::types::DateWindow;

/// Selects the records and the day count a [`Summary`] is computed over.
///
/// A closed window yields the rate over that whole period, while month to
/// date yields the rate so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryPeriod {
    /// Only records inside the window count; the rate spreads over every day of it.
    Window(DateWindow),
    /// Records are taken as already restricted by the caller; the rate spreads
    /// over the days elapsed since the first of `today`'s month.
    MonthToDate { today: NaiveDate }
}

impl SummaryPeriod {
    /// Burn-rate denominator, never less than one day.
    pub fn days(&self) -> i64 {
        let days = match self {
            Self::Window(window) => window.days(),
            Self::MonthToDate { today } => i64::from(today.day0())
        };

        days.max(1)
    }

    fn includes(&self, record: &TransactionRecord) -> bool {
        match self {
            Self::Window(window) => window.contains(record.booked_at),
            Self::MonthToDate { .. } => true
        }
    }
}

/// Aggregate statistics rendered by the overview screens.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    /// Sum of all inflows.
    pub total_income: Decimal,
    /// Sum of the absolute value of all outflows.
    pub total_out: Decimal,
    /// Average outflow per day over [`Summary::days`].
    pub burn_rate: Decimal,
    /// Absolute outflow per resolved category name. Unordered; only nonzero spend appears.
    pub category_breakdown: HashMap<String, Decimal>,
    /// Display accent per category, as carried by the records. Never holds `Unassigned`.
    pub category_colors: HashMap<String, String>,
    /// Records without a category.
    pub unassigned_count: usize,
    /// Records that fell inside the period.
    pub transaction_count: usize,
    /// Day count the burn rate was divided by.
    pub days: i64
}

impl Summary {
    /// Reduces `records` into totals, burn rate and category breakdown.
    ///
    /// An empty input yields zero totals and empty mappings.
    pub fn calculate(records: &[TransactionRecord], period: SummaryPeriod) -> Self {
        let mut summary = Summary {
            days: period.days(),
            ..Summary::default()
        };

        for record in records.iter().filter(|record| period.includes(record)) {
            summary.transaction_count += 1;

            if record.is_inflow() {
                summary.total_income = accumulate(summary.total_income, record.amount, &record.id);
            } else if record.is_outflow() {
                let spend = record.amount.abs();
                summary.total_out = accumulate(summary.total_out, spend, &record.id);

                let category_total = summary.category_breakdown
                    .entry(record.category_name().to_string())
                    .or_insert(Decimal::ZERO);
                *category_total = accumulate(*category_total, spend, &record.id);
            }

            match &record.category {
                None => summary.unassigned_count += 1,
                Some(category) => {
                    if let Some(color) = &category.color {
                        summary.category_colors
                            .entry(category.name.clone())
                            .or_insert_with(|| color.clone());
                    }
                }
            }
        }

        summary.burn_rate = summary.total_out / Decimal::from(summary.days);

        debug!(
            "Summarized {} of {} records over {} days: income {}, out {}",
            summary.transaction_count,
            records.len(),
            summary.days,
            summary.total_income,
            summary.total_out
        );

        summary
    }

    pub fn net(&self) -> Decimal {
        self.total_income - self.total_out
    }
}

/// Adds a non-negative `amount` to a running total, saturating at [`Decimal::MAX`].
pub(crate) fn accumulate(total: Decimal, amount: Decimal, id: &str) -> Decimal {
    total.checked_add(amount).unwrap_or_else(|| {
        warn!("Total overflowed adding transaction [{id}], saturating at {}", Decimal::MAX);
        Decimal::MAX
    })
}
