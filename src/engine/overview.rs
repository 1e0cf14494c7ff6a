use rust_decimal::Decimal;
use serde::Serialize;

use crate::engine::Summary;
use crate::models::{TransactionRecord, UNASSIGNED};

/// One bar of the spending-by-category chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpend {
    pub name: String,
    pub amount: Decimal,
    pub color: Option<String>,
    /// Bar width relative to the largest category, in percent.
    pub bar_percent: Decimal
}

/// Orders the breakdown biggest spend first, ties by name.
pub fn ranked_breakdown(summary: &Summary) -> Vec<CategorySpend> {
    let mut ranked: Vec<(&String, &Decimal)> = summary.category_breakdown.iter().collect();
    ranked.sort_by(|(left_name, left), (right_name, right)| right.cmp(left).then_with(|| left_name.cmp(right_name)));

    let largest = ranked.first().map_or(Decimal::ZERO, |(_, amount)| **amount);

    ranked.into_iter()
        .map(|(name, amount)| CategorySpend {
            name: name.clone(),
            amount: *amount,
            color: summary.category_colors.get(name).cloned(),
            bar_percent: if largest.is_zero() {
                Decimal::ZERO
            } else {
                (*amount / largest * Decimal::ONE_HUNDRED).round_dp(2)
            }
        })
        .collect()
}

/// The first `limit` categorized records, in snapshot order (newest first from storage).
pub fn recent_categorized(records: &[TransactionRecord], limit: usize) -> Vec<TransactionRecord> {
    records.iter()
        .filter(|record| record.category_name() != UNASSIGNED)
        .take(limit)
        .cloned()
        .collect()
}
