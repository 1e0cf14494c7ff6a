use std::sync::Arc;

use chrono::NaiveDate;
use moka::future::Cache;
use serde::Serialize;
use tracing::debug;

use crate::engine::{
    category_filter_options, group_reports, ranked_breakdown, recent_categorized, CategoryFilter, CategorySpend, GroupReport,
    GroupRule, SortField, SortOrder, Summary, SummaryPeriod, TransactionQuery
};
use crate::models::{Category, TransactionRecord};
use crate::storage::TransactionSource;
use crate::types::{CalendarError, DateWindow, YearMonth};

/// Number of categorized records shown under "recent transactions".
pub const RECENT_LIMIT: usize = 5;

const CACHE_CAPACITY: u64 = 64;

/// The date scope currently selected in the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Month(YearMonth),
    AllTime
}

impl Period {
    /// Storage window for this period; `None` fetches everything.
    pub fn window(&self) -> Result<Option<DateWindow>, CalendarError> {
        match self {
            Period::Month(month) => month.range().map(Some),
            Period::AllTime => Ok(None)
        }
    }

    pub fn label(&self) -> String {
        match self {
            Period::Month(month) => month.to_string(),
            Period::AllTime => "All Time".to_string()
        }
    }
}

/// Everything the overview screen renders for one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub label: String,
    pub summary: Summary,
    pub breakdown: Vec<CategorySpend>,
    pub recent: Vec<TransactionRecord>
}

/// Hosting-layer state for one dashboard user.
///
/// The session owns the month, search, category and sort selectors and
/// re-runs the stateless engine over each fetched snapshot. Fetched windows
/// are cached until [`DashboardSession::invalidate`] is called.
pub struct DashboardSession<S: TransactionSource> {
    source: Arc<S>,
    cache: Cache<Option<DateWindow>, Arc<Vec<TransactionRecord>>>,
    month: YearMonth,
    all_time: bool,
    query: TransactionQuery
}

impl<S: TransactionSource> DashboardSession<S> {
    /// Starts on the month containing `today`, newest records first.
    pub fn new(source: Arc<S>, today: NaiveDate) -> Self {
        Self {
            source,
            cache: Cache::new(CACHE_CAPACITY),
            month: YearMonth::of(today),
            all_time: false,
            query: TransactionQuery::default()
        }
    }

    pub fn period(&self) -> Period {
        if self.all_time {
            Period::AllTime
        } else {
            Period::Month(self.month)
        }
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn query(&self) -> &TransactionQuery {
        &self.query
    }

    pub fn previous_month(&mut self) -> Result<(), CalendarError> {
        self.month = self.month.advance(-1)?;
        Ok(())
    }

    pub fn next_month(&mut self) -> Result<(), CalendarError> {
        self.month = self.month.advance(1)?;
        Ok(())
    }

    pub fn go_to_month(&mut self, month: YearMonth) {
        self.month = month;
    }

    /// Jumps back to the month containing `today`.
    pub fn go_to_month_of(&mut self, today: NaiveDate) {
        self.month = YearMonth::of(today);
    }

    /// Switches between the selected month and all records. The month is kept.
    pub fn toggle_all_time(&mut self) {
        self.all_time = !self.all_time;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
    }

    pub fn set_category(&mut self, category: impl Into<CategoryFilter>) {
        self.query.category = category.into();
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.query.sort = sort;
    }

    pub fn toggle_sort(&mut self, field: SortField) {
        self.query.sort = self.query.sort.toggle(field);
    }

    /// Drops every cached window, e.g. after an import.
    pub fn invalidate(&self) {
        self.cache.invalidate_all();
    }

    /// Records of the selected period, newest first.
    pub async fn records(&self) -> Result<Arc<Vec<TransactionRecord>>, CalendarError> {
        let window = self.period().window()?;
        let source = self.source.clone();

        let records = self.cache
            .get_with(window, async move {
                let records = source.transactions(window.as_ref());
                debug!("Fetched {} records for window {window:?}", records.len());
                Arc::new(records)
            })
            .await;

        Ok(records)
    }

    pub fn categories(&self) -> Vec<Category> {
        self.source.categories()
    }

    pub fn category_options(&self) -> Vec<String> {
        category_filter_options(&self.categories())
    }

    pub async fn overview(&self, today: NaiveDate) -> Result<Overview, CalendarError> {
        let records = self.records().await?;
        let period = self.summary_period(&records, today)?;
        let summary = Summary::calculate(&records, period);

        Ok(Overview {
            label: self.period().label(),
            breakdown: ranked_breakdown(&summary),
            recent: recent_categorized(&records, RECENT_LIMIT),
            summary
        })
    }

    /// The list view: the selected period filtered and sorted by the current query.
    pub async fn visible_transactions(&self) -> Result<Vec<TransactionRecord>, CalendarError> {
        let records = self.records().await?;
        Ok(self.query.apply(&records))
    }

    pub async fn group_reports(&self, rules: &[GroupRule]) -> Result<Vec<GroupReport>, CalendarError> {
        let records = self.records().await?;
        Ok(group_reports(rules, &records))
    }

    /// The current month reports its rate so far; a past or future month reports
    /// over its full length; all time spans the oldest to the newest record.
    fn summary_period(&self, records: &[TransactionRecord], today: NaiveDate) -> Result<SummaryPeriod, CalendarError> {
        if self.all_time {
            let oldest = records.iter().map(|record| record.booked_at).min();
            let newest = records.iter().map(|record| record.booked_at).max();

            return match (oldest, newest) {
                (Some(start), Some(end)) => Ok(SummaryPeriod::Window(DateWindow::new(start, end)?)),
                _ => Ok(SummaryPeriod::MonthToDate { today })
            }
        }

        if self.month.is_current(today) {
            Ok(SummaryPeriod::MonthToDate { today })
        } else {
            Ok(SummaryPeriod::Window(self.month.range()?))
        }
    }
}
