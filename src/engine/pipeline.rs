use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::errors::QueryError;
use crate::models::{Category, TransactionRecord};

/// Category selector value that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    BookedAt,
    Amount,
    Merchant,
    Description
}

impl SortField {
    /// Amounts are inspected biggest first; dates and text read chronologically or alphabetically.
    pub fn default_direction(self) -> SortDirection {
        match self {
            SortField::Amount => SortDirection::Descending,
            _ => SortDirection::Ascending
        }
    }

    fn compare(self, left: &TransactionRecord, right: &TransactionRecord) -> Ordering {
        match self {
            SortField::BookedAt => left.booked_at.cmp(&right.booked_at),
            SortField::Amount => left.amount.cmp(&right.amount),
            SortField::Merchant => left.merchant().cmp(right.merchant()),
            SortField::Description => left.description().cmp(right.description())
        }
    }
}

impl FromStr for SortField {
    type Err = QueryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "date" | "booked_at" => Ok(SortField::BookedAt),
            "amount" => Ok(SortField::Amount),
            "merchant" => Ok(SortField::Merchant),
            "description" => Ok(SortField::Description),
            _ => Err(QueryError::UnknownSortField(value.to_string()))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending
        }
    }
}

/// Single-key sort applied by the list view. Starts newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: SortDirection
}

impl SortOrder {
    /// Sorts by `field` in that field's default direction.
    pub fn by(field: SortField) -> Self {
        Self {
            field,
            direction: field.default_direction()
        }
    }

    /// Clicking the active field flips the direction; any other field starts at its default.
    pub fn toggle(self, field: SortField) -> Self {
        if self.field == field {
            Self {
                field,
                direction: self.direction.flipped()
            }
        } else {
            Self::by(field)
        }
    }

    pub fn compare(&self, left: &TransactionRecord, right: &TransactionRecord) -> Ordering {
        let ordering = self.field.compare(left, right);

        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse()
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        Self {
            field: SortField::BookedAt,
            direction: SortDirection::Descending
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Exact, case-sensitive match on the resolved category name.
    Named(String)
}

impl CategoryFilter {
    /// Whether `record` passes both the search and the category selector.
    pub fn matches(&self, record: &TransactionRecord) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => record.category_name() == name
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Named(name) => name
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(value.to_string())
        }
    }
}

/// Search, category and sort selectors for the transaction list.
///
/// The query carries no state of its own between calls; the host re-applies
/// it to each freshly fetched snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionQuery {
    pub search: String,
    pub category: CategoryFilter,
    pub sort: SortOrder
}

impl TransactionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Whether `record` passes both the search and the category selector.
    pub fn matches(&self, record: &TransactionRecord) -> bool {
        matches_search(record, &self.search.to_lowercase()) && self.category.matches(record)
    }

    /// Filters and sorts `records` into a new vector, leaving the input untouched.
    ///
    /// Both predicates must hold for a record to pass. The sort is stable, so
    /// records that compare equal keep their snapshot order in either direction.
    pub fn apply(&self, records: &[TransactionRecord]) -> Vec<TransactionRecord> {
        let mut view: Vec<TransactionRecord> = records.iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect();

        view.sort_by(|left, right| self.sort.compare(left, right));

        view
    }
}

/// Case-insensitive substring match against any searchable field; an empty needle matches all.
pub(crate) fn matches_search(record: &TransactionRecord, needle: &str) -> bool {
    needle.is_empty() || record.searchable_text()
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Category pills for the list view: `All` followed by every category name.
pub fn category_filter_options(categories: &[Category]) -> Vec<String> {
    std::iter::once(ALL_CATEGORIES.to_string())
        .chain(categories.iter().map(|category| category.name.clone()))
        .collect()
}
