use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::engine::errors::GroupRuleError;
use crate::engine::pipeline::matches_search;
use crate::engine::summary::accumulate;
use crate::models::TransactionRecord;

/// Totals over a predicate-selected subset of records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupReport {
    pub label: String,
    /// Sum of absolute amounts in the subset.
    pub total: Decimal,
    pub count: usize,
    /// `total / count`, or zero for an empty subset.
    pub average: Decimal
}

impl GroupReport {
    pub fn collect<P>(label: impl Into<String>, records: &[TransactionRecord], predicate: P) -> Self
    where
        P: Fn(&TransactionRecord) -> bool
    {
        let (total, count) = records.iter()
            .filter(|record| predicate(record))
            .fold((Decimal::ZERO, 0usize), |(total, count), record| (accumulate(total, record.amount.abs(), &record.id), count + 1));

        let average = if count == 0 {
            Decimal::ZERO
        } else {
            total / Decimal::from(count as u64)
        };

        Self {
            label: label.into(),
            total,
            count,
            average
        }
    }
}

/// Which part of a record a group rule looks at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "pattern", rename_all = "snake_case")]
pub enum GroupMatcher {
    /// Case-insensitive substring of the description.
    Description(String),
    /// Case-insensitive substring of the merchant.
    Merchant(String),
    /// Case-insensitive substring of any searchable field.
    Text(String),
    /// Exact resolved category name.
    Category(String)
}

impl GroupMatcher {
    pub fn matches(&self, record: &TransactionRecord) -> bool {
        match self {
            GroupMatcher::Description(pattern) => contains_ignore_case(record.description(), pattern),
            GroupMatcher::Merchant(pattern) => contains_ignore_case(record.merchant(), pattern),
            GroupMatcher::Text(pattern) => matches_search(record, &pattern.to_lowercase()),
            GroupMatcher::Category(name) => record.category_name() == name
        }
    }
}

fn contains_ignore_case(haystack: &str, pattern: &str) -> bool {
    haystack.to_lowercase().contains(&pattern.to_lowercase())
}

/// A labelled sub-report definition, e.g. every TWINT payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRule {
    pub label: String,
    pub matcher: GroupMatcher
}

impl GroupRule {
    pub fn new(label: impl Into<String>, matcher: GroupMatcher) -> Self {
        Self {
            label: label.into(),
            matcher
        }
    }

    pub fn report(&self, records: &[TransactionRecord]) -> GroupReport {
        GroupReport::collect(self.label.clone(), records, |record| self.matcher.matches(record))
    }
}

impl FromStr for GroupRule {
    type Err = GroupRuleError;

    /// Parses `Label=field:pattern`; without a field the pattern applies to the description.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let Some((label, selector)) = value.split_once('=') else {
            return Err(GroupRuleError::MissingSeparator(value.to_string()))
        };

        let label = label.trim();
        if label.is_empty() {
            return Err(GroupRuleError::EmptyLabel(value.to_string()))
        }

        let (field, pattern) = selector.split_once(':').unwrap_or(("description", selector));
        let pattern = pattern.trim().to_string();
        if pattern.is_empty() {
            return Err(GroupRuleError::EmptyPattern(value.to_string()))
        }

        let matcher = match field.trim().to_lowercase().as_str() {
            "description" => GroupMatcher::Description(pattern),
            "merchant" => GroupMatcher::Merchant(pattern),
            "text" => GroupMatcher::Text(pattern),
            "category" => GroupMatcher::Category(pattern),
            other => {
                return Err(GroupRuleError::UnknownField {
                    rule: value.to_string(),
                    field: other.to_string()
                })
            }
        };

        Ok(Self::new(label, matcher))
    }
}

/// Runs every configured rule over the same snapshot, in rule order.
pub fn group_reports(rules: &[GroupRule], records: &[TransactionRecord]) -> Vec<GroupReport> {
    rules.iter().map(|rule| rule.report(records)).collect()
}
