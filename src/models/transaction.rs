use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Category;
use crate::types::TransactionId;

/// Display and aggregation name for records without a category.
pub const UNASSIGNED: &str = "Unassigned";

/// Represents one posted bank transaction, joined with its category.
///
/// Records are owned by the storage side and handed to the engine as
/// immutable snapshots. Absent text fields read as empty strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Opaque, stable identifier used for de-duplication and display.
    pub id: TransactionId,
    /// Date the transaction posted.
    pub booked_at: NaiveDate,
    /// Positive for inflows, negative for outflows.
    pub amount: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub merchant: Option<String>,
    #[serde(default)]
    pub iban: Option<String>,
    #[serde(default)]
    pub category: Option<Category>
}

impl TransactionRecord {
    pub fn new(id: impl Into<TransactionId>, booked_at: NaiveDate, amount: Decimal) -> Self {
        Self {
            id: id.into(),
            booked_at,
            amount,
            description: None,
            purpose: None,
            merchant: None,
            iban: None,
            category: None
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = Some(purpose.into());
        self
    }

    pub fn with_merchant(mut self, merchant: impl Into<String>) -> Self {
        self.merchant = Some(merchant.into());
        self
    }

    pub fn with_iban(mut self, iban: impl Into<String>) -> Self {
        self.iban = Some(iban.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn purpose(&self) -> &str {
        self.purpose.as_deref().unwrap_or("")
    }

    pub fn merchant(&self) -> &str {
        self.merchant.as_deref().unwrap_or("")
    }

    pub fn iban(&self) -> &str {
        self.iban.as_deref().unwrap_or("")
    }

    pub fn category_name(&self) -> &str {
        resolve_category_name(self)
    }

    /// The free-text fields a search query is matched against.
    pub fn searchable_text(&self) -> [&str; 4] {
        [self.description(), self.purpose(), self.merchant(), self.iban()]
    }

    pub fn is_inflow(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    pub fn is_outflow(&self) -> bool {
        self.amount < Decimal::ZERO
    }
}

/// Resolves the category name every view compares against, falling back to [`UNASSIGNED`].
pub fn resolve_category_name(record: &TransactionRecord) -> &str {
    record.category.as_ref().map_or(UNASSIGNED, |category| category.name.as_str())
}
