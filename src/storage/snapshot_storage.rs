use crate::models::{Category, TransactionRecord};
use crate::storage::TransactionSource;
use crate::types::{DateWindow, TransactionId};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory snapshot of the records and categories the storage side serves.
pub struct SnapshotStorage {
    transactions: Arc<DashMap<TransactionId, TransactionRecord>>,
    categories: Arc<DashMap<String, Category>>
}

impl SnapshotStorage {
    pub fn new() -> Self {
        Self {
            transactions: Arc::new(DashMap::new()),
            categories: Arc::new(DashMap::new())
        }
    }

    /// Stores `record` unless its id is already known. Returns `false` for duplicates.
    pub fn insert_transaction(&self, record: TransactionRecord) -> bool {
        match self.transactions.entry(record.id.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
        }
    }

    pub fn upsert_category(&self, category: Category) {
        self.categories.insert(category.name.clone(), category);
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

impl Default for SnapshotStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionSource for SnapshotStorage {
    fn transactions(&self, window: Option<&DateWindow>) -> Vec<TransactionRecord> {
        let mut records: Vec<TransactionRecord> = self.transactions.iter()
            .filter(|item| window.is_none_or(|window| window.contains(item.value().booked_at)))
            .map(|item| item.value().clone())
            .collect();

        //NOTE: DashMap iteration order is arbitrary, the id tie-break keeps same-day records deterministic
        records.sort_by(|left, right| right.booked_at.cmp(&left.booked_at).then_with(|| left.id.cmp(&right.id)));

        records
    }

    fn categories(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = self.categories.iter()
            .map(|item| item.value().clone())
            .collect();

        categories.sort_by(|left, right| left.name.cmp(&right.name));

        categories
    }
}
