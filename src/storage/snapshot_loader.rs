use crate::models::{Category, ImportSummary, TransactionRecord};
use crate::storage::SnapshotStorage;
use anyhow::Context;
use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{debug, warn};

/// One row of the normalized snapshot export, with the category joined in flat columns.
#[derive(Debug, Deserialize)]
struct TransactionRow {
    id: String,
    booked_at: NaiveDate,
    amount: Decimal,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    purpose: Option<String>,
    #[serde(default)]
    merchant: Option<String>,
    #[serde(default)]
    iban: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    category_color: Option<String>
}

impl From<TransactionRow> for TransactionRecord {
    fn from(row: TransactionRow) -> Self {
        let category = row.category.map(|name| Category {
            name,
            color: row.category_color
        });

        TransactionRecord {
            id: row.id,
            booked_at: row.booked_at,
            amount: row.amount,
            description: row.description,
            purpose: row.purpose,
            merchant: row.merchant,
            iban: row.iban,
            category
        }
    }
}

enum RowOutcome {
    Parsed(TransactionRecord),
    Malformed(String)
}

/// Fills a [`SnapshotStorage`] from CSV snapshot files.
pub struct SnapshotLoader {
    storage: Arc<SnapshotStorage>,
    backpressure: usize
}

impl SnapshotLoader {
    pub fn new(storage: Arc<SnapshotStorage>) -> Self {
        Self {
            storage,
            backpressure: 256
        }
    }

    /// Streams the transaction snapshot at `path` into storage.
    ///
    /// Malformed rows and duplicate ids are counted in the returned summary
    /// instead of failing the load. An unreadable file is an error.
    pub async fn load_transactions(&self, path: impl AsRef<Path>) -> anyhow::Result<ImportSummary> {
        let (sender, receiver) = mpsc::channel::<RowOutcome>(self.backpressure);
        let reader_handle = spawn_csv_reader(path.as_ref().to_path_buf(), sender);
        let summary = self.store_rows(receiver).await;

        reader_handle.await.context("CSV reader task panicked")??;

        Ok(summary)
    }

    /// Loads a `name,color` category list, replacing categories with the same name.
    pub async fn load_categories(&self, path: impl AsRef<Path>) -> anyhow::Result<usize> {
        let path = path.as_ref().to_path_buf();

        let categories = spawn_blocking(move || -> anyhow::Result<Vec<Category>> {
            let file = File::open(&path).with_context(|| format!("Error opening categories at path: {}", path.display()))?;

            let mut reader = ReaderBuilder::new()
                .trim(Trim::All)
                .flexible(true)
                .from_reader(BufReader::new(file));

            let mut categories = Vec::new();
            for result in reader.deserialize::<Category>() {
                match result {
                    Ok(category) => categories.push(category),
                    Err(error) => warn!("Category deserialization error: {error}")
                }
            }

            Ok(categories)
        })
        .await
        .context("Category reader task panicked")??;

        let count = categories.len();
        for category in categories {
            self.storage.upsert_category(category);
        }

        debug!("Loaded {count} categories");

        Ok(count)
    }

    async fn store_rows(&self, mut receiver: mpsc::Receiver<RowOutcome>) -> ImportSummary {
        let mut summary = ImportSummary::default();

        while let Some(outcome) = receiver.recv().await {
            match outcome {
                RowOutcome::Parsed(record) => {
                    let id = record.id.clone();

                    if self.storage.insert_transaction(record) {
                        summary.inserted += 1;
                        debug!("Transaction [{id}] stored");
                    } else {
                        summary.duplicates_skipped += 1;
                        warn!("Duplicate transaction [{id}] skipped");
                    }
                }
                RowOutcome::Malformed(message) => {
                    warn!("{message}");
                    summary.errors.push(message);
                }
            }
        }

        summary
    }
}

fn spawn_csv_reader(path: PathBuf, sender: mpsc::Sender<RowOutcome>) -> JoinHandle<anyhow::Result<()>> {
    spawn_blocking(move || {
        let file = File::open(&path).with_context(|| format!("Error opening CSV at path: {}", path.display()))?;

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(BufReader::new(file));

        for result in reader.deserialize::<TransactionRow>() {
            let outcome = match result {
                Ok(row) => RowOutcome::Parsed(row.into()),
                Err(error) => RowOutcome::Malformed(format!("CSV deserialization error: {error}"))
            };

            if sender.blocking_send(outcome).is_err() {
                break;
            }
        }

        Ok(())
    })
}
