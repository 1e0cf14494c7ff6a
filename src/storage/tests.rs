use super::{SnapshotLoader, SnapshotStorage, TransactionSource};
use crate::models::{Category, TransactionRecord};
use crate::types::month_range;
use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::io::Write;
use std::str::FromStr;
use std::sync::Arc;
use tempfile::NamedTempFile;

const SNAPSHOT_HEADER: &str = "id,booked_at,amount,description,purpose,merchant,iban,category,category_color";

fn create_record(id: &str, booked_at: &str, amount: &str) -> Result<TransactionRecord> {
    Ok(TransactionRecord::new(id, NaiveDate::from_str(booked_at)?, Decimal::from_str(amount)?))
}

fn create_temporary_csv(header: &str, rows: &[&str]) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;

    writeln!(file, "{header}")?;

    for row in rows {
        writeln!(file, "{row}")?;
    }

    Ok(file)
}

#[test]
fn test_storage_keeps_first_record_for_duplicate_ids() -> Result<()> {
    let storage = SnapshotStorage::new();

    assert!(storage.is_empty());
    assert!(storage.insert_transaction(create_record("tx-1", "2026-03-01", "-10")?));
    assert!(!storage.insert_transaction(create_record("tx-1", "2026-03-02", "-99")?));
    assert_eq!(storage.len(), 1);

    let records = storage.transactions(None);
    assert_eq!(records[0].amount, Decimal::from_str("-10")?);

    Ok(())
}

#[test]
fn test_storage_serves_window_newest_first() -> Result<()> {
    let storage = SnapshotStorage::new();
    storage.insert_transaction(create_record("feb", "2026-02-28", "-1")?);
    storage.insert_transaction(create_record("mar-b", "2026-03-15", "-2")?);
    storage.insert_transaction(create_record("mar-a", "2026-03-15", "-3")?);
    storage.insert_transaction(create_record("mar-end", "2026-03-31", "-4")?);
    storage.insert_transaction(create_record("apr", "2026-04-01", "-5")?);

    let window = month_range(2026, 2)?;
    let ids: Vec<String> = storage.transactions(Some(&window)).into_iter().map(|record| record.id).collect();

    assert_eq!(ids, vec!["mar-end", "mar-a", "mar-b"]);
    assert_eq!(storage.transactions(None).len(), 5);

    Ok(())
}

#[test]
fn test_storage_orders_categories_by_name() {
    let storage = SnapshotStorage::new();
    storage.upsert_category(Category::new("Rent"));
    storage.upsert_category(Category::new("Groceries"));
    storage.upsert_category(Category::new("Rent").with_color("#ef4444"));

    let categories = storage.categories();

    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].name, "Groceries");
    assert_eq!(categories[1].color.as_deref(), Some("#ef4444"));
}

#[tokio::test]
async fn test_loader_imports_snapshot_and_reports_counts() -> Result<()> {
    let file = create_temporary_csv(SNAPSHOT_HEADER, &[
        "tx-1,2026-03-02,2500.00,Salary,,Employer AG,CH93 0076 2011 6238 5295 7,Income,#16a34a",
        "tx-2,2026-03-05,-42.50,Card payment,Groceries,Coop Supermarkt,,Groceries,",
        "tx-3,2026-03-09,-12.00,TWINT payment,Lunch,,,,",
        "tx-2,2026-03-05,-42.50,Card payment,Groceries,Coop Supermarkt,,Groceries,",
        "tx-4,2026-13-40,-1.00,Broken date,,,,,"
    ])?;

    let storage = Arc::new(SnapshotStorage::new());
    let loader = SnapshotLoader::new(storage.clone());
    let summary = loader.load_transactions(file.path()).await?;

    assert_eq!(summary.inserted, 3);
    assert_eq!(summary.duplicates_skipped, 1);
    assert_eq!(summary.errors.len(), 1);
    assert_eq!(summary.rows_processed(), 4);

    let records = storage.transactions(None);
    assert_eq!(records.len(), 3);

    let salary = records.iter().find(|record| record.id == "tx-1").ok_or_else(|| anyhow::anyhow!("tx-1 missing"))?;
    assert_eq!(salary.amount, Decimal::from_str("2500")?);
    assert_eq!(salary.category_name(), "Income");
    assert_eq!(salary.category.as_ref().and_then(|category| category.color.as_deref()), Some("#16a34a"));
    assert_eq!(salary.purpose, None);

    let lunch = records.iter().find(|record| record.id == "tx-3").ok_or_else(|| anyhow::anyhow!("tx-3 missing"))?;
    assert_eq!(lunch.category, None);
    assert_eq!(lunch.purpose.as_deref(), Some("Lunch"));

    Ok(())
}

#[tokio::test]
async fn test_loader_fails_for_missing_file() {
    let storage = Arc::new(SnapshotStorage::new());
    let loader = SnapshotLoader::new(storage.clone());

    let result = loader.load_transactions("does/not/exist.csv").await;

    assert!(result.is_err());
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_loader_reads_category_list() -> Result<()> {
    let file = create_temporary_csv("name,color", &["Rent,#ef4444", "Groceries,", "Income,#16a34a"])?;

    let storage = Arc::new(SnapshotStorage::new());
    let loader = SnapshotLoader::new(storage.clone());

    assert_eq!(loader.load_categories(file.path()).await?, 3);

    let names: Vec<String> = storage.categories().into_iter().map(|category| category.name).collect();
    assert_eq!(names, vec!["Groceries", "Income", "Rent"]);

    Ok(())
}
