// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use kakeibo::application::{EntryForm, LedgerService, UnknownKindPolicy};
use kakeibo::domain::Amount;
use kakeibo::storage::Repository;
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(LedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = LedgerService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Helper to create a test service with an explicit unknown-kind policy
pub async fn test_service_with_policy(
    policy: UnknownKindPolicy,
) -> Result<(LedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite:{}?mode=rwc", db_path.to_str().unwrap());
    let repo = Repository::init(&db_url).await?;
    Ok((LedgerService::with_unknown_kind_policy(repo, policy), temp_dir))
}

/// Helper to parse a date string into NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Build an income form
pub fn income_form(date: &str, item: &str, price: Amount) -> EntryForm {
    EntryForm {
        item_date: parse_date(date),
        item: item.to_string(),
        price,
        note: None,
        kind: "income".to_string(),
    }
}

/// Build an expense form
pub fn expense_form(date: &str, item: &str, price: Amount) -> EntryForm {
    EntryForm {
        item_date: parse_date(date),
        item: item.to_string(),
        price,
        note: None,
        kind: "expense".to_string(),
    }
}
