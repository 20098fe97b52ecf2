use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::{Row, SqlitePool};

use crate::domain::{Entry, EntryId};

use super::MIGRATION_001_INITIAL;

/// Repository for persisting and querying book entries.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given path.
    /// Creates the database file if it doesn't exist.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;

        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    /// Persist an entry. Inserts and assigns an identifier when the entry
    /// has none; otherwise updates the matching row in place. Returns the
    /// persisted entry with its identifier populated.
    pub async fn save(&self, entry: &Entry) -> Result<Entry> {
        match entry.id {
            None => {
                let result = sqlx::query(
                    r#"
                    INSERT INTO entries (item_date, item, income, expense, note)
                    VALUES (?, ?, ?, ?, ?)
                    "#,
                )
                .bind(entry.item_date.to_string())
                .bind(&entry.item)
                .bind(entry.income)
                .bind(entry.expense)
                .bind(&entry.note)
                .execute(&self.pool)
                .await
                .context("Failed to insert entry")?;

                Ok(entry.clone().with_id(result.last_insert_rowid()))
            }
            Some(id) => {
                sqlx::query(
                    r#"
                    UPDATE entries
                    SET item_date = ?, item = ?, income = ?, expense = ?, note = ?
                    WHERE id = ?
                    "#,
                )
                .bind(entry.item_date.to_string())
                .bind(&entry.item)
                .bind(entry.income)
                .bind(entry.expense)
                .bind(&entry.note)
                .bind(id)
                .execute(&self.pool)
                .await
                .context("Failed to update entry")?;

                Ok(entry.clone())
            }
        }
    }

    /// All stored entries, unordered. Ordering is the caller's concern.
    pub async fn find_all(&self) -> Result<Vec<Entry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, item_date, item, income, expense, note
            FROM entries
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list entries")?;

        rows.iter().map(Self::row_to_entry).collect()
    }

    /// Get an entry by identifier.
    pub async fn find_by_id(&self, id: EntryId) -> Result<Option<Entry>> {
        let row = sqlx::query(
            r#"
            SELECT id, item_date, item, income, expense, note
            FROM entries
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch entry")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_entry(&row)?)),
            None => Ok(None),
        }
    }

    /// Delete an entry by identifier. Deleting a missing identifier
    /// affects zero rows and is not an error.
    pub async fn delete_by_id(&self, id: EntryId) -> Result<()> {
        sqlx::query("DELETE FROM entries WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete entry")?;
        Ok(())
    }

    fn row_to_entry(row: &sqlx::sqlite::SqliteRow) -> Result<Entry> {
        let date_str: String = row.get("item_date");

        Ok(Entry {
            id: Some(row.get("id")),
            item_date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                .context("Invalid item_date")?,
            item: row.get("item"),
            income: row.get("income"),
            expense: row.get("expense"),
            note: row.get("note"),
        })
    }
}
