use thiserror::Error;

use crate::domain::EntryId;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Entry not found: {0}")]
    EntryNotFound(EntryId),

    #[error("Unknown entry kind: '{0}' (expected 'income' or 'expense')")]
    UnknownEntryKind(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}
