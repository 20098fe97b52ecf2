use chrono::NaiveDate;

use crate::domain::{self, Amount, Entry, EntryId, EntryKind};
use crate::storage::Repository;

use super::AppError;

/// Application service providing high-level operations for the household
/// book. This is the primary interface for any client (CLI, API, TUI, etc.).
pub struct LedgerService {
    repo: Repository,
    unknown_kind_policy: UnknownKindPolicy,
}

/// User-submitted data for one book line. `kind` carries the raw
/// discriminator exactly as submitted; the service decides what to do
/// with values it does not recognize.
#[derive(Debug, Clone)]
pub struct EntryForm {
    pub item_date: NaiveDate,
    pub item: String,
    pub price: Amount,
    pub note: Option<String>,
    pub kind: String,
}

/// What to do when a form's kind is neither "income" nor "expense".
///
/// `Reject` fails with an explicit error before anything is stored.
/// `Ignore` drops the submission without error or store call, for
/// compatibility with systems that treated this as a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownKindPolicy {
    #[default]
    Reject,
    Ignore,
}

/// Running totals of the book, computed from a single fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSummary {
    pub total_income: Amount,
    pub total_expense: Amount,
    pub net_worth: Amount,
}

impl LedgerService {
    /// Create a new ledger service with the given repository.
    /// Unknown entry kinds are rejected with an error.
    pub fn new(repo: Repository) -> Self {
        Self {
            repo,
            unknown_kind_policy: UnknownKindPolicy::default(),
        }
    }

    /// Create a service with an explicit policy for unknown entry kinds.
    pub fn with_unknown_kind_policy(repo: Repository, policy: UnknownKindPolicy) -> Self {
        Self {
            repo,
            unknown_kind_policy: policy,
        }
    }

    /// Initialize a new database at the given path.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::new(repo))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        Ok(Self::new(repo))
    }

    /// Register a new entry from user input. The store assigns the
    /// identifier; callers that need the stored record re-query.
    pub async fn register(&self, form: EntryForm) -> Result<(), AppError> {
        let Some(kind) = self.resolve_kind(&form.kind)? else {
            return Ok(());
        };
        validate_price(form.price)?;

        let entry = Entry::new(kind, form.item_date, form.item, form.price, form.note);
        self.repo.save(&entry).await?;
        Ok(())
    }

    /// All entries, newest first: date descending, then identifier
    /// descending among same-day entries.
    pub async fn list(&self) -> Result<Vec<Entry>, AppError> {
        let entries = self.repo.find_all().await?;
        Ok(domain::sort_newest_first(entries))
    }

    /// Cumulative income minus cumulative expense. 0 for an empty book;
    /// may be negative.
    pub async fn net_worth(&self) -> Result<Amount, AppError> {
        let entries = self.repo.find_all().await?;
        Ok(domain::net_worth(&entries))
    }

    /// Running totals for display next to the entry list.
    pub async fn summary(&self) -> Result<LedgerSummary, AppError> {
        let entries = self.repo.find_all().await?;
        Ok(LedgerSummary {
            total_income: domain::total_income(&entries),
            total_expense: domain::total_expense(&entries),
            net_worth: domain::net_worth(&entries),
        })
    }

    /// Look up a single entry by identifier.
    pub async fn get(&self, id: EntryId) -> Result<Entry, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::EntryNotFound(id))
    }

    /// Replace the entry with the given identifier. Both amount fields are
    /// fully rewritten from the form: the non-selected side goes to 0
    /// regardless of what it held before.
    pub async fn update(&self, id: EntryId, form: EntryForm) -> Result<(), AppError> {
        let Some(kind) = self.resolve_kind(&form.kind)? else {
            return Ok(());
        };
        validate_price(form.price)?;

        // The record must exist before we overwrite it; the caller
        // typically loaded it to populate the edit form.
        self.get(id).await?;

        let replacement =
            Entry::new(kind, form.item_date, form.item, form.price, form.note).with_id(id);
        self.repo.save(&replacement).await?;
        Ok(())
    }

    /// Delete the entry with the given identifier. Deleting an identifier
    /// that no longer exists is not an error.
    pub async fn delete(&self, id: EntryId) -> Result<(), AppError> {
        self.repo.delete_by_id(id).await?;
        Ok(())
    }

    /// Map the raw form discriminator to a kind. `Ok(None)` means the
    /// submission should be silently dropped (Ignore policy).
    fn resolve_kind(&self, raw: &str) -> Result<Option<EntryKind>, AppError> {
        match EntryKind::from_str(raw) {
            Some(kind) => Ok(Some(kind)),
            None => match self.unknown_kind_policy {
                UnknownKindPolicy::Reject => Err(AppError::UnknownEntryKind(raw.to_string())),
                UnknownKindPolicy::Ignore => Ok(None),
            },
        }
    }
}

/// Stored amounts are non-negative; a zero price is allowed and produces
/// an entry with no effect on the totals.
fn validate_price(price: Amount) -> Result<(), AppError> {
    if price < 0 {
        return Err(AppError::InvalidAmount(format!(
            "price must not be negative, got {}",
            price
        )));
    }
    Ok(())
}
