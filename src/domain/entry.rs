use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Amount;

/// Identifier assigned by the storage layer on first save.
pub type EntryId = i64;

/// Whether a submitted amount is treated as income or expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Money coming in (salary, gifts, refunds)
    Income,
    /// Money going out (groceries, rent, bills)
    Expense,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Income => "income",
            EntryKind::Expense => "expense",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "income" => Some(EntryKind::Income),
            "expense" => Some(EntryKind::Expense),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single line of the household book: either an income or an expense.
///
/// Exactly one of `income`/`expense` is non-zero for any meaningful entry;
/// `Entry::new` enforces this by writing the amount into the side selected
/// by the kind and zeroing the other. `id` is `None` until the storage
/// layer assigns one on first save, and stable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: Option<EntryId>,
    /// Calendar date of the transaction (no time component)
    pub item_date: NaiveDate,
    /// Free-text label of what the money was for
    pub item: String,
    /// Amount recorded as income (0 for an expense line)
    pub income: Amount,
    /// Amount recorded as expense (0 for an income line)
    pub expense: Amount,
    /// Optional free-text remark
    pub note: Option<String>,
}

impl Entry {
    /// Create a transient (not yet persisted) entry. The submitted amount
    /// lands on the side selected by `kind`; the other side is 0.
    pub fn new(
        kind: EntryKind,
        item_date: NaiveDate,
        item: impl Into<String>,
        amount: Amount,
        note: Option<String>,
    ) -> Self {
        let (income, expense) = match kind {
            EntryKind::Income => (amount, 0),
            EntryKind::Expense => (0, amount),
        };
        Self {
            id: None,
            item_date,
            item: item.into(),
            income,
            expense,
            note,
        }
    }

    pub fn with_id(mut self, id: EntryId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Which side of the book this entry sits on, derived from the amounts.
    /// A both-zero entry reads as income with amount 0; it has no effect on
    /// any aggregate either way.
    pub fn kind(&self) -> EntryKind {
        if self.expense != 0 {
            EntryKind::Expense
        } else {
            EntryKind::Income
        }
    }

    /// The non-zero side of the entry.
    pub fn amount(&self) -> Amount {
        match self.kind() {
            EntryKind::Income => self.income,
            EntryKind::Expense => self.expense,
        }
    }

    /// Income as positive, expense as negative. Useful for running totals.
    pub fn signed_amount(&self) -> Amount {
        self.income - self.expense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_entry_kind_roundtrip() {
        for kind in [EntryKind::Income, EntryKind::Expense] {
            let s = kind.as_str();
            let parsed = EntryKind::from_str(s).unwrap();
            assert_eq!(kind, parsed);
        }
    }

    #[test]
    fn test_entry_kind_parse_is_case_insensitive() {
        assert_eq!(EntryKind::from_str("Income"), Some(EntryKind::Income));
        assert_eq!(EntryKind::from_str("EXPENSE"), Some(EntryKind::Expense));
        assert_eq!(EntryKind::from_str("transfer"), None);
        assert_eq!(EntryKind::from_str(""), None);
    }

    #[test]
    fn test_income_entry_zeroes_expense() {
        let entry = Entry::new(EntryKind::Income, date("2022-03-01"), "salary", 250000, None);

        assert_eq!(entry.income, 250000);
        assert_eq!(entry.expense, 0);
        assert_eq!(entry.kind(), EntryKind::Income);
        assert_eq!(entry.amount(), 250000);
        assert_eq!(entry.signed_amount(), 250000);
        assert!(!entry.is_persisted());
    }

    #[test]
    fn test_expense_entry_zeroes_income() {
        let entry = Entry::new(
            EntryKind::Expense,
            date("2022-03-02"),
            "groceries",
            4200,
            Some("weekly shop".into()),
        );

        assert_eq!(entry.income, 0);
        assert_eq!(entry.expense, 4200);
        assert_eq!(entry.kind(), EntryKind::Expense);
        assert_eq!(entry.amount(), 4200);
        assert_eq!(entry.signed_amount(), -4200);
        assert_eq!(entry.note.as_deref(), Some("weekly shop"));
    }

    #[test]
    fn test_with_id_marks_persisted() {
        let entry = Entry::new(EntryKind::Income, date("2022-03-01"), "salary", 100, None);
        let saved = entry.with_id(7);

        assert_eq!(saved.id, Some(7));
        assert!(saved.is_persisted());
    }
}
