use super::{Amount, Entry};

/// Order entries newest first: by date descending, then by identifier
/// descending so same-day entries show the most recently registered first.
/// Returns a new vector; the store's result is never reordered in place.
/// Entries without an identifier sort after persisted ones on equal dates,
/// which keeps the comparator total even for transient input.
pub fn sort_newest_first(mut entries: Vec<Entry>) -> Vec<Entry> {
    entries.sort_by(|a, b| {
        b.item_date
            .cmp(&a.item_date)
            .then_with(|| b.id.cmp(&a.id))
    });
    entries
}

/// Total recorded income across all entries.
pub fn total_income(entries: &[Entry]) -> Amount {
    entries.iter().map(|e| e.income).sum()
}

/// Total recorded expense across all entries.
pub fn total_expense(entries: &[Entry]) -> Amount {
    entries.iter().map(|e| e.expense).sum()
}

/// Net worth of the book: cumulative income minus cumulative expense.
/// Empty input yields 0; the result may be negative.
pub fn net_worth(entries: &[Entry]) -> Amount {
    entries.iter().fold(0, |acc, e| acc + e.income - e.expense)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::{EntryId, EntryKind};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn entry(id: EntryId, date_str: &str, kind: EntryKind, amount: Amount) -> Entry {
        Entry::new(kind, date(date_str), "item", amount, None).with_id(id)
    }

    #[test]
    fn test_sort_empty() {
        assert!(sort_newest_first(Vec::new()).is_empty());
    }

    #[test]
    fn test_sort_by_date_descending() {
        let entries = vec![
            entry(1, "2022-01-20", EntryKind::Income, 100),
            entry(2, "2022-07-20", EntryKind::Income, 100),
            entry(3, "2022-05-03", EntryKind::Expense, 100),
        ];

        let sorted = sort_newest_first(entries);
        let dates: Vec<String> = sorted.iter().map(|e| e.item_date.to_string()).collect();

        assert_eq!(dates, vec!["2022-07-20", "2022-05-03", "2022-01-20"]);
    }

    #[test]
    fn test_sort_ties_break_by_id_descending() {
        let entries = vec![
            entry(2, "2022-05-03", EntryKind::Income, 100),
            entry(4, "2022-05-03", EntryKind::Expense, 100),
        ];

        let sorted = sort_newest_first(entries);
        let ids: Vec<Option<EntryId>> = sorted.iter().map(|e| e.id).collect();

        assert_eq!(ids, vec![Some(4), Some(2)]);
    }

    #[test]
    fn test_sort_unassigned_ids_sort_last_on_equal_dates() {
        let transient = Entry::new(EntryKind::Income, date("2022-05-03"), "item", 100, None);
        let entries = vec![transient, entry(1, "2022-05-03", EntryKind::Income, 100)];

        let sorted = sort_newest_first(entries);

        assert_eq!(sorted[0].id, Some(1));
        assert_eq!(sorted[1].id, None);
    }

    #[test]
    fn test_sort_does_not_lose_entries() {
        let entries = vec![
            entry(1, "2022-05-03", EntryKind::Income, 100),
            entry(2, "2022-05-03", EntryKind::Income, 100),
            entry(3, "2022-05-03", EntryKind::Income, 100),
        ];

        assert_eq!(sort_newest_first(entries).len(), 3);
    }

    #[test]
    fn test_net_worth_empty() {
        assert_eq!(net_worth(&[]), 0);
    }

    #[test]
    fn test_net_worth_mixed() {
        let entries = vec![
            entry(1, "2022-01-01", EntryKind::Income, 250000),
            entry(2, "2022-01-02", EntryKind::Expense, 4200),
            entry(3, "2022-01-03", EntryKind::Expense, 800),
        ];

        assert_eq!(net_worth(&entries), 245000);
        assert_eq!(total_income(&entries), 250000);
        assert_eq!(total_expense(&entries), 5000);
    }

    #[test]
    fn test_net_worth_can_go_negative() {
        let entries = vec![
            entry(1, "2022-01-01", EntryKind::Income, 1000),
            entry(2, "2022-01-02", EntryKind::Expense, 2500),
        ];

        assert_eq!(net_worth(&entries), -1500);
    }
}
