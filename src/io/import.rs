use anyhow::Result;
use chrono::NaiveDate;
use std::io::Read;

use crate::application::{EntryForm, LedgerService};
use crate::domain::{Amount, EntryKind};

/// Result of an import operation
#[derive(Debug, Clone)]
pub struct ImportResult {
    pub imported: usize,
    pub skipped: usize,
    pub errors: Vec<ImportError>,
}

/// Error that occurred during import
#[derive(Debug, Clone)]
pub struct ImportError {
    pub line: usize,
    pub field: Option<String>,
    pub error: String,
}

/// Options for import operations
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub dry_run: bool,
    pub validate_only: bool,
}

/// Importer for loading entries into the book
pub struct Importer<'a> {
    service: &'a LedgerService,
}

impl<'a> Importer<'a> {
    pub fn new(service: &'a LedgerService) -> Self {
        Self { service }
    }

    /// Import entries from CSV in the export format
    /// (`id,item_date,item,income,expense,note`). The id column is ignored;
    /// the store assigns fresh identifiers. Malformed lines are collected
    /// as errors and do not abort the rest of the file.
    pub async fn import_entries_csv<R: Read>(
        &self,
        reader: R,
        options: ImportOptions,
    ) -> Result<ImportResult> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut imported = 0;
        let mut skipped = 0;
        let mut errors = Vec::new();

        for (line_num, result) in csv_reader.records().enumerate() {
            let line = line_num + 2; // +2 for header and 0-indexing

            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    errors.push(ImportError {
                        line,
                        field: None,
                        error: format!("CSV parse error: {}", e),
                    });
                    continue;
                }
            };

            let date_str = record.get(1).unwrap_or("");
            let item = record.get(2).unwrap_or("");
            let income_str = record.get(3).unwrap_or("");
            let expense_str = record.get(4).unwrap_or("");
            let note = record.get(5).and_then(|s| {
                if s.is_empty() {
                    None
                } else {
                    Some(s.to_string())
                }
            });

            let item_date = match NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
                Ok(d) => d,
                Err(e) => {
                    errors.push(ImportError {
                        line,
                        field: Some("item_date".to_string()),
                        error: format!("Invalid date: {}", e),
                    });
                    continue;
                }
            };

            let income: Amount = match income_str.parse() {
                Ok(a) => a,
                Err(_) => {
                    errors.push(ImportError {
                        line,
                        field: Some("income".to_string()),
                        error: format!("Invalid amount: '{}'", income_str),
                    });
                    continue;
                }
            };

            let expense: Amount = match expense_str.parse() {
                Ok(a) => a,
                Err(_) => {
                    errors.push(ImportError {
                        line,
                        field: Some("expense".to_string()),
                        error: format!("Invalid amount: '{}'", expense_str),
                    });
                    continue;
                }
            };

            // A line is one side of the book, never both.
            let (kind, price) = if income != 0 && expense != 0 {
                errors.push(ImportError {
                    line,
                    field: None,
                    error: "Both income and expense are non-zero".to_string(),
                });
                continue;
            } else if expense != 0 {
                (EntryKind::Expense, expense)
            } else {
                (EntryKind::Income, income)
            };

            if options.dry_run || options.validate_only {
                skipped += 1;
                continue;
            }

            let form = EntryForm {
                item_date,
                item: item.to_string(),
                price,
                note,
                kind: kind.as_str().to_string(),
            };

            match self.service.register(form).await {
                Ok(()) => imported += 1,
                Err(e) => {
                    errors.push(ImportError {
                        line,
                        field: None,
                        error: format!("Failed to register entry: {}", e),
                    });
                }
            }
        }

        Ok(ImportResult {
            imported,
            skipped,
            errors,
        })
    }
}
