use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use crate::application::{EntryForm, LedgerService};
use crate::domain::{format_amount, parse_amount, Entry, EntryId};
use crate::io::{Exporter, ImportOptions, Importer};

/// Kakeibo - Household Income/Expense Ledger
#[derive(Parser)]
#[command(name = "kakeibo")]
#[command(about = "A local-first household book for tracking income and expenses")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "kakeibo.db")]
    pub database: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Register a new entry
    Add {
        /// Entry kind: income, expense
        kind: String,

        /// Amount (e.g., "50.00" or "50")
        amount: String,

        /// What the money was for
        item: String,

        /// Date of the entry (ISO 8601 format: YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Free-text remark
        #[arg(short, long)]
        note: Option<String>,
    },

    /// List all entries, newest first
    List,

    /// Show income/expense totals and net worth
    Summary,

    /// Show a single entry in detail
    Show {
        /// Entry identifier
        id: EntryId,
    },

    /// Replace an existing entry
    Update {
        /// Entry identifier
        id: EntryId,

        /// Entry kind: income, expense
        kind: String,

        /// Amount (e.g., "50.00" or "50")
        amount: String,

        /// What the money was for
        item: String,

        /// Date of the entry (ISO 8601 format: YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Free-text remark
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Delete an entry
    Delete {
        /// Entry identifier
        id: EntryId,
    },

    /// Export the book to CSV or JSON
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Format: csv, json
        #[arg(short, long, default_value = "csv")]
        format: String,
    },

    /// Import entries from CSV
    Import {
        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,

        /// Preview without importing
        #[arg(long)]
        dry_run: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Init => {
                LedgerService::init(&self.database).await?;
                println!("Database initialized: {}", self.database);
            }

            Commands::Add {
                kind,
                amount,
                item,
                date,
                note,
            } => {
                let service = LedgerService::connect(&self.database).await?;
                let form = build_form(kind.clone(), &amount, item, date, note)?;
                service.register(form).await?;
                println!("Registered {} entry: {}", kind, amount);
            }

            Commands::List => {
                let service = LedgerService::connect(&self.database).await?;
                run_list_command(&service).await?;
            }

            Commands::Summary => {
                let service = LedgerService::connect(&self.database).await?;
                run_summary_command(&service).await?;
            }

            Commands::Show { id } => {
                let service = LedgerService::connect(&self.database).await?;
                run_show_command(&service, id).await?;
            }

            Commands::Update {
                id,
                kind,
                amount,
                item,
                date,
                note,
            } => {
                let service = LedgerService::connect(&self.database).await?;
                let form = build_form(kind, &amount, item, date, note)?;
                service.update(id, form).await?;
                println!("Updated entry {}", id);
            }

            Commands::Delete { id } => {
                let service = LedgerService::connect(&self.database).await?;
                service.delete(id).await?;
                println!("Deleted entry {}", id);
            }

            Commands::Export { output, format } => {
                let service = LedgerService::connect(&self.database).await?;
                run_export_command(&service, output.as_deref(), &format).await?;
            }

            Commands::Import { input, dry_run } => {
                let service = LedgerService::connect(&self.database).await?;
                run_import_command(&service, input.as_deref(), dry_run).await?;
            }
        }

        Ok(())
    }
}

/// Translate raw CLI input into the form the service expects. The kind
/// string is passed through untouched; validating it is the service's job.
fn build_form(
    kind: String,
    amount: &str,
    item: String,
    date: Option<String>,
    note: Option<String>,
) -> Result<EntryForm> {
    let price = parse_amount(amount).context("Invalid amount format. Use '50.00' or '50'")?;

    let item_date = match date {
        Some(date_str) => parse_date(&date_str)
            .with_context(|| format!("Invalid date format '{}'. Use YYYY-MM-DD", date_str))?,
        None => Local::now().date_naive(),
    };

    Ok(EntryForm {
        item_date,
        item,
        price,
        note,
        kind,
    })
}

fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(Into::into)
}

async fn run_list_command(service: &LedgerService) -> Result<()> {
    let entries = service.list().await?;
    if entries.is_empty() {
        println!("No entries found.");
        return Ok(());
    }

    println!(
        "{:<6} {:<12} {:<24} {:>12} {:>12}  {}",
        "ID", "DATE", "ITEM", "INCOME", "EXPENSE", "NOTE"
    );
    println!("{}", "-".repeat(76));
    for entry in &entries {
        println!(
            "{:<6} {:<12} {:<24} {:>12} {:>12}  {}",
            entry.id.map(|id| id.to_string()).unwrap_or_default(),
            entry.item_date,
            entry.item,
            format_amount(entry.income),
            format_amount(entry.expense),
            entry.note.as_deref().unwrap_or(""),
        );
    }

    let net = service.net_worth().await?;
    println!("{}", "-".repeat(76));
    println!("Net worth: {}", format_amount(net));

    Ok(())
}

async fn run_summary_command(service: &LedgerService) -> Result<()> {
    let summary = service.summary().await?;

    println!("Total income:  {}", format_amount(summary.total_income));
    println!("Total expense: {}", format_amount(summary.total_expense));
    println!("Net worth:     {}", format_amount(summary.net_worth));

    Ok(())
}

async fn run_show_command(service: &LedgerService, id: EntryId) -> Result<()> {
    let entry = service.get(id).await?;
    print_entry(&entry);
    Ok(())
}

fn print_entry(entry: &Entry) {
    println!("Entry {}", entry.id.map(|id| id.to_string()).unwrap_or_default());
    println!("  Date:   {}", entry.item_date);
    println!("  Item:   {}", entry.item);
    println!("  Kind:   {}", entry.kind());
    println!("  Amount: {}", format_amount(entry.amount()));
    if let Some(note) = &entry.note {
        println!("  Note:   {}", note);
    }
}

async fn run_export_command(
    service: &LedgerService,
    output: Option<&str>,
    format: &str,
) -> Result<()> {
    use std::fs::File;
    use std::io::{stdout, Write};

    let exporter = Exporter::new(service);

    // Determine output writer
    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    match format {
        "csv" => {
            let count = exporter.export_entries_csv(writer).await?;
            if output.is_some() {
                eprintln!("Exported {} entries", count);
            }
        }
        "json" => {
            let snapshot = exporter.export_full_json(writer).await?;
            if output.is_some() {
                eprintln!("Exported {} entries", snapshot.entries.len());
            }
        }
        other => {
            anyhow::bail!("Unknown export format: '{}'. Use csv or json", other);
        }
    }

    Ok(())
}

async fn run_import_command(
    service: &LedgerService,
    input: Option<&str>,
    dry_run: bool,
) -> Result<()> {
    use std::fs::File;
    use std::io::{stdin, Read};

    let reader: Box<dyn Read> = match input {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("Failed to open input file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdin()),
    };

    let importer = Importer::new(service);
    let options = ImportOptions {
        dry_run,
        ..Default::default()
    };
    let result = importer.import_entries_csv(reader, options).await?;

    if dry_run {
        println!("Dry run: {} entries would be imported", result.skipped);
    } else {
        println!("Imported {} entries", result.imported);
    }

    if !result.errors.is_empty() {
        eprintln!("{} line(s) had errors:", result.errors.len());
        for error in &result.errors {
            match &error.field {
                Some(field) => eprintln!("  line {} ({}): {}", error.line, field, error.error),
                None => eprintln!("  line {}: {}", error.line, error.error),
            }
        }
    }

    Ok(())
}
