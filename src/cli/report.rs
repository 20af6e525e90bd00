//! CLI commands for reports
//!
//! Each subcommand builds one report from the loaded ledger and writes it
//! to stdout or to `--output` in the chosen format.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use tracing::debug;

use super::parse_date_arg;
use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::export::{write_report, OutputFormat};
use crate::models::Ledger;
use crate::reports::{
    CollectionTrendReport, DailySummary, Dashboard, FrequencyReport, OverdueReport, Report,
    TransactionFilter, TransactionTable,
};

/// Where and how a report is written
#[derive(Args, Debug, Clone, Default)]
pub struct OutputOptions {
    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Debit, collection and interest totals for one date
    Summary {
        /// Date to report (YYYY-MM-DD); defaults to the earliest ledger date
        #[arg(short, long)]
        date: Option<String>,

        #[command(flatten)]
        opts: OutputOptions,
    },

    /// Customers flagged overdue on one date
    Overdue {
        /// Date to report (YYYY-MM-DD); defaults to the earliest ledger date
        #[arg(short, long)]
        date: Option<String>,

        #[command(flatten)]
        opts: OutputOptions,
    },

    /// Customers and interest paid per payment frequency
    #[command(alias = "freq")]
    Frequency {
        #[command(flatten)]
        opts: OutputOptions,
    },

    /// Total collection per day
    Trend {
        #[command(flatten)]
        opts: OutputOptions,
    },

    /// The full transaction table
    #[command(alias = "txn")]
    Transactions {
        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(short, long)]
        end: Option<String>,

        /// Filter by customer name (partial match)
        #[arg(short, long)]
        customer: Option<String>,

        /// Filter by payment frequency
        #[arg(long)]
        frequency: Option<String>,

        /// Show only overdue rows
        #[arg(long)]
        overdue: bool,

        #[command(flatten)]
        opts: OutputOptions,
    },

    /// Every report for one date
    Dashboard {
        /// Date to report (YYYY-MM-DD); defaults to the earliest ledger date
        #[arg(short, long)]
        date: Option<String>,

        #[command(flatten)]
        opts: OutputOptions,
    },
}

/// Handle report commands
pub fn handle_report_command(
    ledger: &Ledger,
    settings: &Settings,
    cmd: ReportCommands,
) -> LedgerResult<()> {
    debug!(?cmd, "Dispatching report command");

    match cmd {
        ReportCommands::Summary { date, opts } => {
            let date = report_date(ledger, date.as_deref())?;
            emit(&DailySummary::generate(ledger, date), settings, &opts)
        }
        ReportCommands::Overdue { date, opts } => {
            let date = report_date(ledger, date.as_deref())?;
            emit(&OverdueReport::generate(ledger, date), settings, &opts)
        }
        ReportCommands::Frequency { opts } => {
            emit(&FrequencyReport::generate(ledger), settings, &opts)
        }
        ReportCommands::Trend { opts } => {
            emit(&CollectionTrendReport::generate(ledger), settings, &opts)
        }
        ReportCommands::Transactions {
            start,
            end,
            customer,
            frequency,
            overdue,
            opts,
        } => {
            let filter = TransactionFilter {
                start_date: start.map(|s| parse_date_arg(&s, "start")).transpose()?,
                end_date: end.map(|e| parse_date_arg(&e, "end")).transpose()?,
                customer_contains: customer,
                frequency,
                overdue_only: overdue,
            };
            emit(&TransactionTable::generate(ledger, filter), settings, &opts)
        }
        ReportCommands::Dashboard { date, opts } => {
            let date = report_date(ledger, date.as_deref())?;
            emit(&Dashboard::generate(ledger, date), settings, &opts)
        }
    }
}

/// The requested date, or the dashboard's default for this ledger
fn report_date(ledger: &Ledger, arg: Option<&str>) -> LedgerResult<NaiveDate> {
    match arg {
        Some(value) => parse_date_arg(value, "report"),
        None => Ok(Dashboard::default_date(
            ledger,
            chrono::Local::now().date_naive(),
        )),
    }
}

fn emit<R: Report>(report: &R, settings: &Settings, opts: &OutputOptions) -> LedgerResult<()> {
    if let Some(path) = &opts.output {
        let file = File::create(path).map_err(|e| {
            LedgerError::Export(format!(
                "Failed to create file {}: {}",
                path.display(),
                e
            ))
        })?;
        let mut writer = BufWriter::new(file);
        write_report(report, opts.format, settings, &mut writer)?;
        println!("Report written to: {}", path.display());
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write_report(report, opts.format, settings, &mut handle)?;
    }

    Ok(())
}
