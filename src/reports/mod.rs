//! Reports module for loan-ledger
//!
//! Pure functions over an in-memory [`Ledger`](crate::models::Ledger): each
//! report filters or groups the records it is given and never touches disk.
//! An empty ledger yields zero totals and empty collections, never an error.
//!
//! Every report also knows how to render itself for the terminal and as CSV,
//! and serializes through serde for JSON/YAML output.

pub mod collection_trend;
pub mod daily_summary;
pub mod dashboard;
pub mod frequency;
pub mod overdue;
pub mod transactions;

pub use collection_trend::{daily_collection_trend, CollectionTrendReport, TrendPoint};
pub use daily_summary::{daily_summary, DailySummary};
pub use dashboard::Dashboard;
pub use frequency::{frequency_summary, FrequencyReport, FrequencyStats};
pub use overdue::{overdue_for_date, OverdueEntry, OverdueReport};
pub use transactions::{TransactionFilter, TransactionTable};

use std::io::Write;

use serde::Serialize;

use crate::config::Settings;
use crate::error::LedgerResult;

/// Common rendering surface shared by every report
pub trait Report: Serialize {
    /// Human-readable form for the terminal
    fn format_terminal(&self, settings: &Settings) -> String;

    /// Spreadsheet-friendly form
    fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()>;
}

/// Map a csv writer failure to an export error
pub(crate) fn export_err(e: impl std::fmt::Display) -> crate::error::LedgerError {
    crate::error::LedgerError::Export(e.to_string())
}
