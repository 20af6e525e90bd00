//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the loader and the reports.

pub mod browse;
pub mod config;
pub mod report;

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};

pub use browse::run_browse;
pub use config::{handle_config_command, ConfigCommands};
pub use report::{handle_report_command, OutputOptions, ReportCommands};

/// Pick the ledger source: `--file` first, then `default_source`
pub fn resolve_source(file: Option<PathBuf>, settings: &Settings) -> LedgerResult<PathBuf> {
    file.or_else(|| settings.default_source.clone())
        .ok_or(LedgerError::NoSource)
}

/// Parse a YYYY-MM-DD command-line date
pub fn parse_date_arg(value: &str, label: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        LedgerError::Validation(format!(
            "Invalid {} date format: {}. Use YYYY-MM-DD",
            label, value
        ))
    })
}
