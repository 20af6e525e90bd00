//! Report output in the formats the CLI offers
//!
//! - Table: the human-readable terminal rendering
//! - CSV: one sheet per report (spreadsheet-compatible)
//! - JSON / YAML: the serialized report shape, identical across both

pub mod json;
pub mod yaml;

use std::io::Write;

use clap::ValueEnum;

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::reports::Report;

pub use json::export_json;
pub use yaml::export_yaml;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Terminal tables
    #[default]
    Table,
    /// CSV rows
    Csv,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

/// Write `report` to `writer` in the requested format
pub fn write_report<R: Report, W: Write>(
    report: &R,
    format: OutputFormat,
    settings: &Settings,
    writer: &mut W,
) -> LedgerResult<()> {
    match format {
        OutputFormat::Table => {
            write!(writer, "{}", report.format_terminal(settings))
                .map_err(|e| LedgerError::Export(e.to_string()))?;
            writer
                .flush()
                .map_err(|e| LedgerError::Export(e.to_string()))
        }
        OutputFormat::Csv => report.export_csv(writer),
        OutputFormat::Json => export_json(report, writer),
        OutputFormat::Yaml => export_yaml(report, writer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ledger, Money, OverdueFlag, TransactionRecord};
    use crate::reports::DailySummary;
    use chrono::NaiveDate;

    fn summary() -> DailySummary {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let ledger: Ledger = vec![TransactionRecord::new(date, "Asha", "Weekly")
            .with_amounts(
                Money::from_units(150_000),
                Money::from_units(100),
                Money::from_units(7),
            )
            .with_flag(OverdueFlag::Overdue)]
        .into();
        DailySummary::generate(&ledger, date)
    }

    fn render(format: OutputFormat) -> String {
        let mut buf = Vec::new();
        write_report(&summary(), format, &Settings::default(), &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_table_uses_terminal_rendering() {
        let out = render(OutputFormat::Table);
        assert!(out.contains("₹150,000"));
        assert!(out.contains("January 01, 2024"));
    }

    #[test]
    fn test_csv_format() {
        assert!(render(OutputFormat::Csv).starts_with("Date,Total Debit"));
    }

    #[test]
    fn test_json_and_yaml_share_shape() {
        let json: serde_json::Value = serde_json::from_str(&render(OutputFormat::Json)).unwrap();
        let yaml: serde_json::Value = serde_yaml::from_str(&render(OutputFormat::Yaml)).unwrap();

        assert_eq!(json, yaml);
        assert_eq!(json["total_debit"], 150_000.0);
        assert_eq!(json["transaction_count"], 1);
    }
}
