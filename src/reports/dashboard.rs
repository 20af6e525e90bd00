//! Dashboard
//!
//! Every section of the loan dashboard for one selected date, produced by a
//! single call. A front end invokes [`Dashboard::generate`] when the user
//! picks a date and renders whatever comes back.

use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;

use super::{
    export_err, CollectionTrendReport, DailySummary, FrequencyReport, OverdueReport, Report,
    TransactionFilter, TransactionTable,
};
use crate::config::Settings;
use crate::display::{double_separator, section_header};
use crate::error::LedgerResult;
use crate::models::Ledger;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub date: NaiveDate,
    pub summary: DailySummary,
    pub overdue: OverdueReport,
    pub frequency: FrequencyReport,
    pub trend: CollectionTrendReport,
    pub transactions: TransactionTable,
}

impl Dashboard {
    pub fn generate(ledger: &Ledger, date: NaiveDate) -> Self {
        Self {
            date,
            summary: DailySummary::generate(ledger, date),
            overdue: OverdueReport::generate(ledger, date),
            frequency: FrequencyReport::generate(ledger),
            trend: CollectionTrendReport::generate(ledger),
            transactions: TransactionTable::generate(ledger, TransactionFilter::default()),
        }
    }

    /// The date a date picker should start on: the earliest ledger date, or
    /// `today` for an empty ledger
    pub fn default_date(ledger: &Ledger, today: NaiveDate) -> NaiveDate {
        ledger.earliest_date().unwrap_or(today)
    }
}

impl Report for Dashboard {
    fn format_terminal(&self, settings: &Settings) -> String {
        let rule = double_separator(72);
        let mut output = String::new();

        output.push_str(&section_header("Loan & Interest Dashboard"));
        output.push('\n');

        let sections = [
            self.summary.format_terminal(settings),
            self.overdue.format_terminal(settings),
            self.frequency.format_terminal(settings),
            self.trend.format_terminal(settings),
            self.transactions.format_terminal(settings),
        ];
        for (i, section) in sections.iter().enumerate() {
            if i > 0 {
                output.push('\n');
                output.push_str(&rule);
                output.push_str("\n\n");
            }
            output.push_str(section);
        }

        output
    }

    /// Sections are written one after another, each introduced by a
    /// `# <name>` row, so the file opens as a single sheet.
    fn export_csv<W: Write>(&self, mut writer: W) -> LedgerResult<()> {
        let sections = [
            csv_section("summary", &self.summary)?,
            csv_section("overdue", &self.overdue)?,
            csv_section("frequency", &self.frequency)?,
            csv_section("trend", &self.trend)?,
            csv_section("transactions", &self.transactions)?,
        ];

        for (i, section) in sections.iter().enumerate() {
            if i > 0 {
                writeln!(writer).map_err(export_err)?;
            }
            writer.write_all(section).map_err(export_err)?;
        }
        writer.flush().map_err(export_err)?;
        Ok(())
    }
}

fn csv_section<R: Report>(name: &str, report: &R) -> LedgerResult<Vec<u8>> {
    let mut buf = format!("# {}\n", name).into_bytes();
    report.export_csv(&mut buf)?;
    Ok(buf)
}
