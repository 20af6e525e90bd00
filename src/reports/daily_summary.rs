//! Daily Summary
//!
//! Debit, collection and interest totals for a single day.

use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::{export_err, Report};
use crate::config::Settings;
use crate::error::LedgerResult;
use crate::models::{Ledger, Money};

/// Totals over the records dated exactly `date`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub total_debit: Money,
    pub total_collection: Money,
    pub total_interest_paid: Money,
    /// Number of records that matched the date
    pub transaction_count: usize,
}

impl DailySummary {
    pub fn generate(ledger: &Ledger, date: NaiveDate) -> Self {
        let mut summary = Self {
            date,
            total_debit: Money::zero(),
            total_collection: Money::zero(),
            total_interest_paid: Money::zero(),
            transaction_count: 0,
        };

        for record in ledger.on_date(date) {
            summary.total_debit += record.debit;
            summary.total_collection += record.collection;
            summary.total_interest_paid += record.interest_paid;
            summary.transaction_count += 1;
        }

        debug!(%date, matched = summary.transaction_count, "Daily summary generated");
        summary
    }
}

/// Sum debit, collection and interest over the records on `date`
pub fn daily_summary(ledger: &Ledger, date: NaiveDate) -> DailySummary {
    DailySummary::generate(ledger, date)
}

impl Report for DailySummary {
    fn format_terminal(&self, settings: &Settings) -> String {
        let symbol = &settings.currency_symbol;
        let mut output = String::new();

        output.push_str(&format!(
            "Summary for {}\n",
            self.date.format(&settings.display_date_format)
        ));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<20}{:<20}{:<20}\n",
            "Total Debit", "Total Collection", "Interest Paid"
        ));
        output.push_str(&format!(
            "{:<20}{:<20}{:<20}\n",
            self.total_debit.format_whole(symbol),
            self.total_collection.format_whole(symbol),
            self.total_interest_paid.format_whole(symbol)
        ));
        output.push_str(&format!("\nTransactions: {}\n", self.transaction_count));

        output
    }

    fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record([
            "Date",
            "Total Debit",
            "Total Collection",
            "Interest Paid",
            "Transactions",
        ])
        .map_err(export_err)?;
        wtr.write_record([
            self.date.to_string(),
            self.total_debit.to_string(),
            self.total_collection.to_string(),
            self.total_interest_paid.to_string(),
            self.transaction_count.to_string(),
        ])
        .map_err(export_err)?;
        wtr.flush().map_err(export_err)?;
        Ok(())
    }
}
