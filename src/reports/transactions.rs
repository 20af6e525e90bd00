//! Full Transaction Table
//!
//! The raw ledger rows, optionally narrowed by a filter, with column totals.

use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;
use tabled::Tabled;

use super::{export_err, Report};
use crate::config::Settings;
use crate::display::{render_table, truncate};
use crate::error::LedgerResult;
use crate::models::{Ledger, Money, TransactionRecord};

/// Filter options for the transaction table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransactionFilter {
    /// Inclusive lower bound
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound
    pub end_date: Option<NaiveDate>,
    /// Case-insensitive substring of the customer name
    pub customer_contains: Option<String>,
    /// Exact frequency label, compared case-insensitively
    pub frequency: Option<String>,
    pub overdue_only: bool,
}

impl TransactionFilter {
    /// Check if a record matches this filter
    pub fn matches(&self, record: &TransactionRecord) -> bool {
        if let Some(start) = self.start_date {
            if record.date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if record.date > end {
                return false;
            }
        }

        if let Some(ref needle) = self.customer_contains {
            if !record
                .customer_name
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }

        if let Some(ref frequency) = self.frequency {
            if !record.frequency.eq_ignore_ascii_case(frequency) {
                return false;
            }
        }

        !(self.overdue_only && !record.is_overdue())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Ledger rows matching a filter, in ledger order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionTable {
    pub filter: TransactionFilter,
    pub records: Vec<TransactionRecord>,
    pub total_debit: Money,
    pub total_collection: Money,
    pub total_interest_paid: Money,
}

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Name of Customer")]
    customer: String,
    #[tabled(rename = "Frequency")]
    frequency: String,
    #[tabled(rename = "Debit")]
    debit: String,
    #[tabled(rename = "Collection")]
    collection: String,
    #[tabled(rename = "Interest Paid")]
    interest: String,
    #[tabled(rename = "Overdue Flag")]
    flag: String,
}

impl TransactionTable {
    pub fn generate(ledger: &Ledger, filter: TransactionFilter) -> Self {
        let records: Vec<TransactionRecord> = ledger
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();

        Self {
            total_debit: records.iter().map(|r| r.debit).sum(),
            total_collection: records.iter().map(|r| r.collection).sum(),
            total_interest_paid: records.iter().map(|r| r.interest_paid).sum(),
            filter,
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Report for TransactionTable {
    fn format_terminal(&self, settings: &Settings) -> String {
        let symbol = &settings.currency_symbol;
        let mut output = String::from("Full Transaction Table\n");

        if self.records.is_empty() {
            output.push_str("No transactions found.\n");
            return output;
        }

        let mut rows: Vec<TransactionRow> = self
            .records
            .iter()
            .map(|r| TransactionRow {
                date: r.date.to_string(),
                customer: truncate(&r.customer_name, 28),
                frequency: r.frequency.clone(),
                debit: r.debit.format_grouped(symbol),
                collection: r.collection.format_grouped(symbol),
                interest: r.interest_paid.format_grouped(symbol),
                flag: r.overdue_flag.to_string(),
            })
            .collect();
        rows.push(TransactionRow {
            date: "Total".into(),
            customer: format!("{} rows", self.records.len()),
            frequency: String::new(),
            debit: self.total_debit.format_grouped(symbol),
            collection: self.total_collection.format_grouped(symbol),
            interest: self.total_interest_paid.format_grouped(symbol),
            flag: String::new(),
        });

        output.push_str(&render_table(rows, &[3, 4, 5]));
        output.push('\n');
        output
    }

    fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record([
            "Date",
            "Name of Customer",
            "Frequency",
            "Debit",
            "Collection",
            "Interest Paid",
            "Overdue Flag",
        ])
        .map_err(export_err)?;
        for r in &self.records {
            wtr.write_record([
                r.date.to_string(),
                r.customer_name.clone(),
                r.frequency.clone(),
                r.debit.to_string(),
                r.collection.to_string(),
                r.interest_paid.to_string(),
                r.overdue_flag.to_string(),
            ])
            .map_err(export_err)?;
        }
        wtr.flush().map_err(export_err)?;
        Ok(())
    }
}
