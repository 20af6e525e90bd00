//! Overdue Customers
//!
//! Records flagged overdue on a given day, projected to the columns a
//! collector needs.

use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;
use tabled::Tabled;

use super::{export_err, Report};
use crate::config::Settings;
use crate::display::render_table;
use crate::error::LedgerResult;
use crate::models::{Ledger, Money, OverdueFlag, TransactionRecord};

/// Projection of an overdue record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverdueEntry {
    pub customer_name: String,
    pub frequency: String,
    pub debit: Money,
    pub collection: Money,
    pub overdue_flag: OverdueFlag,
}

impl From<&TransactionRecord> for OverdueEntry {
    fn from(record: &TransactionRecord) -> Self {
        Self {
            customer_name: record.customer_name.clone(),
            frequency: record.frequency.clone(),
            debit: record.debit,
            collection: record.collection,
            overdue_flag: record.overdue_flag,
        }
    }
}

/// Overdue entries on `date`, in ledger order
pub fn overdue_for_date(ledger: &Ledger, date: NaiveDate) -> Vec<OverdueEntry> {
    ledger
        .on_date(date)
        .filter(|r| r.is_overdue())
        .map(OverdueEntry::from)
        .collect()
}

/// Overdue customers for one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverdueReport {
    pub date: NaiveDate,
    pub entries: Vec<OverdueEntry>,
}

#[derive(Tabled)]
struct OverdueRow {
    #[tabled(rename = "Name of Customer")]
    customer: String,
    #[tabled(rename = "Frequency")]
    frequency: String,
    #[tabled(rename = "Debit")]
    debit: String,
    #[tabled(rename = "Collection")]
    collection: String,
    #[tabled(rename = "Overdue Flag")]
    flag: String,
}

impl OverdueReport {
    pub fn generate(ledger: &Ledger, date: NaiveDate) -> Self {
        Self {
            date,
            entries: overdue_for_date(ledger, date),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Report for OverdueReport {
    fn format_terminal(&self, settings: &Settings) -> String {
        let symbol = &settings.currency_symbol;
        let mut output = format!(
            "Overdue Customers: {}\n",
            self.date.format(&settings.display_date_format)
        );

        if self.entries.is_empty() {
            output.push_str("No overdue customers today!\n");
            return output;
        }

        let rows = self.entries.iter().map(|e| OverdueRow {
            customer: e.customer_name.clone(),
            frequency: e.frequency.clone(),
            debit: e.debit.format_grouped(symbol),
            collection: e.collection.format_grouped(symbol),
            flag: e.overdue_flag.to_string(),
        });
        output.push_str(&render_table(rows, &[2, 3]));
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
            "Overdue Flag",
        ])
        .map_err(export_err)?;
        for entry in &self.entries {
            wtr.write_record([
                self.date.to_string(),
                entry.customer_name.clone(),
                entry.frequency.clone(),
                entry.debit.to_string(),
                entry.collection.to_string(),
                entry.overdue_flag.to_string(),
            ])
            .map_err(export_err)?;
        }
        wtr.flush().map_err(export_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::fixtures::{record, sample_ledger, ymd};

    #[test]
    fn test_only_overdue_on_date() {
        let entries = overdue_for_date(&sample_ledger(), ymd(2024, 1, 1));

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].customer_name, "Asha");
        assert_eq!(entries[0].frequency, "Weekly");
        assert_eq!(entries[0].debit, Money::from_units(100));
        assert_eq!(entries[0].collection, Money::from_units(80));
        assert_eq!(entries[0].overdue_flag, OverdueFlag::Overdue);
    }

    #[test]
    fn test_absent_date_is_empty() {
        assert!(overdue_for_date(&sample_ledger(), ymd(2030, 1, 1)).is_empty());
        assert!(overdue_for_date(&Ledger::default(), ymd(2024, 1, 1)).is_empty());
    }

    #[test]
    fn test_keeps_ledger_order() {
        let day = ymd(2024, 5, 1);
        let ledger: Ledger = vec![
            record(day, "Zara", "Daily", 1, 0, 0, OverdueFlag::Overdue),
            record(day, "Mohan", "Daily", 1, 1, 0, OverdueFlag::NotOverdue),
            record(day, "Anil", "Weekly", 2, 0, 0, OverdueFlag::Overdue),
        ]
        .into();

        let names: Vec<_> = overdue_for_date(&ledger, day)
            .into_iter()
            .map(|e| e.customer_name)
            .collect();
        assert_eq!(names, vec!["Zara", "Anil"]);
    }

    #[test]
    fn test_format_terminal_empty() {
        let report = OverdueReport::generate(&sample_ledger(), ymd(2024, 1, 2));
        assert!(report.is_empty());
        let out = report.format_terminal(&Settings::default());
        assert!(out.contains("No overdue customers today!"));
    }

    #[test]
    fn test_format_terminal_table() {
        let report = OverdueReport::generate(&sample_ledger(), ymd(2024, 1, 1));
        let out = report.format_terminal(&Settings::default());
        assert!(out.contains("Name of Customer"));
        assert!(out.contains("Asha"));
        assert!(out.contains("₹100.00"));
        assert!(!out.contains("Ravi"));
    }

    #[test]
    fn test_export_csv() {
        let mut buf = Vec::new();
        OverdueReport::generate(&sample_ledger(), ymd(2024, 1, 1))
            .export_csv(&mut buf)
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "2024-01-01,Asha,Weekly,100.00,80.00,Overdue");
    }
}
