//! Interest Summary by Frequency
//!
//! Groups the whole ledger by payment cadence: how many distinct customers
//! pay on each cadence and how much interest each cadence has brought in.

use std::collections::{BTreeMap, HashSet};
use std::io::Write;

use serde::Serialize;
use tabled::Tabled;
use tracing::debug;

use super::{export_err, Report};
use crate::config::Settings;
use crate::display::render_table;
use crate::error::LedgerResult;
use crate::models::{Ledger, Money};

/// Aggregates for one frequency label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyStats {
    /// Distinct customer names in the group
    pub customer_count: usize,
    pub total_interest_paid: Money,
    /// Records in the group
    pub transaction_count: usize,
}

/// Group the entire ledger by frequency label
///
/// Keys come back sorted by label; callers should not rely on any
/// particular order beyond determinism. Records with a blank label belong
/// to no group, and blank customer names are not counted as customers.
pub fn frequency_summary(ledger: &Ledger) -> BTreeMap<String, FrequencyStats> {
    let mut names: BTreeMap<&str, HashSet<&str>> = BTreeMap::new();
    let mut totals: BTreeMap<&str, (Money, usize)> = BTreeMap::new();

    for record in ledger {
        if record.frequency.trim().is_empty() {
            continue;
        }
        let customers = names.entry(record.frequency.as_str()).or_default();
        if !record.customer_name.trim().is_empty() {
            customers.insert(record.customer_name.as_str());
        }
        let entry = totals
            .entry(record.frequency.as_str())
            .or_insert((Money::zero(), 0));
        entry.0 += record.interest_paid;
        entry.1 += 1;
    }

    let summary: BTreeMap<String, FrequencyStats> = totals
        .into_iter()
        .map(|(frequency, (interest, count))| {
            let customer_count = names.get(frequency).map_or(0, HashSet::len);
            (
                frequency.to_string(),
                FrequencyStats {
                    customer_count,
                    total_interest_paid: interest,
                    transaction_count: count,
                },
            )
        })
        .collect();

    debug!(groups = summary.len(), "Frequency summary generated");
    summary
}

/// Frequency summary over the whole ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyReport {
    pub groups: BTreeMap<String, FrequencyStats>,
}

#[derive(Tabled)]
struct FrequencyRow {
    #[tabled(rename = "Frequency")]
    frequency: String,
    #[tabled(rename = "Customers")]
    customers: usize,
    #[tabled(rename = "Total Interest Paid")]
    interest: String,
}

impl FrequencyReport {
    pub fn generate(ledger: &Ledger) -> Self {
        Self {
            groups: frequency_summary(ledger),
        }
    }

    pub fn total_interest_paid(&self) -> Money {
        self.groups.values().map(|s| s.total_interest_paid).sum()
    }
}

impl Report for FrequencyReport {
    fn format_terminal(&self, settings: &Settings) -> String {
        let mut output = String::from("Interest Summary by Frequency\n");

        if self.groups.is_empty() {
            output.push_str("No transactions in ledger.\n");
            return output;
        }

        let rows = self.groups.iter().map(|(frequency, stats)| FrequencyRow {
            frequency: frequency.clone(),
            customers: stats.customer_count,
            interest: stats
                .total_interest_paid
                .format_grouped(&settings.currency_symbol),
        });
        output.push_str(&render_table(rows, &[1, 2]));
        output.push('\n');
        output
    }

    fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["Frequency", "Customers", "Total_Interest_Paid", "Transactions"])
            .map_err(export_err)?;
        for (frequency, stats) in &self.groups {
            wtr.write_record([
                frequency.clone(),
                stats.customer_count.to_string(),
                stats.total_interest_paid.to_string(),
                stats.transaction_count.to_string(),
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
    use crate::models::OverdueFlag;
    use crate::reports::fixtures::{record, sample_ledger, ymd};

    #[test]
    fn test_groups_whole_ledger() {
        let summary = frequency_summary(&sample_ledger());

        assert_eq!(summary.len(), 2);

        let daily = &summary["Daily"];
        // Ravi appears twice but is one customer
        assert_eq!(daily.customer_count, 1);
        assert_eq!(daily.transaction_count, 2);
        assert_eq!(daily.total_interest_paid, Money::from_units(3));

        let weekly = &summary["Weekly"];
        assert_eq!(weekly.customer_count, 1);
        assert_eq!(weekly.total_interest_paid, Money::from_units(5));
    }

    #[test]
    fn test_customer_count_is_distinct_names() {
        let day = ymd(2024, 2, 1);
        let ledger: Ledger = vec![
            record(day, "A", "Monthly", 0, 0, 1, OverdueFlag::NotOverdue),
            record(day, "B", "Monthly", 0, 0, 1, OverdueFlag::NotOverdue),
            record(ymd(2024, 3, 1), "A", "Monthly", 0, 0, 1, OverdueFlag::Overdue),
            record(day, "A", "Daily", 0, 0, 1, OverdueFlag::NotOverdue),
        ]
        .into();

        let summary = frequency_summary(&ledger);
        for stats in summary.values() {
            assert!(stats.customer_count <= stats.transaction_count);
        }
        assert_eq!(summary["Monthly"].customer_count, 2);
        assert_eq!(summary["Monthly"].transaction_count, 3);
        assert_eq!(summary["Daily"].customer_count, 1);
    }

    #[test]
    fn test_blank_labels_and_names_skipped() {
        let day = ymd(2024, 2, 1);
        let ledger: Ledger = vec![
            record(day, "A", "", 0, 0, 9, OverdueFlag::NotOverdue),
            record(day, "B", "  ", 0, 0, 9, OverdueFlag::NotOverdue),
            record(day, "", "Weekly", 0, 0, 2, OverdueFlag::NotOverdue),
            record(day, "C", "Weekly", 0, 0, 3, OverdueFlag::NotOverdue),
        ]
        .into();

        let summary = frequency_summary(&ledger);
        assert_eq!(summary.len(), 1);

        let weekly = &summary["Weekly"];
        assert_eq!(weekly.customer_count, 1);
        assert_eq!(weekly.transaction_count, 2);
        assert_eq!(weekly.total_interest_paid, Money::from_units(5));
    }

    #[test]
    fn test_empty_ledger() {
        assert!(frequency_summary(&Ledger::default()).is_empty());
    }

    #[test]
    fn test_report_total() {
        let report = FrequencyReport::generate(&sample_ledger());
        assert_eq!(report.total_interest_paid(), Money::from_units(8));
    }

    #[test]
    fn test_format_terminal() {
        let out = FrequencyReport::generate(&sample_ledger()).format_terminal(&Settings::default());
        assert!(out.contains("Customers"));
        assert!(out.contains("Daily"));
        assert!(out.contains("₹3.00"));
    }

    #[test]
    fn test_export_csv() {
        let mut buf = Vec::new();
        FrequencyReport::generate(&sample_ledger())
            .export_csv(&mut buf)
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Frequency,Customers,Total_Interest_Paid,Transactions\n"));
        assert!(text.contains("Daily,1,3.00,2\n"));
        assert!(text.contains("Weekly,1,5.00,1\n"));
    }
}
