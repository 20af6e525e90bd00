//! Daily Collection Trend
//!
//! Total collection per calendar day across the whole ledger, oldest first.

use std::collections::BTreeMap;
use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;

use super::{export_err, Report};
use crate::config::Settings;
use crate::display::format_bar;
use crate::error::LedgerResult;
use crate::models::{Ledger, Money};

/// One point of the series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub total_collection: Money,
}

/// Sum `collection` per date; output dates are strictly increasing
pub fn daily_collection_trend(ledger: &Ledger) -> Vec<TrendPoint> {
    let mut by_date: BTreeMap<NaiveDate, Money> = BTreeMap::new();
    for record in ledger {
        *by_date.entry(record.date).or_default() += record.collection;
    }

    by_date
        .into_iter()
        .map(|(date, total_collection)| TrendPoint {
            date,
            total_collection,
        })
        .collect()
}

/// The collection series for charting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionTrendReport {
    pub points: Vec<TrendPoint>,
}

impl CollectionTrendReport {
    pub fn generate(ledger: &Ledger) -> Self {
        Self {
            points: daily_collection_trend(ledger),
        }
    }

    pub fn total_collection(&self) -> Money {
        self.points.iter().map(|p| p.total_collection).sum()
    }

    /// The day with the largest collection (earliest on ties)
    pub fn peak(&self) -> Option<&TrendPoint> {
        self.points
            .iter()
            .rev()
            .max_by_key(|p| p.total_collection)
    }
}

impl Report for CollectionTrendReport {
    fn format_terminal(&self, settings: &Settings) -> String {
        let symbol = &settings.currency_symbol;
        let mut output = String::from("Daily Collection Trend\n");

        if self.points.is_empty() {
            output.push_str("No collections recorded.\n");
            return output;
        }

        let max = self
            .peak()
            .map(|p| p.total_collection.as_f64())
            .unwrap_or(0.0);
        let amounts: Vec<String> = self
            .points
            .iter()
            .map(|p| p.total_collection.format_grouped(symbol))
            .collect();
        let amount_width = amounts.iter().map(|a| a.chars().count()).max().unwrap_or(0);

        for (point, amount) in self.points.iter().zip(&amounts) {
            output.push_str(&format!(
                "{}  {:>width$}  {}\n",
                point.date,
                amount,
                format_bar(point.total_collection.as_f64(), max, settings.chart_width),
                width = amount_width
            ));
        }

        output.push_str(&format!(
            "\nTotal Collection: {}\n",
            self.total_collection().format_grouped(symbol)
        ));
        output
    }

    fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["Date", "Collection"]).map_err(export_err)?;
        for point in &self.points {
            wtr.write_record([point.date.to_string(), point.total_collection.to_string()])
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
    fn test_example_trend() {
        let trend = daily_collection_trend(&sample_ledger());
        assert_eq!(
            trend,
            vec![
                TrendPoint {
                    date: ymd(2024, 1, 1),
                    total_collection: Money::from_units(100),
                },
                TrendPoint {
                    date: ymd(2024, 1, 2),
                    total_collection: Money::from_units(10),
                },
            ]
        );
    }

    #[test]
    fn test_sorted_and_sum_preserved() {
        let ledger: Ledger = vec![
            record(ymd(2024, 3, 9), "A", "Daily", 0, 7, 0, OverdueFlag::NotOverdue),
            record(ymd(2024, 1, 4), "B", "Daily", 0, 3, 0, OverdueFlag::NotOverdue),
            record(ymd(2024, 3, 9), "C", "Weekly", 0, 5, 0, OverdueFlag::Overdue),
            record(ymd(2024, 2, 1), "A", "Daily", 0, 0, 0, OverdueFlag::NotOverdue),
        ]
        .into();

        let trend = daily_collection_trend(&ledger);
        assert!(trend.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(trend.len(), 3);

        let sum: Money = trend.iter().map(|p| p.total_collection).sum();
        assert_eq!(sum, ledger.total_collection());
        assert_eq!(trend[2].total_collection, Money::from_units(12));
    }

    #[test]
    fn test_empty_ledger() {
        assert!(daily_collection_trend(&Ledger::default()).is_empty());
        let report = CollectionTrendReport::generate(&Ledger::default());
        assert!(report.peak().is_none());
        assert!(report
            .format_terminal(&Settings::default())
            .contains("No collections recorded."));
    }

    #[test]
    fn test_peak_prefers_earliest() {
        let ledger: Ledger = vec![
            record(ymd(2024, 1, 1), "A", "Daily", 0, 5, 0, OverdueFlag::NotOverdue),
            record(ymd(2024, 1, 2), "A", "Daily", 0, 5, 0, OverdueFlag::NotOverdue),
        ]
        .into();
        let report = CollectionTrendReport::generate(&ledger);
        assert_eq!(report.peak().map(|p| p.date), Some(ymd(2024, 1, 1)));
    }

    #[test]
    fn test_format_terminal_bars() {
        let settings = Settings {
            chart_width: 10,
            ..Settings::default()
        };
        let out = CollectionTrendReport::generate(&sample_ledger()).format_terminal(&settings);

        assert!(out.contains("2024-01-01  ₹100.00  ██████████"));
        assert!(out.contains("2024-01-02   ₹10.00  █░░░░░░░░░"));
        assert!(out.contains("Total Collection: ₹110.00"));
    }

    #[test]
    fn test_export_csv() {
        let mut buf = Vec::new();
        CollectionTrendReport::generate(&sample_ledger())
            .export_csv(&mut buf)
            .unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Date,Collection\n2024-01-01,100.00\n2024-01-02,10.00\n"
        );
    }
}
