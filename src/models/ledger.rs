//! The ledger: an ordered, immutable sequence of transaction records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::money::Money;
use super::transaction::TransactionRecord;

/// Full set of loan transaction records, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    records: Vec<TransactionRecord>,
}

impl Ledger {
    pub fn new(records: Vec<TransactionRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TransactionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records dated exactly `date`, in ledger order
    pub fn on_date(&self, date: NaiveDate) -> impl Iterator<Item = &TransactionRecord> {
        self.records.iter().filter(move |r| r.date == date)
    }

    pub fn earliest_date(&self) -> Option<NaiveDate> {
        self.records.iter().map(|r| r.date).min()
    }

    /// Distinct dates present in the ledger, ascending
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.records
            .iter()
            .map(|r| r.date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Sum of `collection` over the whole ledger
    pub fn total_collection(&self) -> Money {
        self.records.iter().map(|r| r.collection).sum()
    }
}

impl From<Vec<TransactionRecord>> for Ledger {
    fn from(records: Vec<TransactionRecord>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<TransactionRecord> for Ledger {
    fn from_iter<I: IntoIterator<Item = TransactionRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a TransactionRecord;
    type IntoIter = std::slice::Iter<'a, TransactionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_empty_ledger() {
        let ledger = Ledger::default();
        assert!(ledger.is_empty());
        assert_eq!(ledger.earliest_date(), None);
        assert!(ledger.dates().is_empty());
        assert!(ledger.total_collection().is_zero());
    }

    #[test]
    fn test_dates_are_distinct_and_sorted() {
        let ledger: Ledger = vec![
            TransactionRecord::new(date(5), "A", "Daily"),
            TransactionRecord::new(date(2), "B", "Daily"),
            TransactionRecord::new(date(5), "C", "Weekly"),
        ]
        .into();

        assert_eq!(ledger.dates(), vec![date(2), date(5)]);
        assert_eq!(ledger.earliest_date(), Some(date(2)));
        assert_eq!(ledger.on_date(date(5)).count(), 2);
    }
}
