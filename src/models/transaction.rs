//! Transaction record model
//!
//! One row of the loan ledger: who paid what on which day, under which
//! payment cadence, and whether the installment was overdue.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Whether a transaction was flagged as past due on its date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OverdueFlag {
    Overdue,
    #[default]
    NotOverdue,
}

impl OverdueFlag {
    /// Parse a flag cell. Only "Overdue" (any case) counts as overdue;
    /// every other value, including a blank cell, does not.
    pub fn from_cell(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("overdue") {
            Self::Overdue
        } else {
            Self::NotOverdue
        }
    }

    pub fn is_overdue(&self) -> bool {
        matches!(self, Self::Overdue)
    }
}

impl fmt::Display for OverdueFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overdue => write!(f, "Overdue"),
            Self::NotOverdue => write!(f, "Not Overdue"),
        }
    }
}

/// A single ledger row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction date (day granularity)
    pub date: NaiveDate,

    /// Customer name as written in the source
    pub customer_name: String,

    /// Payment cadence label (e.g. "Daily", "Weekly", "Monthly")
    pub frequency: String,

    /// Amount lent out
    #[serde(default)]
    pub debit: Money,

    /// Amount collected back
    #[serde(default)]
    pub collection: Money,

    /// Interest portion paid
    #[serde(default)]
    pub interest_paid: Money,

    #[serde(default)]
    pub overdue_flag: OverdueFlag,
}

impl TransactionRecord {
    /// Create a record with zero amounts, not overdue
    pub fn new(
        date: NaiveDate,
        customer_name: impl Into<String>,
        frequency: impl Into<String>,
    ) -> Self {
        Self {
            date,
            customer_name: customer_name.into(),
            frequency: frequency.into(),
            debit: Money::zero(),
            collection: Money::zero(),
            interest_paid: Money::zero(),
            overdue_flag: OverdueFlag::NotOverdue,
        }
    }

    /// Set debit, collection and interest in one go
    pub fn with_amounts(mut self, debit: Money, collection: Money, interest_paid: Money) -> Self {
        self.debit = debit;
        self.collection = collection;
        self.interest_paid = interest_paid;
        self
    }

    pub fn with_flag(mut self, flag: OverdueFlag) -> Self {
        self.overdue_flag = flag;
        self
    }

    pub fn is_overdue(&self) -> bool {
        self.overdue_flag.is_overdue()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_from_cell() {
        assert_eq!(OverdueFlag::from_cell("Overdue"), OverdueFlag::Overdue);
        assert_eq!(OverdueFlag::from_cell("  overdue "), OverdueFlag::Overdue);
        assert_eq!(OverdueFlag::from_cell("Not Overdue"), OverdueFlag::NotOverdue);
        assert_eq!(OverdueFlag::from_cell(""), OverdueFlag::NotOverdue);
        assert_eq!(OverdueFlag::from_cell("Paid"), OverdueFlag::NotOverdue);
    }

    #[test]
    fn test_builder() {
        let record = TransactionRecord::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            "Asha",
            "Weekly",
        )
        .with_amounts(
            Money::from_units(100),
            Money::from_units(80),
            Money::from_units(5),
        )
        .with_flag(OverdueFlag::Overdue);

        assert_eq!(record.debit.cents(), 10000);
        assert_eq!(record.collection.cents(), 8000);
        assert_eq!(record.interest_paid.cents(), 500);
        assert!(record.is_overdue());
    }

    #[test]
    fn test_serde_defaults() {
        let json = r#"{"date":"2024-01-02","customer_name":"Ravi","frequency":"Daily"}"#;
        let record: TransactionRecord = serde_json::from_str(json).unwrap();
        assert!(record.debit.is_zero());
        assert_eq!(record.overdue_flag, OverdueFlag::NotOverdue);
    }
}
