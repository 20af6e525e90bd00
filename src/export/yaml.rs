//! YAML export
//!
//! Same document shape as the JSON export, for readers who prefer YAML.

use std::io::Write;

use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};

/// Write `value` as a YAML document
pub fn export_yaml<T, W>(value: &T, writer: &mut W) -> LedgerResult<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    serde_yaml::to_writer(&mut *writer, value).map_err(|e| LedgerError::Export(e.to_string()))?;
    writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ledger, TransactionRecord};
    use chrono::NaiveDate;

    #[test]
    fn test_record_fields() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let ledger: Ledger = vec![TransactionRecord::new(date, "Ravi", "Daily")].into();

        let mut buf = Vec::new();
        export_yaml(&ledger, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("customer_name: Ravi"));
        assert!(text.contains("2024-01-02"));
        assert!(text.contains("overdue_flag: NotOverdue"));
    }
}
