//! JSON export

use std::io::Write;

use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};

/// Write `value` as pretty-printed JSON followed by a newline
pub fn export_json<T, W>(value: &T, writer: &mut W) -> LedgerResult<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    serde_json::to_writer_pretty(&mut *writer, value)
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| LedgerError::Export(e.to_string()))?;
    writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ledger;

    #[test]
    fn test_empty_ledger_is_empty_array() {
        let mut buf = Vec::new();
        export_json(&Ledger::default(), &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "[]\n");
    }
}
