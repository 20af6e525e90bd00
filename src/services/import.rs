//! Ledger import service
//!
//! Reads the "Transactions" sheet of a workbook, the same sheet exported as
//! CSV, or a JSON array of records into a [`Ledger`]. Header detection, date
//! normalization and amount parsing live here; any row that cannot be read
//! rejects the whole ledger so the reporting layer only ever sees well-formed
//! input.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::{Days, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Ledger, Money, OverdueFlag, TransactionRecord};

/// Worksheet holding the ledger in a workbook
pub const TRANSACTIONS_SHEET: &str = "Transactions";

/// Day zero of spreadsheet serial dates (1900 date system)
const SERIAL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Date formats tried after the configured primary format
const FALLBACK_DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%Y/%m/%d", "%d-%m-%Y", "%m/%d/%y",
];

/// Timestamp forms that are normalized to their calendar day
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

/// Options controlling how a source is read
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Date format tried first (e.g. "%Y-%m-%d", "%d/%m/%Y")
    pub date_format: String,
    /// Field delimiter
    pub delimiter: u8,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d".to_string(),
            delimiter: b',',
        }
    }
}

impl ImportOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            date_format: settings.input_date_format.clone(),
            // Settings::validate guarantees ASCII
            delimiter: settings.csv_delimiter as u8,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Column positions of the ledger fields in a CSV header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub date_column: usize,
    pub customer_column: usize,
    pub frequency_column: usize,
    pub debit_column: usize,
    pub collection_column: usize,
    pub interest_column: usize,
    pub overdue_column: usize,
}

impl ColumnMapping {
    /// Locate every required column in a header row
    ///
    /// Names are compared case-insensitively after trimming; the first
    /// header matching a field wins.
    pub fn detect(headers: &StringRecord) -> LedgerResult<Self> {
        let normalized: Vec<String> = headers
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_lowercase())
            .collect();

        let mapping = Self {
            date_column: find_column(&normalized, "Date", &["date"])?,
            customer_column: find_column(
                &normalized,
                "Name of Customer",
                &["name of customer", "customer name", "customer", "name"],
            )?,
            frequency_column: find_column(&normalized, "Frequency", &["frequency"])?,
            debit_column: find_column(&normalized, "Debit", &["debit"])?,
            collection_column: find_column(&normalized, "Collection", &["collection"])?,
            interest_column: find_column(
                &normalized,
                "Interest Paid",
                &["interest paid", "interest"],
            )?,
            overdue_column: find_column(
                &normalized,
                "Overdue Flag",
                &["overdue flag", "overdue", "status"],
            )?,
        };

        debug!(?mapping, "Detected ledger column mapping");
        Ok(mapping)
    }
}

fn find_column(
    headers: &[String],
    column: &'static str,
    aliases: &[&str],
) -> LedgerResult<usize> {
    headers
        .iter()
        .position(|h| aliases.contains(&h.as_str()))
        .ok_or(LedgerError::MissingColumn { column })
}

/// Service that turns a source file into a ledger
#[derive(Debug, Clone, Default)]
pub struct ImportService {
    options: ImportOptions,
}

impl ImportService {
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    /// Load a ledger from a path, picking the reader by file extension
    pub fn load_path(&self, path: &Path) -> LedgerResult<Ledger> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let ledger = match extension.as_str() {
            "csv" | "tsv" | "txt" => {
                let file = open(path)?;
                let options = if extension == "tsv" {
                    self.options.clone().with_delimiter(b'\t')
                } else {
                    self.options.clone()
                };
                Self::new(options).parse_csv(file)?
            }
            "json" => self.parse_json(open(path)?)?,
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => self.parse_workbook(path)?,
            other => {
                return Err(LedgerError::UnsupportedSource(format!(
                    "{}: unknown extension '{}' (expected .xlsx, .xls, .ods, .csv, .tsv or .json)",
                    path.display(),
                    other
                )))
            }
        };

        info!(
            path = %path.display(),
            records = ledger.len(),
            "Loaded ledger"
        );
        Ok(ledger)
    }

    /// Parse a CSV "Transactions" sheet with a header row
    pub fn parse_csv<R: Read>(&self, reader: R) -> LedgerResult<Ledger> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.options.delimiter)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let mapping = ColumnMapping::detect(&headers)?;

        let mut records = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            // Row numbers are 1-based and count the header line
            let row = idx + 2;
            let record = result.map_err(|e| LedgerError::invalid_row(row, e.to_string()))?;

            if record.iter().all(|field| field.is_empty()) {
                continue;
            }

            records.push(self.parse_record(&record, row, &mapping)?);
        }

        Ok(Ledger::new(records))
    }

    /// Read the "Transactions" sheet of a workbook
    ///
    /// Other sheets are ignored.
    pub fn parse_workbook(&self, path: &Path) -> LedgerResult<Ledger> {
        let mut workbook = open_workbook_auto(path).map_err(|e| {
            LedgerError::Import(format!("Failed to open workbook {}: {}", path.display(), e))
        })?;
        let range = workbook.worksheet_range(TRANSACTIONS_SHEET).map_err(|e| {
            LedgerError::Import(format!(
                "{}: cannot read sheet \"{}\": {}",
                path.display(),
                TRANSACTIONS_SHEET,
                e
            ))
        })?;

        self.parse_range(&range)
    }

    /// Parse worksheet cells whose first row is the header
    ///
    /// Serial numbers in the date column are spreadsheet day counts; every
    /// other cell goes through the same text parsing as CSV.
    pub fn parse_range(&self, range: &Range<Data>) -> LedgerResult<Ledger> {
        let mut rows = range.rows();
        let headers = match rows.next() {
            Some(header) => header.iter().map(cell_text).collect::<StringRecord>(),
            None => return Ok(Ledger::default()),
        };
        let mapping = ColumnMapping::detect(&headers)?;
        let first_row = range.start().map_or(0, |(row, _)| row as usize);

        let mut records = Vec::new();
        for (idx, cells) in rows.enumerate() {
            // Sheet row numbers are 1-based and count the header row
            let row = first_row + idx + 2;

            let fields: Vec<String> = cells
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    if col == mapping.date_column {
                        date_cell_text(cell)
                    } else {
                        cell_text(cell)
                    }
                })
                .collect();

            if fields.iter().all(|field| field.is_empty()) {
                continue;
            }

            records.push(self.parse_record(&StringRecord::from(fields), row, &mapping)?);
        }

        debug!(records = records.len(), "Parsed worksheet");
        Ok(Ledger::new(records))
    }

    /// Parse a JSON array of serialized records
    ///
    /// Amounts are decimal numbers in whole currency units (`150000.5`);
    /// amount text such as `"₹1,50,000"` is accepted as well.
    pub fn parse_json<R: Read>(&self, reader: R) -> LedgerResult<Ledger> {
        serde_json::from_reader(BufReader::new(reader))
            .map_err(|e| LedgerError::Import(format!("Invalid JSON ledger: {}", e)))
    }

    fn parse_record(
        &self,
        record: &StringRecord,
        row: usize,
        mapping: &ColumnMapping,
    ) -> LedgerResult<TransactionRecord> {
        let cell = |col: usize| record.get(col).unwrap_or("");

        let date = parse_date(cell(mapping.date_column), &self.options.date_format)
            .map_err(|e| LedgerError::invalid_row(row, e))?;

        let amount = |col: usize, name: &str| -> LedgerResult<Money> {
            let text = cell(col);
            if text.is_empty() {
                return Ok(Money::zero());
            }
            Money::parse(text)
                .map_err(|e| LedgerError::invalid_row(row, format!("{}: {}", name, e)))
        };

        Ok(TransactionRecord {
            date,
            customer_name: cell(mapping.customer_column).to_string(),
            frequency: cell(mapping.frequency_column).to_string(),
            debit: amount(mapping.debit_column, "Debit")?,
            collection: amount(mapping.collection_column, "Collection")?,
            interest_paid: amount(mapping.interest_column, "Interest Paid")?,
            overdue_flag: OverdueFlag::from_cell(cell(mapping.overdue_column)),
        })
    }
}

/// Text form of a worksheet cell, as a CSV export would write it
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| dt.as_f64().to_string()),
        other => other.to_string(),
    }
}

/// Date column cells: numbers and date-formatted cells are serial day counts
fn date_cell_text(cell: &Data) -> String {
    let serial = match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::DateTime(dt) => Some(dt.as_f64()),
        _ => None,
    };

    match serial.and_then(serial_date) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => cell_text(cell),
    }
}

/// Calendar day of a spreadsheet serial number; the fraction is time of day
pub fn serial_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 0.0 || serial >= u32::MAX as f64 {
        return None;
    }
    let (y, m, d) = SERIAL_EPOCH;
    NaiveDate::from_ymd_opt(y, m, d)?.checked_add_days(Days::new(serial.trunc() as u64))
}

fn open(path: &Path) -> LedgerResult<File> {
    File::open(path)
        .map_err(|e| LedgerError::Io(format!("Failed to open {}: {}", path.display(), e)))
}

/// Parse a date cell, dropping any time-of-day component
///
/// Tries `primary_format` first, then the common spreadsheet layouts.
pub fn parse_date(s: &str, primary_format: &str) -> Result<NaiveDate, String> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, primary_format) {
        return Ok(date);
    }

    for format in FALLBACK_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Ok(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt.date());
        }
    }

    Err(format!("Could not parse date: '{}'", s))
}
