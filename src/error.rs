//! Custom error types for loan-ledger
//!
//! The reporting functions themselves never fail; everything around them
//! (loading, configuration, export) reports through [`LedgerError`].

use thiserror::Error;

/// The main error type for loan-ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Generic import failure (unreadable CSV, bad JSON ledger, ...)
    #[error("Import error: {0}")]
    Import(String),

    /// A row in the source could not be parsed
    #[error("Import error at row {row}: {message}")]
    InvalidRow { row: usize, message: String },

    /// A required column is absent from the source header
    #[error("Missing required column: {column}")]
    MissingColumn { column: &'static str },

    /// The source format cannot be read
    #[error("Unsupported ledger source: {0}")]
    UnsupportedSource(String),

    /// No ledger source was given on the command line or in settings
    #[error("No ledger source given; pass --file <PATH> or set default_source in config.json")]
    NoSource,

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl LedgerError {
    /// Create an error for an unparseable row
    pub fn invalid_row(row: usize, message: impl Into<String>) -> Self {
        Self::InvalidRow {
            row,
            message: message.into(),
        }
    }

    /// Check if this error means the source was rejected while loading
    pub fn is_import(&self) -> bool {
        matches!(
            self,
            Self::Import(_)
                | Self::InvalidRow { .. }
                | Self::MissingColumn { .. }
                | Self::UnsupportedSource(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for LedgerError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Import(err.to_string())
    }
}

/// Result type alias for loan-ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LedgerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_invalid_row_error() {
        let err = LedgerError::invalid_row(3, "Could not parse date: 'soon'");
        assert_eq!(
            err.to_string(),
            "Import error at row 3: Could not parse date: 'soon'"
        );
        assert!(err.is_import());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_missing_column_error() {
        let err = LedgerError::MissingColumn {
            column: "Interest Paid",
        };
        assert_eq!(err.to_string(), "Missing required column: Interest Paid");
        assert!(err.is_import());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: LedgerError = io_err.into();
        assert!(matches!(err, LedgerError::Io(_)));
    }
}
