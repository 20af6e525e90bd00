//! User settings for loan-ledger
//!
//! Display preferences, the loader's primary date format and an optional
//! default ledger source, persisted as `config.json`.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::paths::LedgerPaths;
use crate::error::LedgerError;

/// User settings for loan-ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Symbol printed in front of amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format tried first when reading the ledger (strftime format)
    #[serde(default = "default_input_date_format")]
    pub input_date_format: String,

    /// Date format for report headers
    #[serde(default = "default_display_date_format")]
    pub display_date_format: String,

    /// Field delimiter for CSV ledgers
    #[serde(default = "default_csv_delimiter")]
    pub csv_delimiter: char,

    /// Ledger used when `--file` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_source: Option<PathBuf>,

    /// Tracing filter used when `LOAN_LEDGER_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Width of the collection trend bar, in characters
    #[serde(default = "default_chart_width")]
    pub chart_width: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_input_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_display_date_format() -> String {
    "%B %d, %Y".to_string()
}

fn default_csv_delimiter() -> char {
    ','
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_chart_width() -> usize {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            input_date_format: default_input_date_format(),
            display_date_format: default_display_date_format(),
            csv_delimiter: default_csv_delimiter(),
            default_source: None,
            log_level: default_log_level(),
            chart_width: default_chart_width(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                LedgerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - `config init` decides when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject values the loader or renderer cannot work with
    pub fn validate(&self) -> Result<(), LedgerError> {
        if !self.csv_delimiter.is_ascii() {
            return Err(LedgerError::Config(format!(
                "csv_delimiter must be a single ASCII character, got '{}'",
                self.csv_delimiter
            )));
        }
        for format in [&self.input_date_format, &self.display_date_format] {
            if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
                return Err(LedgerError::Config(format!(
                    "Invalid date format string: '{}'",
                    format
                )));
            }
        }
        if self.chart_width == 0 {
            return Err(LedgerError::Config("chart_width must be at least 1".into()));
        }
        Ok(())
    }
}
