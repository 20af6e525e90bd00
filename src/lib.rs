//! loan-ledger - daily loan and interest reporting
//!
//! This library turns a loan ledger (one row per transaction: date,
//! customer, payment frequency, debit, collection, interest paid and an
//! overdue flag) into the reports a lender reviews each day.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: The ledger, its records and the money type
//! - `services`: Ledger loading and caching
//! - `reports`: The daily summary, overdue list, frequency summary,
//!   collection trend, transaction table and the dashboard bundling them
//! - `display` / `export`: Terminal tables and CSV/JSON/YAML output
//! - `cli`: Command handlers for the `loanledger` binary
//! - `logging`: Tracing setup
//!
//! # Example
//!
//! ```rust,ignore
//! use loan_ledger::reports::Dashboard;
//! use loan_ledger::services::ImportService;
//!
//! let ledger = ImportService::default().load_path("ledger.csv".as_ref())?;
//! let date = Dashboard::default_date(&ledger, chrono::Local::now().date_naive());
//! let dashboard = Dashboard::generate(&ledger, date);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;

pub use error::{LedgerError, LedgerResult};
