//! Service layer
//!
//! Loading ledgers from disk and caching the parsed result. The reports
//! themselves are pure and live in [`crate::reports`].

pub mod cache;
pub mod import;

pub use cache::LedgerCache;
pub use import::{parse_date, ColumnMapping, ImportOptions, ImportService};
