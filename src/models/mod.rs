//! Core data models for loan-ledger
//!
//! The ledger, its transaction records, and the money type they carry.

pub mod ledger;
pub mod money;
pub mod transaction;

pub use ledger::Ledger;
pub use money::{Money, MoneyParseError};
pub use transaction::{OverdueFlag, TransactionRecord};
