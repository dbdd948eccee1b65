//! Transaction management for the ledger.
//!
//! This module contains everything related to a single transaction:
//! - The `Transaction` model and `TransactionOverrides` for editing transactions
//! - The `TransactionRecord` used to read and write transactions from the
//!   transaction file

mod core;
mod record;

pub use core::{Transaction, TransactionId, TransactionKind, TransactionOverrides};
pub(crate) use core::normalise_date;
pub use record::TransactionRecord;
