//! Ledger is a terminal app for keeping track of your personal income and
//! expenses.
//!
//! This library provides the transaction model, a JSON file backed
//! transaction store, and the interactive menu that drives them.

#![warn(missing_docs)]

pub mod config;
pub mod format;
pub mod logging;
pub mod menu;
pub mod stores;
pub mod summary;
pub mod timezone;
pub mod transaction;

pub use config::Config;
pub use menu::Menu;
pub use stores::{JsonFileStore, TransactionStore};
pub use transaction::{Transaction, TransactionId, TransactionKind, TransactionOverrides};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The backing file could not be opened, read or written.
    ///
    /// The string should describe the path and the underlying I/O error.
    #[error("the transaction file is unavailable: {0}")]
    StorageUnavailable(String),

    /// A stored entry could not be parsed into a transaction.
    ///
    /// A single bad entry invalidates the whole load.
    #[error("malformed transaction record: {0}")]
    MalformedRecord(String),

    /// No transaction with the given ID exists in the store.
    #[error("transaction {0} could not be found")]
    NotFound(TransactionId),

    /// More than one transaction shares the given ID.
    ///
    /// This only happens when the backing file was edited by something other
    /// than the store, since [TransactionStore::add] rejects duplicate IDs.
    #[error("multiple transactions with the ID {0} were found")]
    Ambiguous(TransactionId),

    /// A transaction with the given ID is already in the store.
    #[error("a transaction with the ID {0} already exists")]
    DuplicateId(TransactionId),

    /// The caller provided a value that cannot be used to build a transaction,
    /// e.g. a negative amount.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The configured timezone is not a canonical timezone name.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// Reading from or writing to the terminal failed.
    #[error("terminal I/O failed: {0}")]
    Io(String),
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Io(value.to_string())
    }
}
