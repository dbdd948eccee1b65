//! Contains the trait and implementation for objects that store
//! [transactions](crate::transaction).

mod json_file;
mod transaction;

pub use json_file::JsonFileStore;
pub use transaction::TransactionStore;
