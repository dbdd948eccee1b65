//! Defines the transaction store trait.

use crate::{
    Error,
    transaction::{Transaction, TransactionId},
};

/// Handles the creation, retrieval and removal of transactions.
///
/// Changes made through [add](TransactionStore::add),
/// [remove](TransactionStore::remove) and [replace](TransactionStore::replace)
/// are held in memory until [save](TransactionStore::save) is called.
pub trait TransactionStore {
    /// All transactions in the store, in the order they were added.
    fn list(&self) -> &[Transaction];

    /// Retrieve the single transaction with `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if no transaction has `id`,
    /// - or [Error::Ambiguous] if more than one transaction has `id`.
    fn get(&self, id: TransactionId) -> Result<&Transaction, Error>;

    /// Append a transaction to the store.
    ///
    /// # Errors
    /// This function will return an [Error::DuplicateId] if a transaction with
    /// the same ID is already in the store.
    fn add(&mut self, transaction: Transaction) -> Result<(), Error>;

    /// Remove the transaction with `id` and return it.
    ///
    /// # Errors
    /// This function fails the same way as [get](TransactionStore::get), in
    /// which case the store is left unchanged.
    fn remove(&mut self, id: TransactionId) -> Result<Transaction, Error>;

    /// Remove the transaction with `id` and add `transaction` in its place.
    ///
    /// `transaction` does not need to have the same ID as the one it replaces.
    ///
    /// # Errors
    /// This function fails the same way as [remove](TransactionStore::remove),
    /// and with [Error::DuplicateId] if `transaction` would collide with
    /// another transaction in the store.
    fn replace(&mut self, id: TransactionId, transaction: Transaction) -> Result<(), Error>;

    /// Write every transaction to the backing storage.
    fn save(&mut self) -> Result<(), Error>;

    /// Remove every transaction and write the empty store to the backing
    /// storage.
    fn clear(&mut self) -> Result<(), Error>;
}
