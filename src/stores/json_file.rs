//! Implements a transaction store backed by a single JSON file.

use std::{
    collections::HashSet,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::{
    Error,
    stores::TransactionStore,
    transaction::{Transaction, TransactionId, TransactionRecord},
};

/// Stores transactions in memory and mirrors them to a JSON file.
///
/// The whole file is read when the store is opened and the whole file is
/// rewritten on [save](TransactionStore::save). Nothing is written in between,
/// so the in-memory list is the source of truth until then.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    transactions: Vec<Transaction>,
}

impl JsonFileStore {
    /// Open the transaction file at `path` and load every transaction in it.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::StorageUnavailable] if the file cannot be read,
    /// - or [Error::MalformedRecord] if the file is not a JSON list of valid
    ///   transaction records.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        let transactions = read_transactions(&path)?;

        Ok(Self { path, transactions })
    }

    /// Open the transaction file at `path`, creating an empty one first if no
    /// file exists there.
    ///
    /// # Errors
    /// Fails the same way as [JsonFileStore::open], and with
    /// [Error::StorageUnavailable] if the empty file cannot be created.
    pub fn open_or_create(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();

        if !path.exists() {
            tracing::info!("Creating empty transaction file at {}", path.display());
            write_transactions(&path, &[])?;
        }

        Self::open(path)
    }

    /// The path of the backing JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every transaction from the backing file.
    ///
    /// This does not change the transactions held in memory.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::StorageUnavailable] if the file cannot be read,
    /// - or [Error::MalformedRecord] if any entry in the file is invalid.
    pub fn load(&self) -> Result<Vec<Transaction>, Error> {
        read_transactions(&self.path)
    }

    /// Overwrite the backing file with exactly `transactions`.
    ///
    /// The file is replaced atomically, so a failed write leaves the previous
    /// contents in place. If `refresh` is true, the file is read back and
    /// replaces the transactions held in memory.
    ///
    /// # Errors
    /// This function will return a [Error::StorageUnavailable] if the file
    /// cannot be written, or any error from [JsonFileStore::load] when
    /// refreshing.
    pub fn persist(&mut self, transactions: &[Transaction], refresh: bool) -> Result<(), Error> {
        write_transactions(&self.path, transactions)?;

        if refresh {
            self.refresh()?;
        }

        Ok(())
    }

    fn refresh(&mut self) -> Result<(), Error> {
        self.transactions = self.load()?;
        Ok(())
    }

    fn contains(&self, id: TransactionId) -> bool {
        self.transactions
            .iter()
            .any(|transaction| transaction.id() == id)
    }
}

impl TransactionStore for JsonFileStore {
    fn list(&self) -> &[Transaction] {
        &self.transactions
    }

    fn get(&self, id: TransactionId) -> Result<&Transaction, Error> {
        let mut matches = self
            .transactions
            .iter()
            .filter(|transaction| transaction.id() == id);

        match (matches.next(), matches.next()) {
            (Some(transaction), None) => Ok(transaction),
            (Some(_), Some(_)) => Err(Error::Ambiguous(id)),
            (None, _) => Err(Error::NotFound(id)),
        }
    }

    fn add(&mut self, transaction: Transaction) -> Result<(), Error> {
        if self.contains(transaction.id()) {
            return Err(Error::DuplicateId(transaction.id()));
        }

        self.transactions.push(transaction);
        Ok(())
    }

    fn remove(&mut self, id: TransactionId) -> Result<Transaction, Error> {
        self.get(id)?;

        let position = self
            .transactions
            .iter()
            .position(|transaction| transaction.id() == id)
            .ok_or(Error::NotFound(id))?;

        Ok(self.transactions.remove(position))
    }

    fn replace(&mut self, id: TransactionId, transaction: Transaction) -> Result<(), Error> {
        self.get(id)?;

        if transaction.id() != id && self.contains(transaction.id()) {
            return Err(Error::DuplicateId(transaction.id()));
        }

        self.remove(id)?;
        self.add(transaction)
    }

    fn save(&mut self) -> Result<(), Error> {
        write_transactions(&self.path, &self.transactions)?;
        self.refresh()
    }

    fn clear(&mut self) -> Result<(), Error> {
        self.transactions.clear();
        self.save()
    }
}

fn read_transactions(path: &Path) -> Result<Vec<Transaction>, Error> {
    let bytes = fs::read(path).map_err(|error| storage_error(path, error))?;

    let records: Vec<TransactionRecord> = serde_json::from_slice(&bytes).map_err(|error| {
        Error::MalformedRecord(format!("could not parse {}: {error}", path.display()))
    })?;

    let transactions = records
        .into_iter()
        .map(Transaction::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen = HashSet::with_capacity(transactions.len());
    for transaction in &transactions {
        if !seen.insert(transaction.id()) {
            tracing::warn!(
                "Transaction file {} contains the ID {} more than once",
                path.display(),
                transaction.id()
            );
        }
    }

    tracing::debug!(
        "Loaded {} transactions from {}",
        transactions.len(),
        path.display()
    );

    Ok(transactions)
}

fn write_transactions(path: &Path, transactions: &[Transaction]) -> Result<(), Error> {
    let records = transactions
        .iter()
        .map(TransactionRecord::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let json = serde_json::to_string_pretty(&records).map_err(|error| {
        Error::MalformedRecord(format!("could not serialize transactions: {error}"))
    })?;

    // Symlinks are kept and the file they point to is replaced.
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let directory = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(directory).map_err(|error| storage_error(path, error))?;

    // The temporary file is created private to the owner.
    if let Ok(metadata) = fs::metadata(&target) {
        file.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|error| storage_error(path, error))?;
    }

    file.write_all(json.as_bytes())
        .and_then(|_| file.as_file().sync_all())
        .map_err(|error| storage_error(path, error))?;
    file.persist(&target)
        .map_err(|error| storage_error(path, error.error))?;

    tracing::debug!(
        "Wrote {} transactions to {}",
        transactions.len(),
        path.display()
    );

    Ok(())
}

fn storage_error(path: &Path, error: std::io::Error) -> Error {
    tracing::error!("Could not access {}: {error}", path.display());
    Error::StorageUnavailable(format!("{}: {error}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;
    use time::macros::datetime;

    use crate::{
        Error,
        stores::{JsonFileStore, TransactionStore},
        transaction::{Transaction, TransactionKind, TransactionOverrides},
    };

    fn get_test_store() -> (TempDir, JsonFileStore) {
        let dir = tempfile::tempdir().expect("Could not create temporary directory");
        let path = dir.path().join("db.json");
        fs::write(&path, "[]").expect("Could not write test file");
        let store = JsonFileStore::open(&path).expect("Could not open store");

        (dir, store)
    }

    fn expense(amount: f64) -> Transaction {
        Transaction::create(TransactionKind::Expense, amount, None, None).unwrap()
    }

    fn income(amount: f64) -> Transaction {
        Transaction::create(TransactionKind::Income, amount, None, None).unwrap()
    }

    #[test]
    fn open_fails_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        let result = JsonFileStore::open(dir.path().join("missing.json"));

        assert!(matches!(result, Err(Error::StorageUnavailable(_))));
    }

    #[test]
    fn open_or_create_creates_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.json");

        let store = JsonFileStore::open_or_create(&path).unwrap();

        assert!(store.list().is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn open_or_create_keeps_existing_file() {
        let (dir, mut store) = get_test_store();
        store.add(income(10.0)).unwrap();
        store.save().unwrap();

        let reopened = JsonFileStore::open_or_create(dir.path().join("db.json")).unwrap();

        assert_eq!(reopened.list().len(), 1);
    }

    #[test]
    fn load_fails_on_empty_file() {
        let (_dir, store) = get_test_store();
        fs::write(store.path(), "").unwrap();

        assert!(matches!(store.load(), Err(Error::MalformedRecord(_))));
    }

    #[test]
    fn load_fails_on_invalid_utf8() {
        let (_dir, store) = get_test_store();
        fs::write(store.path(), [b'[', 0xff, 0xfe, b']']).unwrap();

        assert!(matches!(store.load(), Err(Error::MalformedRecord(_))));
    }

    #[test]
    fn load_empty_list() {
        let (_dir, store) = get_test_store();

        assert_eq!(store.load(), Ok(Vec::new()));
    }

    #[test]
    fn load_fails_when_any_record_is_invalid() {
        let (_dir, store) = get_test_store();
        fs::write(
            store.path(),
            r#"[
                {"id": "67e55044-10b1-426f-9247-bb680e5fe0c8", "date": "2025-01-01T00:00:00Z",
                 "kind": "INCOME", "amount": 5.0, "description": null},
                {"id": "67e55044-10b1-426f-9247-bb680e5fe0c9", "date": "2025-01-01T00:00:00Z",
                 "kind": "GIFT", "amount": 5.0, "description": null}
            ]"#,
        )
        .unwrap();

        assert!(matches!(store.load(), Err(Error::MalformedRecord(_))));
    }

    #[test]
    fn load_reads_files_with_legacy_field_names() {
        let (_dir, store) = get_test_store();
        fs::write(
            store.path(),
            r#"[
              {
                "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
                "date": "2024-05-01T12:00:00.123456+00:00",
                "type": "EXPENSE",
                "amount": 1500,
                "description": "Кофе"
              }
            ]"#,
        )
        .unwrap();

        let transactions = store.load().unwrap();

        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].kind(), TransactionKind::Expense);
        assert_eq!(transactions[0].amount(), 1500.0);
        assert_eq!(transactions[0].description(), Some("Кофе"));
    }

    #[test]
    fn persist_with_refresh_round_trips() {
        let (_dir, mut store) = get_test_store();
        let want = vec![
            Transaction::create(
                TransactionKind::Income,
                1234.56,
                Some("Salary".to_owned()),
                Some(datetime!(2025-04-01 09:30:15.000123 UTC)),
            )
            .unwrap(),
            Transaction::create(
                TransactionKind::Expense,
                0.1,
                None,
                Some(datetime!(2025-04-02 22:00 +05:30)),
            )
            .unwrap(),
            Transaction::create(TransactionKind::Undefined, 0.0, Some(String::new()), None)
                .unwrap(),
        ];

        store.persist(&want, true).unwrap();

        assert_eq!(store.list(), want.as_slice());
        assert_eq!(store.load().unwrap(), want);
    }

    #[test]
    fn persist_without_refresh_keeps_memory() {
        let (_dir, mut store) = get_test_store();
        store.persist(&[income(100.0), expense(1500.0)], true).unwrap();
        assert_eq!(store.list().len(), 2);

        store.persist(&[], false).unwrap();
        assert_eq!(store.list().len(), 2);
        assert!(store.load().unwrap().is_empty());

        store.persist(&[], true).unwrap();
        assert!(store.list().is_empty());
    }

    #[test]
    fn persist_fails_when_directory_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        fs::write(&path, "[]").unwrap();
        let mut store = JsonFileStore::open(&path).unwrap();
        store.path = dir.path().join("missing").join("db.json");

        let result = store.persist(&[income(1.0)], true);

        assert!(matches!(result, Err(Error::StorageUnavailable(_))));
    }

    #[test]
    fn save_leaves_no_temporary_files() {
        let (dir, mut store) = get_test_store();
        store.add(income(1.0)).unwrap();

        store.save().unwrap();

        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1, "want only the transaction file, got {entries} entries");
    }

    #[test]
    fn save_keeps_non_ascii_text() {
        let (_dir, mut store) = get_test_store();
        let transaction =
            Transaction::create(TransactionKind::Expense, 3.0, Some("Кофе".to_owned()), None)
                .unwrap();
        store.add(transaction).unwrap();

        store.save().unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("Кофе"), "want raw UTF-8 description in {text}");
    }

    #[test]
    fn add_does_not_persist() {
        let (_dir, mut store) = get_test_store();

        store.add(income(10.0)).unwrap();

        assert_eq!(store.list().len(), 1);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn add_then_save_is_visible_to_new_store() {
        let (_dir, mut store) = get_test_store();
        let transaction = expense(777.0);

        store.add(transaction.clone()).unwrap();
        store.save().unwrap();

        let reopened = JsonFileStore::open(store.path()).unwrap();
        assert!(reopened.list().contains(&transaction));
    }

    #[test]
    fn add_fails_on_duplicate_id() {
        let (_dir, mut store) = get_test_store();
        let transaction = income(10.0);
        store.add(transaction.clone()).unwrap();

        let result = store.add(transaction.clone());

        assert_eq!(result, Err(Error::DuplicateId(transaction.id())));
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn get_returns_added_transaction() {
        let (_dir, mut store) = get_test_store();
        let transaction = income(100.0);
        store.add(expense(1.0)).unwrap();
        store.add(transaction.clone()).unwrap();

        assert_eq!(store.get(transaction.id()), Ok(&transaction));
    }

    #[test]
    fn get_fails_on_missing_id() {
        let (_dir, mut store) = get_test_store();
        store.add(income(100.0)).unwrap();
        let missing = income(1.0);

        assert_eq!(store.get(missing.id()), Err(Error::NotFound(missing.id())));
    }

    #[test]
    fn get_fails_on_duplicate_id_in_file() {
        let (_dir, mut store) = get_test_store();
        let transaction = income(100.0);
        store
            .persist(&[transaction.clone(), transaction.clone()], true)
            .unwrap();

        assert_eq!(
            store.get(transaction.id()),
            Err(Error::Ambiguous(transaction.id()))
        );
    }

    #[test]
    fn remove_fails_on_duplicate_id_and_keeps_both() {
        let (_dir, mut store) = get_test_store();
        let transaction = income(100.0);
        store
            .persist(&[transaction.clone(), transaction.clone()], true)
            .unwrap();

        let result = store.remove(transaction.id());

        assert_eq!(result, Err(Error::Ambiguous(transaction.id())));
        assert_eq!(store.list().len(), 2);
    }

    #[test]
    fn replace_fails_on_duplicate_id_and_keeps_both() {
        let (_dir, mut store) = get_test_store();
        let transaction = income(100.0);
        store
            .persist(&[transaction.clone(), transaction.clone()], true)
            .unwrap();

        let result = store.replace(transaction.id(), expense(5.0));

        assert_eq!(result, Err(Error::Ambiguous(transaction.id())));
        assert_eq!(store.list(), &[transaction.clone(), transaction]);
    }

    #[test]
    fn remove_then_get_fails() {
        let (_dir, mut store) = get_test_store();
        let transaction = expense(20.0);
        store.add(transaction.clone()).unwrap();
        store.add(income(5.0)).unwrap();

        let removed = store.remove(transaction.id());

        assert_eq!(removed, Ok(transaction.clone()));
        assert_eq!(store.get(transaction.id()), Err(Error::NotFound(transaction.id())));
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn remove_missing_id_leaves_store_unchanged() {
        let (_dir, mut store) = get_test_store();
        store.add(income(5.0)).unwrap();
        store.add(expense(6.0)).unwrap();
        let want = store.list().to_vec();
        let missing = income(1.0);

        let result = store.remove(missing.id());

        assert_eq!(result, Err(Error::NotFound(missing.id())));
        assert_eq!(store.list(), want.as_slice());
    }

    #[test]
    fn replace_with_same_id_returns_new_transaction() {
        let (_dir, mut store) = get_test_store();
        let original = expense(20.0);
        store.add(original.clone()).unwrap();
        let edited = original
            .with_overrides(
                TransactionOverrides::default()
                    .amount(12345678.0)
                    .description(Some("New description".to_owned())),
            )
            .unwrap();

        store.replace(original.id(), edited.clone()).unwrap();

        assert_eq!(store.get(original.id()), Ok(&edited));
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn replace_with_new_id_removes_old_id() {
        let (_dir, mut store) = get_test_store();
        let original = expense(20.0);
        let replacement = income(30.0);
        store.add(original.clone()).unwrap();

        store.replace(original.id(), replacement.clone()).unwrap();

        assert_eq!(store.get(original.id()), Err(Error::NotFound(original.id())));
        assert_eq!(store.get(replacement.id()), Ok(&replacement));
    }

    #[test]
    fn replace_fails_on_missing_id() {
        let (_dir, mut store) = get_test_store();
        let missing = expense(20.0);

        let result = store.replace(missing.id(), income(1.0));

        assert_eq!(result, Err(Error::NotFound(missing.id())));
        assert!(store.list().is_empty());
    }

    #[test]
    fn replace_fails_when_new_id_collides_with_other_transaction() {
        let (_dir, mut store) = get_test_store();
        let first = expense(20.0);
        let second = income(30.0);
        store.add(first.clone()).unwrap();
        store.add(second.clone()).unwrap();

        let result = store.replace(first.id(), second.clone());

        assert_eq!(result, Err(Error::DuplicateId(second.id())));
        assert_eq!(store.list(), [first, second].as_slice());
    }

    #[test]
    fn clear_empties_memory_and_file() {
        let (_dir, mut store) = get_test_store();
        store.add(income(100.0)).unwrap();
        store.add(expense(1500.0)).unwrap();
        store.save().unwrap();

        store.clear().unwrap();

        assert!(store.list().is_empty());
        assert!(store.load().unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn save_keeps_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, mut store) = get_test_store();
        fs::set_permissions(store.path(), fs::Permissions::from_mode(0o644)).unwrap();

        store.add(income(10.0)).unwrap();
        store.save().unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn save_writes_through_symlink() {
        let (dir, _store) = get_test_store();
        let target = dir.path().join("db.json");
        let link = dir.path().join("link.json");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let mut store = JsonFileStore::open(&link).unwrap();
        store.add(income(10.0)).unwrap();
        store.save().unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(JsonFileStore::open(&target).unwrap().list().len(), 1);
    }
}
