//! Shared helpers for driving the menu in tests.

use std::{fs, path::PathBuf};

use tempfile::TempDir;

use crate::{Config, menu::Menu, stores::JsonFileStore};

/// An empty store backed by a file in a fresh temporary directory.
///
/// The directory is deleted when the returned [TempDir] is dropped.
pub(super) fn get_test_store() -> (TempDir, JsonFileStore) {
    let dir = tempfile::tempdir().expect("Could not create temporary directory");
    let path = dir.path().join("db.json");
    fs::write(&path, "[]").expect("Could not write test file");
    let store = JsonFileStore::open(&path).expect("Could not open store");

    (dir, store)
}

/// Run the menu in UTC on `input` and return everything it wrote.
pub(super) fn run_menu(store: &mut JsonFileStore, input: &str) -> String {
    run_menu_in_timezone(store, input, "Etc/UTC")
}

pub(super) fn run_menu_in_timezone(
    store: &mut JsonFileStore,
    input: &str,
    timezone: &str,
) -> String {
    let config = Config::new(
        PathBuf::from("unused.json"),
        PathBuf::from("unused.log"),
        timezone,
        "$",
    )
    .unwrap();
    let mut output = Vec::new();

    Menu::new(store, input.as_bytes(), &mut output, &config)
        .unwrap()
        .run()
        .expect("Menu should exit cleanly");

    String::from_utf8(output).unwrap()
}
