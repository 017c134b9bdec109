#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `JsonFileKeyValueStore`.

use std::fs;
use std::sync::Arc;

use keyswitch_app::adapters::JsonFileKeyValueStore;
use keyswitch_app::AppStateBuilder;
use keyswitch_core::error::CoreError;
use keyswitch_core::traits::KeyValueStore;
use keyswitch_core::CredentialEntry;

#[test]
fn missing_file_reads_as_empty() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let store = JsonFileKeyValueStore::new(tmp.path().join("store.json"));
    assert_eq!(store.get("anything").unwrap(), None);
}

#[test]
fn set_creates_parent_dirs_and_persists() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let path = tmp.path().join("nested").join("dir").join("store.json");

    let store = JsonFileKeyValueStore::new(&path);
    store.set("a", "1").unwrap();
    store.set("b", "2").unwrap();
    store.set("a", "3").unwrap();

    let reopened = JsonFileKeyValueStore::new(&path);
    assert_eq!(reopened.get("a").unwrap().as_deref(), Some("3"));
    assert_eq!(reopened.get("b").unwrap().as_deref(), Some("2"));
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn corrupt_file_is_an_error() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let path = tmp.path().join("store.json");
    fs::write(&path, "[1, 2").unwrap();

    let store = JsonFileKeyValueStore::new(&path);
    assert!(matches!(
        store.get("a"),
        Err(CoreError::SerializationError(_))
    ));
}

#[test]
fn credential_store_survives_reopen() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let path = tmp.path().join("store.json");

    let state = AppStateBuilder::new()
        .key_value_store(Arc::new(JsonFileKeyValueStore::new(&path)))
        .build()
        .expect("state should build");
    state.store.add(CredentialEntry::new("1", "sk-a", "Work"));
    state.store.add(CredentialEntry::new("2", "sk-b", "Home"));
    state.store.set_active_index(1);

    let reopened = AppStateBuilder::new()
        .key_value_store(Arc::new(JsonFileKeyValueStore::new(&path)))
        .build()
        .expect("state should build");
    let entries = reopened.store.get_all();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].display_name, "Home");
    assert_eq!(reopened.store.active_secret().as_deref(), Some("sk-b"));

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["gemini-active-api-key-index"], "1");
    assert!(raw["gemini-api-keys"].as_str().unwrap().contains("\"displayName\":\"Work\""));
}

#[test]
fn corrupt_file_degrades_to_empty_collection() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let path = tmp.path().join("store.json");
    fs::write(&path, "not json at all").unwrap();

    let state = AppStateBuilder::new()
        .key_value_store(Arc::new(JsonFileKeyValueStore::new(&path)))
        .build()
        .expect("state should build");
    assert!(state.store.get_all().is_empty());
    assert_eq!(state.store.active_index(), 0);
    assert_eq!(state.store.next_valid(), None);
}

#[test]
fn set_replaces_corrupt_file() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let path = tmp.path().join("store.json");
    fs::write(&path, "not json at all").unwrap();

    let store = JsonFileKeyValueStore::new(&path);
    store.set("a", "1").unwrap();
    assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
}

#[test]
fn credential_store_recovers_from_corrupt_file() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let path = tmp.path().join("store.json");
    fs::write(&path, "not json at all").unwrap();

    let state = AppStateBuilder::new()
        .key_value_store(Arc::new(JsonFileKeyValueStore::new(&path)))
        .build()
        .expect("state should build");
    state.store.save_all(&[CredentialEntry::new("1", "sk-a", "A")]);
    state.store.add(CredentialEntry::new("2", "sk-b", "B"));
    state.store.set_active_index(1);

    let names: Vec<String> = state
        .store
        .get_all()
        .into_iter()
        .map(|e| e.display_name)
        .collect();
    assert_eq!(names, vec!["A", "B"]);
    assert_eq!(state.store.active_secret().as_deref(), Some("sk-b"));
}
