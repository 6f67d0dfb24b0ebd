//! Tests for RecordStore
//!
//! These tests verify:
//! - Creating files with and without initial data
//! - Reading whole collections and single records
//! - Add / update / delete as full read-modify-write
//! - File lifecycle (exists / delete)
//! - Atomic and in-place write modes

use std::fs;
use std::path::{Path, PathBuf};

use jsonbase::storage::RecordStore;
use jsonbase::{to_record, JsonBaseError, Record, WriteMode};
use serde_json::{json, Value};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn mock_records() -> Vec<Record> {
    let contents = fs::read_to_string(fixture_path("user-mock.json")).unwrap();
    serde_json::from_str(&contents).unwrap()
}

fn record(value: Value) -> Record {
    to_record(value).unwrap()
}

/// Copy of the user mock file in a temp dir
fn setup_mock_store(write_mode: WriteMode) -> (TempDir, RecordStore) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("user-mock.json");
    fs::copy(fixture_path("user-mock.json"), &path).unwrap();
    (temp_dir, RecordStore::new(path, write_mode))
}

// =============================================================================
// Create Tests
// =============================================================================

#[test]
fn test_create_file_without_data() {
    let temp_dir = TempDir::new().unwrap();
    let store = RecordStore::new(temp_dir.path().join("create-without-data.json"), WriteMode::Atomic);

    store.create(&[]).unwrap();

    assert!(store.file_exists());
    assert_eq!(store.read(None).unwrap(), Vec::<Record>::new());
    assert_eq!(fs::read_to_string(store.path()).unwrap(), "[]");
}

#[test]
fn test_create_file_with_data() {
    let temp_dir = TempDir::new().unwrap();
    let store = RecordStore::new(temp_dir.path().join("create-with-data.json"), WriteMode::Atomic);
    let records = mock_records();

    store.create(&records).unwrap();

    let read = store.read(None).unwrap();
    assert_eq!(read.len(), 3);
    assert_eq!(read, records);
}

#[test]
fn test_create_existing_file_fails() {
    let (_temp, store) = setup_mock_store(WriteMode::Atomic);

    let result = store.create(&[]);

    assert!(matches!(result, Err(JsonBaseError::FileAlreadyExists(_))));
    // Existing content untouched
    assert_eq!(store.read(None).unwrap().len(), 3);
}

#[test]
fn test_create_writes_pretty_printed_array() {
    let temp_dir = TempDir::new().unwrap();
    let store = RecordStore::new(temp_dir.path().join("pretty.json"), WriteMode::Atomic);

    store.create(&[record(json!({"id": "1", "name": "Lena"}))]).unwrap();

    let contents = fs::read_to_string(store.path()).unwrap();
    assert!(contents.starts_with("[\n"));
    assert!(contents.contains("\n    \"name\": \"Lena\""));
}

// =============================================================================
// Read Tests
// =============================================================================

#[test]
fn test_read_all_items() {
    let (_temp, store) = setup_mock_store(WriteMode::Atomic);

    assert_eq!(store.read(None).unwrap(), mock_records());
}

#[test]
fn test_read_one_item() {
    let (_temp, store) = setup_mock_store(WriteMode::Atomic);

    let records = store.read(Some("1")).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0], mock_records()[0]);
}

#[test]
fn test_read_unknown_id_is_empty() {
    let (_temp, store) = setup_mock_store(WriteMode::Atomic);

    assert!(store.read(Some("404")).unwrap().is_empty());
}

#[test]
fn test_read_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let store = RecordStore::new(temp_dir.path().join("missing.json"), WriteMode::Atomic);

    assert!(matches!(store.read(None), Err(JsonBaseError::FileNotFound(_))));
}

#[test]
fn test_read_corrupt_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("corrupt.json");
    fs::write(&path, "[{\"id\": \"1\"").unwrap();
    let store = RecordStore::new(path, WriteMode::Atomic);

    assert!(matches!(store.read(None), Err(JsonBaseError::Serialization(_))));
}

// =============================================================================
// Mutation Tests
// =============================================================================

#[test]
fn test_add_one_item() {
    let (_temp, store) = setup_mock_store(WriteMode::Atomic);
    let new_record = record(json!({"id": "4", "name": "Alex", "age": 3}));

    store.add(new_record.clone()).unwrap();

    assert_eq!(store.read(None).unwrap().len(), 4);
    assert_eq!(store.read(Some("4")).unwrap()[0], new_record);
    // Appended at the end
    assert_eq!(store.read(None).unwrap()[3], new_record);
}

#[test]
fn test_update_one_item() {
    let (_temp, store) = setup_mock_store(WriteMode::Atomic);
    let new_record = record(json!({"id": "1", "name": "alma", "age": 4.5}));

    let replaced = store.update("1", new_record.clone()).unwrap();

    assert!(replaced);
    let records = store.read(None).unwrap();
    assert_eq!(records.len(), 3);
    // Replaced in place, order kept
    assert_eq!(records[0], new_record);
}

#[test]
fn test_update_unknown_id_is_noop() {
    let (_temp, store) = setup_mock_store(WriteMode::Atomic);

    let replaced = store
        .update("404", record(json!({"id": "404", "name": "ghost"})))
        .unwrap();

    assert!(!replaced);
    assert_eq!(store.read(None).unwrap(), mock_records());
}

#[test]
fn test_delete_one_item() {
    let (_temp, store) = setup_mock_store(WriteMode::Atomic);
    let records = mock_records();

    let removed = store.delete("1").unwrap();

    assert!(removed);
    assert_eq!(store.read(None).unwrap(), vec![records[1].clone(), records[2].clone()]);
}

#[test]
fn test_delete_unknown_id_is_noop() {
    let (_temp, store) = setup_mock_store(WriteMode::Atomic);

    assert!(!store.delete("404").unwrap());
    assert_eq!(store.read(None).unwrap().len(), 3);
}

#[test]
fn test_mutation_on_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let store = RecordStore::new(temp_dir.path().join("missing.json"), WriteMode::Atomic);

    assert!(matches!(
        store.add(record(json!({"id": "1"}))),
        Err(JsonBaseError::FileNotFound(_))
    ));
    assert!(!store.file_exists());
}

#[test]
fn test_round_trip_preserves_order_and_fields() {
    let temp_dir = TempDir::new().unwrap();
    let store = RecordStore::new(temp_dir.path().join("round-trip.json"), WriteMode::Atomic);
    store.create(&[]).unwrap();

    let written: Vec<Record> = (0..25)
        .map(|i| {
            record(json!({
                "id": format!("id-{}", i),
                "index": i,
                "nested": {"even": i % 2 == 0, "list": [i, i + 1]},
                "label": null
            }))
        })
        .collect();
    for r in &written {
        store.add(r.clone()).unwrap();
    }

    let read = store.read(None).unwrap();
    assert_eq!(read, written);
    for (a, b) in read.iter().zip(&written) {
        assert_eq!(a.keys().collect::<Vec<_>>(), b.keys().collect::<Vec<_>>());
    }
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

#[test]
fn test_delete_file() {
    let (_temp, store) = setup_mock_store(WriteMode::Atomic);
    assert!(store.file_exists());

    store.delete_file().unwrap();

    assert!(!store.file_exists());
}

#[test]
fn test_delete_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let store = RecordStore::new(temp_dir.path().join("missing.json"), WriteMode::Atomic);

    assert!(matches!(store.delete_file(), Err(JsonBaseError::FileNotFound(_))));
}

#[test]
fn test_bind_switches_target_file() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = RecordStore::new(temp_dir.path().join("first.json"), WriteMode::Atomic);
    store.create(&[record(json!({"id": "a"}))]).unwrap();

    store.bind(temp_dir.path().join("second.json"));
    store.create(&[]).unwrap();

    assert!(store.read(None).unwrap().is_empty());
    assert!(temp_dir.path().join("first.json").is_file());
    assert_eq!(store.path(), temp_dir.path().join("second.json"));
}

// =============================================================================
// Write Mode Tests
// =============================================================================

#[test]
fn test_write_modes_produce_identical_files() {
    let (_atomic_temp, atomic) = setup_mock_store(WriteMode::Atomic);
    let (_in_place_temp, in_place) = setup_mock_store(WriteMode::InPlace);

    for store in [&atomic, &in_place] {
        store.add(record(json!({"id": "4", "name": "Alex"}))).unwrap();
        store.update("2", record(json!({"id": "2", "name": "Yaron Miro"}))).unwrap();
        store.delete("3").unwrap();
    }

    assert_eq!(
        fs::read_to_string(atomic.path()).unwrap(),
        fs::read_to_string(in_place.path()).unwrap()
    );
}

#[cfg(unix)]
#[test]
fn test_write_modes_preserve_file_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let mode_of = |path: &Path| fs::metadata(path).unwrap().permissions().mode() & 0o777;

    for write_mode in [WriteMode::Atomic, WriteMode::InPlace] {
        let (_temp, store) = setup_mock_store(write_mode);
        fs::set_permissions(store.path(), fs::Permissions::from_mode(0o644)).unwrap();

        store.add(record(json!({"id": "4"}))).unwrap();
        store.update("1", record(json!({"id": "1", "name": "Yaron"}))).unwrap();
        store.delete("4").unwrap();

        assert_eq!(mode_of(store.path()), 0o644, "{:?} changed the file mode", write_mode);
    }
}

#[test]
fn test_atomic_write_leaves_no_temp_files() {
    let (temp, store) = setup_mock_store(WriteMode::Atomic);

    store.add(record(json!({"id": "4"}))).unwrap();
    store.delete("4").unwrap();

    let entries: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_in_place_write_shrinks_file() {
    let (_temp, store) = setup_mock_store(WriteMode::InPlace);

    store.delete("1").unwrap();
    store.delete("2").unwrap();
    store.delete("3").unwrap();

    assert_eq!(fs::read_to_string(store.path()).unwrap(), "[]");
}
