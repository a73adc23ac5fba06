//! Phase 1 tests: Data structures + file format.

use nika_memory::config::{find_project_root, MemoryConfig};
use nika_memory::engine::MemoryEngine;
use nika_memory::format::{StoreReader, StoreWriter};
use nika_memory::index::TagIndex;
use nika_memory::store::Store;
use nika_memory::types::{entry_id, MemoryEntry, MemoryValue, ENTRY_ID_LEN, STORE_VERSION};

use serde_json::json;
use tempfile::{tempdir, NamedTempFile};

// ==================== Helper ====================

fn sample_entry(ns: &str, key: &str, value: MemoryValue) -> MemoryEntry {
    let mut entry = MemoryEntry::new(ns, key, value, 1_700_000_000.123_456);
    entry.tags = vec!["alpha".to_string(), "beta".to_string()];
    entry
}

// ==================== Identity Tests ====================

#[test]
fn test_entry_id_deterministic() {
    for (ns, key) in [("project", "name"), ("agent", "role"), ("", "")] {
        assert_eq!(entry_id(ns, key), entry_id(ns, key));
        assert_eq!(entry_id(ns, key).len(), ENTRY_ID_LEN);
    }
}

#[test]
fn test_entry_id_distinguishes_pairs() {
    assert_ne!(entry_id("project", "name"), entry_id("project", "names"));
    assert_ne!(entry_id("project", "name"), entry_id("context", "name"));
}

#[test]
fn test_new_entry_uses_derived_id() {
    let entry = MemoryEntry::new("project", "name", json!("nika"), 10.0);
    assert_eq!(entry.id, entry_id("project", "name"));
    assert_eq!(entry.created_at, 10.0);
    assert_eq!(entry.updated_at, 10.0);
    assert_eq!(entry.access_count, 0);
    assert_eq!(entry.expires_at, None);
    assert_eq!(entry.last_accessed, None);
}

// ==================== Serialization Tests ====================

#[test]
fn test_entry_json_shape() {
    let entry = MemoryEntry::new("project", "name", json!("nika"), 5.5);
    let value = serde_json::to_value(&entry).unwrap();

    assert_eq!(value["namespace"], "project");
    assert_eq!(value["value"], "nika");
    // Permanent entries carry an explicit null expiry.
    assert!(value["expires_at"].is_null());
    assert!(value.as_object().unwrap().contains_key("expires_at"));
    // last_accessed is absent until the first recall.
    assert!(!value.as_object().unwrap().contains_key("last_accessed"));
}

#[test]
fn test_reads_store_written_by_other_tools() {
    let text = r#"{
      "version": 1,
      "entries": {
        "abc": {
          "id": "abc",
          "namespace": "project",
          "key": "name",
          "value": {"nested": [1, 2.5, "x", null, true]},
          "tags": [],
          "created_at": 1700000000.5,
          "updated_at": 1700000001.25,
          "expires_at": null,
          "access_count": 3,
          "last_accessed": 1700000002.0
        }
      },
      "meta": {"last_write": 1700000001.25, "total_entries": 1}
    }"#;
    let store = StoreReader::parse_store(text);
    assert_eq!(store.version(), 1);
    assert_eq!(store.len(), 1);
    let entry = store.get("abc").unwrap();
    assert_eq!(entry.access_count, 3);
    assert_eq!(entry.value["nested"][1], 2.5);
    assert_eq!(store.meta().total_entries, Some(1));
    assert_eq!(store.meta().last_gc, None);
}

#[test]
fn test_store_roundtrip() {
    let mut store = Store::new();
    store.insert(sample_entry("project", "name", json!("nika")));
    store.insert(sample_entry(
        "agent",
        "config",
        json!({"z": 1, "a": [1.5, -2, 1e300], "m": {"inner": null}}),
    ));
    let mut expiring = sample_entry("context", "session", json!(u64::MAX));
    expiring.expires_at = Some(1_700_000_060.000_001);
    expiring.last_accessed = Some(0.1 + 0.2);
    expiring.access_count = 7;
    store.insert(expiring);
    store.record_write(1_700_000_000.987_654);
    store.record_gc(1_700_000_001.0);

    let file = NamedTempFile::new().unwrap();
    StoreWriter::write_store(&store, file.path()).unwrap();
    let loaded = StoreReader::read_store(file.path());

    assert_eq!(loaded, store);
}

#[test]
fn test_value_mapping_order_preserved() {
    let mut store = Store::new();
    store.insert(sample_entry("ns", "k", json!({"z": 1, "a": 2, "m": 3})));

    let file = NamedTempFile::new().unwrap();
    StoreWriter::write_store(&store, file.path()).unwrap();
    let loaded = StoreReader::read_store(file.path());

    let keys: Vec<&String> = loaded
        .get(&entry_id("ns", "k"))
        .unwrap()
        .value
        .as_object()
        .unwrap()
        .keys()
        .collect();
    assert_eq!(keys, ["z", "a", "m"]);
}

#[test]
fn test_big_integers_survive_unrelated_write() {
    let dir = tempdir().unwrap();
    let config = MemoryConfig {
        root: Some(dir.path().to_path_buf()),
        ..MemoryConfig::default()
    };
    let engine = MemoryEngine::new(config.resolve(dir.path()));
    let store_file = engine.paths().store_file().to_path_buf();
    std::fs::create_dir_all(store_file.parent().unwrap()).unwrap();
    std::fs::write(
        &store_file,
        r#"{
          "version": 1,
          "entries": {
            "abc": {
              "id": "abc",
              "namespace": "project",
              "key": "big",
              "value": {"n": 123456789012345678901234567890, "f": 0.1},
              "tags": [],
              "created_at": 1700000000.0,
              "updated_at": 1700000000.0,
              "expires_at": null,
              "access_count": 0
            }
          },
          "meta": {}
        }"#,
    )
    .unwrap();

    engine
        .remember("other", "x", json!(1), &[] as &[&str], None)
        .unwrap();

    let text = std::fs::read_to_string(&store_file).unwrap();
    assert!(text.contains("123456789012345678901234567890"));
    assert!(!text.contains("e+29"));

    let store = StoreReader::read_store(&store_file);
    assert_eq!(store.len(), 2);
    assert_eq!(store.get("abc").unwrap().value["f"], 0.1);
}

#[test]
fn test_index_roundtrip() {
    let mut index = TagIndex::new();
    index.add("id1", &["a", "b"]);
    index.add("id2", &["b"]);

    let file = NamedTempFile::new().unwrap();
    StoreWriter::write_index(&index, file.path()).unwrap();
    let loaded = StoreReader::read_index(file.path());

    assert_eq!(loaded, index);
    assert_eq!(loaded.get("b"), &["id1".to_string(), "id2".to_string()]);
}

#[test]
fn test_index_file_shape() {
    let mut index = TagIndex::new();
    index.add("id1", &["a"]);

    let file = NamedTempFile::new().unwrap();
    StoreWriter::write_index(&index, file.path()).unwrap();
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(file.path()).unwrap()).unwrap();
    assert_eq!(raw, json!({"tags": {"a": ["id1"]}}));
}

// ==================== Corruption Tests ====================

#[test]
fn test_corrupt_store_is_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.json");
    for garbage in ["", "not json", "{\"entries\": [1]}", "\u{0}\u{1}\u{2}", "{\"version\": 1,"] {
        std::fs::write(&path, garbage).unwrap();
        let store = StoreReader::read_store(&path);
        assert!(store.is_empty(), "garbage {:?} should load empty", garbage);
        assert_eq!(store.version(), STORE_VERSION);
    }
}

#[test]
fn test_store_path_is_directory() {
    let dir = tempdir().unwrap();
    // Reading a directory is an IO error, which still yields an empty store.
    let store = StoreReader::read_store(dir.path());
    assert!(store.is_empty());
}

// ==================== Path Resolution Tests ====================

#[test]
fn test_project_root_search() {
    let dir = tempdir().unwrap();
    std::fs::create_dir(dir.path().join(".claude")).unwrap();
    let nested = dir.path().join("src").join("deep").join("er");
    std::fs::create_dir_all(&nested).unwrap();

    assert_eq!(find_project_root(&nested, ".claude"), dir.path());
}

#[test]
fn test_resolved_paths_under_marker() {
    let dir = tempdir().unwrap();
    std::fs::create_dir(dir.path().join(".claude")).unwrap();
    let nested = dir.path().join("sub");
    std::fs::create_dir_all(&nested).unwrap();

    let paths = MemoryConfig::default().resolve(&nested);
    assert_eq!(paths.root(), dir.path());
    assert_eq!(
        paths.store_file(),
        dir.path().join(".claude").join("nika-memory.json")
    );
    assert_eq!(
        paths.index_file(),
        dir.path().join(".claude").join("nika-memory.index.json")
    );
}
