//! Preference Store Tests

use rewire_domain::constants::WIRED_BEANS_KEY;
use rewire_domain::{Error, PreferenceNode, PreferenceStore};
use rewire_infrastructure::config::{PreferencesBackend, PreferencesConfig};
use rewire_infrastructure::preferences::{
    FilePreferenceStore, InMemoryPreferenceStore, build_preference_store,
};
use std::fs;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use tempfile::TempDir;

const NODE: &str = "app/Consumer/__field__/deps";

// ============================================================================
// In-memory store
// ============================================================================

#[test]
fn test_memory_put_is_visible_before_flush() {
    let store = InMemoryPreferenceStore::new();
    let node = store.node(NODE);

    node.put(WIRED_BEANS_KEY, "testC,testA");

    assert_eq!(node.get(WIRED_BEANS_KEY).as_deref(), Some("testC,testA"));
    assert_eq!(store.durable_value(NODE, WIRED_BEANS_KEY), None);
    assert_eq!(node.path(), NODE);
}

#[test]
fn test_memory_flush_makes_value_durable() {
    let store = InMemoryPreferenceStore::new();
    let node = store.node(NODE);
    node.put(WIRED_BEANS_KEY, "testB");

    node.flush().unwrap();
    store.discard_pending();

    assert_eq!(
        store.durable_value(NODE, WIRED_BEANS_KEY).as_deref(),
        Some("testB")
    );
    assert_eq!(
        store.node(NODE).get(WIRED_BEANS_KEY).as_deref(),
        Some("testB")
    );
    assert_eq!(store.flush_count(), 1);
}

#[test]
fn test_memory_clones_share_state() {
    let store = InMemoryPreferenceStore::new();
    let other = store.clone();

    let node = store.node(NODE);
    node.put(WIRED_BEANS_KEY, "testA");
    node.flush().unwrap();

    assert_eq!(
        other.node(NODE).get(WIRED_BEANS_KEY).as_deref(),
        Some("testA")
    );
}

#[test]
fn test_memory_failed_flush_loses_write_on_restart() {
    let store = InMemoryPreferenceStore::new();
    store.set_fail_flush(true);
    let node = store.node(NODE);
    node.put(WIRED_BEANS_KEY, "testA");

    assert!(matches!(node.flush(), Err(Error::Persistence { .. })));

    store.discard_pending();
    assert_eq!(node.get(WIRED_BEANS_KEY), None);
    assert_eq!(store.flush_count(), 0);
}

#[test]
fn test_memory_flush_only_touches_its_node() {
    let store = InMemoryPreferenceStore::new();
    store.node(NODE).put(WIRED_BEANS_KEY, "testA");
    store.node("app/Other/__field__/x").put(WIRED_BEANS_KEY, "testB");

    store.node(NODE).flush().unwrap();
    store.discard_pending();

    assert_eq!(store.node_paths(), vec![NODE.to_string()]);
}

#[test]
fn test_memory_node_paths_are_sorted_and_distinct() {
    let store = InMemoryPreferenceStore::new();
    store.node("b/Owner/__field__/x").put(WIRED_BEANS_KEY, "one");
    store.node("a/Owner/__field__/x").put(WIRED_BEANS_KEY, "two");
    store.node("a/Owner/__field__/x").put("other", "three");

    assert_eq!(
        store.node_paths(),
        vec![
            "a/Owner/__field__/x".to_string(),
            "b/Owner/__field__/x".to_string()
        ]
    );
}

#[test]
fn test_memory_flush_never_hides_value_from_readers() {
    let store = InMemoryPreferenceStore::new();
    let node = store.node(NODE);
    node.put(WIRED_BEANS_KEY, "v0");
    node.flush().unwrap();

    let done = Arc::new(AtomicBool::new(false));
    let reader = {
        let store = store.clone();
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let node = store.node(NODE);
            while !done.load(Ordering::SeqCst) {
                assert!(node.get(WIRED_BEANS_KEY).is_some(), "value vanished during flush");
            }
        })
    };

    for i in 1..=2_000 {
        node.put(WIRED_BEANS_KEY, &format!("v{i}"));
        node.flush().unwrap();
    }
    done.store(true, Ordering::SeqCst);

    reader.join().unwrap();
    assert_eq!(
        store.durable_value(NODE, WIRED_BEANS_KEY).as_deref(),
        Some("v2000")
    );
}

// ============================================================================
// File store
// ============================================================================

#[test]
fn test_file_store_missing_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let store = FilePreferenceStore::open(dir.path().join("wiring.json")).unwrap();

    assert!(store.node_paths().is_empty());
    assert_eq!(store.node(NODE).get(WIRED_BEANS_KEY), None);
}

#[test]
fn test_file_store_flush_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("wiring.json");

    let store = FilePreferenceStore::open(&path).unwrap();
    let node = store.node(NODE);
    node.put(WIRED_BEANS_KEY, "testC,testA");
    node.flush().unwrap();
    drop(store);

    let reopened = FilePreferenceStore::open(&path).unwrap();
    assert_eq!(
        reopened.node(NODE).get(WIRED_BEANS_KEY).as_deref(),
        Some("testC,testA")
    );
    assert_eq!(reopened.file_path(), path.as_path());

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw[format!("{NODE}/{WIRED_BEANS_KEY}")], "testC,testA");
}

#[test]
fn test_file_store_unflushed_write_is_not_persisted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wiring.json");

    let store = FilePreferenceStore::open(&path).unwrap();
    store.node(NODE).put(WIRED_BEANS_KEY, "testA");
    assert_eq!(store.entries().len(), 1);
    drop(store);

    let reopened = FilePreferenceStore::open(&path).unwrap();
    assert!(reopened.entries().is_empty());
}

#[test]
fn test_file_store_rejects_corrupt_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wiring.json");
    fs::write(&path, "[1, 2, 3]").unwrap();

    let err = FilePreferenceStore::open(&path).unwrap_err();

    assert!(matches!(err, Error::Persistence { .. }), "{err:?}");
}

#[test]
fn test_file_store_reload_reports_changes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wiring.json");
    let key = format!("{NODE}/{WIRED_BEANS_KEY}");

    let store = FilePreferenceStore::open(&path).unwrap();
    let node = store.node(NODE);
    node.put(WIRED_BEANS_KEY, "testA");
    node.flush().unwrap();

    // Another process rewrites the file
    fs::write(
        &path,
        serde_json::json!({ key.clone(): "testB,testA", "x/Y/__field__/z/wiredBeans": "testC" })
            .to_string(),
    )
    .unwrap();

    let changes = store.reload().unwrap();

    assert_eq!(
        changes,
        vec![
            (key, "testB,testA".to_string()),
            ("x/Y/__field__/z/wiredBeans".to_string(), "testC".to_string()),
        ]
    );
    assert_eq!(node.get(WIRED_BEANS_KEY).as_deref(), Some("testB,testA"));
    assert!(store.reload().unwrap().is_empty());
}

#[test]
fn test_file_flush_keeps_entries_flushed_by_another_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wiring.json");
    let running = FilePreferenceStore::open(&path).unwrap();

    let operator = FilePreferenceStore::open(&path).unwrap();
    let operator_node = operator.node(NODE);
    operator_node.put(WIRED_BEANS_KEY, "testC,testA");
    operator_node.flush().unwrap();

    let unrelated = running.node("app/Other/__field__/x");
    unrelated.put(WIRED_BEANS_KEY, "testB");
    unrelated.flush().unwrap();

    let reopened = FilePreferenceStore::open(&path).unwrap();
    assert_eq!(
        reopened.node(NODE).get(WIRED_BEANS_KEY).as_deref(),
        Some("testC,testA")
    );
    assert_eq!(
        reopened
            .node("app/Other/__field__/x")
            .get(WIRED_BEANS_KEY)
            .as_deref(),
        Some("testB")
    );

    // The running store has not seen the operator's entry yet
    assert_eq!(running.node(NODE).get(WIRED_BEANS_KEY), None);
    assert_eq!(
        running.reload().unwrap(),
        vec![(format!("{NODE}/{WIRED_BEANS_KEY}"), "testC,testA".to_string())]
    );
}

#[test]
fn test_file_flush_keeps_writes_pending_when_file_is_corrupt() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wiring.json");
    let store = FilePreferenceStore::open(&path).unwrap();
    fs::write(&path, "not json").unwrap();

    let node = store.node(NODE);
    node.put(WIRED_BEANS_KEY, "testA");
    assert!(matches!(node.flush(), Err(Error::Persistence { .. })));
    assert_eq!(node.get(WIRED_BEANS_KEY).as_deref(), Some("testA"));

    fs::write(&path, "{}").unwrap();
    node.flush().unwrap();
    let reopened = FilePreferenceStore::open(&path).unwrap();
    assert_eq!(
        reopened.node(NODE).get(WIRED_BEANS_KEY).as_deref(),
        Some("testA")
    );
}

// ============================================================================
// Backend selection
// ============================================================================

#[test]
fn test_build_preference_store_backends() {
    let none = PreferencesConfig {
        backend: PreferencesBackend::None,
        ..Default::default()
    };
    assert!(build_preference_store(&none).unwrap().is_none());

    let memory = PreferencesConfig::default();
    assert!(build_preference_store(&memory).unwrap().is_some());

    let dir = TempDir::new().unwrap();
    let file = PreferencesConfig {
        backend: PreferencesBackend::File,
        path: Some(dir.path().join("wiring.json")),
        ..Default::default()
    };
    let store = build_preference_store(&file).unwrap().unwrap();
    store.node(NODE).put(WIRED_BEANS_KEY, "testA");
    store.node(NODE).flush().unwrap();
    assert!(dir.path().join("wiring.json").exists());
}

#[test]
fn test_build_file_store_without_path_fails() {
    let config = PreferencesConfig {
        backend: PreferencesBackend::File,
        ..Default::default()
    };

    assert!(matches!(
        build_preference_store(&config),
        Err(Error::Configuration { .. })
    ));
}
