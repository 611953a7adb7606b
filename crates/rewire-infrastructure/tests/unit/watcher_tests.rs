//! Preference Watcher Tests
//!
//! A second store on the same file stands in for another process.

use rewire_application::RewiringManager;
use rewire_domain::constants::WIRED_BEANS_KEY;
use rewire_domain::{Bean, DeclaredType, DependencyDescriptor, PreferenceStore, Wiring};
use rewire_infrastructure::bootstrap::ManagerBuilder;
use rewire_infrastructure::config::AppConfig;
use rewire_infrastructure::preferences::{FilePreferenceStore, forward_changes, watch};
use rewire_infrastructure::registry::BeanRegistry;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tempfile::TempDir;

const OWNER: &str = "app::Consumer";

fn registry() -> Arc<BeanRegistry> {
    let registry = BeanRegistry::new();
    for name in ["testA", "testB", "testC"] {
        registry
            .register(name, Bean::new(name, name.to_string()))
            .unwrap();
    }
    Arc::new(registry)
}

fn running_manager(path: &Path) -> (FilePreferenceStore, Arc<RewiringManager>) {
    let store = FilePreferenceStore::open(path).unwrap();
    let manager = ManagerBuilder::new(AppConfig::default())
        .with_lookup(registry())
        .with_preferences(Arc::new(store.clone()))
        .build()
        .unwrap();
    (store, Arc::new(manager))
}

fn resolve_deps(manager: &RewiringManager) -> Arc<rewire_application::ManageableProxy> {
    let descriptor =
        DependencyDescriptor::field("deps", DeclaredType::list::<String>()).rewireable();
    manager
        .resolve(&descriptor, OWNER, &[], Default::default())
        .unwrap()
}

fn operator_set(path: &Path, node: &str, value: &str) {
    let operator = FilePreferenceStore::open(path).unwrap();
    let node = operator.node(node);
    node.put(WIRED_BEANS_KEY, value);
    node.flush().unwrap();
}

fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(10);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(20));
    }
    condition()
}

#[test]
fn test_forward_changes_rewires_proxy() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wiring.json");
    let (store, manager) = running_manager(&path);
    let proxy = resolve_deps(&manager);

    operator_set(&path, proxy.identifier().path(), "testC,testA");
    let forwarded = forward_changes(&store, &manager).unwrap();

    assert_eq!(forwarded, 1);
    assert_eq!(proxy.current_names(), Wiring::new(["testC", "testA"]));
    assert_eq!(forward_changes(&store, &manager).unwrap(), 0);
}

#[test]
fn test_forward_changes_skips_other_keys_and_bad_paths() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wiring.json");
    let (store, manager) = running_manager(&path);
    let proxy = resolve_deps(&manager);

    let operator = FilePreferenceStore::open(&path).unwrap();
    let node = operator.node(proxy.identifier().path());
    node.put("comment", "not a wiring");
    node.flush().unwrap();
    operator_set(&path, "app/Consumer/deps", "testB");

    assert_eq!(forward_changes(&store, &manager).unwrap(), 0);
    assert!(proxy.current_names().is_empty());
}

#[test]
fn test_forward_changes_ignores_unregistered_identifier() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wiring.json");
    let (store, manager) = running_manager(&path);

    operator_set(&path, "app/Elsewhere/__field__/deps", "testB");

    assert_eq!(forward_changes(&store, &manager).unwrap(), 1);
    assert!(manager.registered_identifiers().is_empty());
}

#[test]
fn test_watch_applies_edits_from_another_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wiring.json");
    let (store, manager) = running_manager(&path);
    let proxy = resolve_deps(&manager);

    let watcher = watch(store, Arc::clone(&manager)).unwrap();
    assert_eq!(watcher.file_path(), path.as_path());

    operator_set(&path, proxy.identifier().path(), "testB,testC");

    assert!(
        wait_until(|| proxy.current_names() == Wiring::new(["testB", "testC"])),
        "wiring was {}",
        proxy.current_names()
    );
    assert_eq!(
        proxy.get_all::<String>().iter().map(|s| s.as_str()).collect::<Vec<_>>(),
        vec!["testB", "testC"]
    );
}

#[test]
fn test_watch_creates_missing_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state").join("wiring.json");
    let (store, manager) = running_manager(&path);

    let watcher = watch(store, manager).unwrap();

    assert!(dir.path().join("state").is_dir());
    assert_eq!(watcher.file_path(), path.as_path());
}
