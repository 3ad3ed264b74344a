//! Lifecycle hook integration tests
//!
//! Drives plugins through host lifecycle moments against a JSON option
//! store on disk, including the flush that runs when a store is dropped.

#![cfg(feature = "file-store")]

use plugconf::lifecycle::{on_activate, on_deactivate, on_uninstall};
use plugconf::{keys, ConfigStore, JsonFileStore};
use serde_json::{json, Value};
use tempfile::TempDir;

fn open_store(path: &std::path::Path) -> JsonFileStore {
    JsonFileStore::open(path).unwrap()
}

#[test]
fn test_drop_flushes_outstanding_changes() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("options.json");

    {
        let mut config = ConfigStore::new("my-plugin", "1.0.0", open_store(&path));
        on_activate(&mut config).unwrap();
        // no explicit flush; the drop writes the raised flag
    }

    let store = open_store(&path);
    assert_eq!(store.get("my_plugin_activated").unwrap().value, json!(true));
}

#[test]
fn test_sequential_plugins_share_one_store_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("options.json");

    {
        let mut config = ConfigStore::new("alpha", "1.0.0", open_store(&path));
        on_activate(&mut config).unwrap();
    }
    {
        let mut config = ConfigStore::new("beta", "1.0.0", open_store(&path));
        on_activate(&mut config).unwrap();
    }

    let store = open_store(&path);
    assert_eq!(store.get("alpha_activated").unwrap().value, json!(true));
    assert_eq!(store.get("beta_activated").unwrap().value, json!(true));
}

#[test]
fn test_deactivate_persists_a_scalar_boolean() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("options.json");

    {
        let mut config = ConfigStore::new("my-plugin", "1.0.0", open_store(&path));
        on_activate(&mut config).unwrap();
    }
    {
        let mut config = ConfigStore::new("my-plugin", "1.0.0", open_store(&path));
        on_deactivate(&mut config).unwrap();
    }

    let store = open_store(&path);
    assert!(matches!(
        store.get("my_plugin_activated").unwrap().value,
        Value::Bool(false)
    ));
}

#[test]
fn test_uninstall_leaves_an_empty_store_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("options.json");

    {
        let mut config = ConfigStore::new("my-plugin", "1.0.0", open_store(&path));
        on_activate(&mut config).unwrap();
    }
    {
        let mut config = ConfigStore::new("my-plugin", "1.0.0", open_store(&path));
        on_uninstall(&mut config).unwrap();
    }

    let store = open_store(&path);
    assert!(store.is_empty());

    // a fresh plugin over the wiped file resolves schema defaults
    let mut config = ConfigStore::new("my-plugin", "1.0.0", open_store(&path));
    assert_eq!(config.get(keys::ACTIVATED).unwrap(), &json!(false));
}
