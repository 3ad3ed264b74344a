//! Configuration store integration tests
//!
//! End-to-end scenarios driving a plugin's configuration the way a host
//! would, against the in-memory option store.

use plugconf::lifecycle::{on_activate, on_deactivate, on_uninstall};
use plugconf::{keys, ConfigStore, EntryDef, MemoryStore, Persistence, PlugconfError};
use serde_json::json;

#[test]
fn test_plugin_information_is_available_after_construction() {
    let mut config = ConfigStore::new("my-plugin", "2.0.0", MemoryStore::new());
    assert_eq!(config.get(keys::PLUGIN_NAME).unwrap(), &json!("my-plugin"));
    assert_eq!(config.get(keys::VERSION).unwrap(), &json!("2.0.0"));
    assert!(config.has(keys::ACTIVATED));
    assert_eq!(config.get(keys::ACTIVATED).unwrap(), &json!(false));
}

#[test]
fn test_full_lifecycle_round_trip() {
    // install and activate
    let mut config = ConfigStore::new("my-plugin", "2.0.0", MemoryStore::new())
        .with_entry("greeting", EntryDef::host_option("hello"));
    on_activate(&mut config).unwrap();
    config.flush().unwrap();
    assert_eq!(config.store().get("my_plugin_activated").unwrap().value, json!(true));
    assert_eq!(config.store().get("my_plugin_greeting").unwrap().value, json!("hello"));

    // reconfigure
    config.set("greeting", "howdy").unwrap();
    config.flush().unwrap();
    assert_eq!(config.store().get("my_plugin_greeting").unwrap().value, json!("howdy"));

    // deactivation keeps persisted values
    on_deactivate(&mut config).unwrap();
    config.flush().unwrap();
    assert_eq!(config.store().get("my_plugin_activated").unwrap().value, json!(false));
    assert_eq!(config.store().get("my_plugin_greeting").unwrap().value, json!("howdy"));

    // uninstall removes everything persisted
    on_uninstall(&mut config).unwrap();
    assert!(config.store().is_empty());
}

#[test]
fn test_option_names_are_namespaced_by_plugin() {
    let mut config = ConfigStore::new("alpha-plugin", "1.0.0", MemoryStore::new());
    config.activate().unwrap();
    assert_eq!(config.prefix(), "alpha_plugin_");
    assert_eq!(config.store().names(), vec!["alpha_plugin_activated"]);
}

#[test]
fn test_unknown_keys_require_declaration() {
    let mut config = ConfigStore::new("my-plugin", "1.0.0", MemoryStore::new());

    assert!(matches!(
        config.set("theme", "dark"),
        Err(PlugconfError::KeyNotFound { .. })
    ));

    config.declare_and_set("theme", "dark");
    assert_eq!(config.get("theme").unwrap(), &json!("dark"));

    // still loose: flushing writes nothing
    config.flush().unwrap();
    assert!(config.store().is_empty());
}

#[test]
fn test_promoted_entry_survives_like_a_schema_entry() {
    let mut config = ConfigStore::new("my-plugin", "1.0.0", MemoryStore::new());
    config.declare_and_set("theme", "dark");
    config.promote("theme", Persistence::HostOption).unwrap();
    config.flush().unwrap();

    // a fresh store over the same backing options sees the value
    let backing = config.store().clone();
    let mut reloaded = ConfigStore::new("my-plugin", "1.0.0", backing)
        .with_entry("theme", EntryDef::host_option("light"));
    assert_eq!(reloaded.get("theme").unwrap(), &json!("dark"));
}

#[test]
fn test_grouped_options_live_beside_entries() {
    let mut config = ConfigStore::new("my-plugin", "1.0.0", MemoryStore::new());
    config.activate().unwrap();
    config.set_sub_option("ui", "dark_mode", true).unwrap();

    assert_eq!(config.get(keys::ACTIVATED).unwrap(), &json!(false));
    assert_eq!(config.get_sub_option("ui", "dark_mode").unwrap(), Some(json!(true)));
    assert_eq!(
        config.store().names(),
        vec!["my_plugin_activated", "my_plugin_ui"]
    );
}
