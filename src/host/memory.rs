//! In-memory option store
//!
//! The reference store, used in tests and by hosts that keep options for
//! the lifetime of the process only.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::Result;
use crate::host::options::{OptionStore, StoredOption};

/// Option store backed by a plain in-process map. Never fails.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    options: BTreeMap<String, StoredOption>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored option record, if present.
    pub fn get(&self, name: &str) -> Option<&StoredOption> {
        self.options.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Option names currently stored, in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.options.keys().map(String::as_str).collect()
    }
}

impl OptionStore for MemoryStore {
    fn create(&mut self, name: &str, value: &Value, autoload: bool) -> Result<()> {
        self.options
            .entry(name.to_string())
            .or_insert_with(|| StoredOption {
                value: value.clone(),
                autoload,
            });
        Ok(())
    }

    fn read(&self, name: &str) -> Result<Option<Value>> {
        Ok(self.options.get(name).map(|stored| stored.value.clone()))
    }

    fn update(&mut self, name: &str, value: &Value) -> Result<()> {
        match self.options.get_mut(name) {
            Some(stored) => stored.value = value.clone(),
            None => {
                self.options.insert(
                    name.to_string(),
                    StoredOption {
                        value: value.clone(),
                        autoload: false,
                    },
                );
            }
        }
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        self.options.remove(name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_is_create_if_absent() {
        let mut store = MemoryStore::new();
        store.create("opt", &json!(1), false).unwrap();
        store.create("opt", &json!(2), true).unwrap();

        let stored = store.get("opt").unwrap();
        assert_eq!(stored.value, json!(1));
        assert!(!stored.autoload);
    }

    #[test]
    fn test_update_upserts() {
        let mut store = MemoryStore::new();
        store.update("opt", &json!("a")).unwrap();
        assert_eq!(store.read("opt").unwrap(), Some(json!("a")));

        store.update("opt", &json!("b")).unwrap();
        assert_eq!(store.read("opt").unwrap(), Some(json!("b")));
    }

    #[test]
    fn test_update_preserves_autoload() {
        let mut store = MemoryStore::new();
        store.create("opt", &json!(1), true).unwrap();
        store.update("opt", &json!(2)).unwrap();
        assert!(store.get("opt").unwrap().autoload);
    }

    #[test]
    fn test_delete_absent_is_harmless() {
        let mut store = MemoryStore::new();
        store.delete("missing").unwrap();

        store.create("opt", &json!(1), false).unwrap();
        store.delete("opt").unwrap();
        assert!(store.is_empty());
        assert_eq!(store.read("opt").unwrap(), None);
    }
}
