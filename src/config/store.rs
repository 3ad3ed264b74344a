//! Configuration store for a hosted plugin
//!
//! The store mediates between in-memory entry values and the host's named
//! option facility. Entries are declared in a schema (key, persistence
//! strategy, default), loaded lazily on first access, and written back on
//! flush. Persisted option names carry a prefix derived from the plugin
//! slug so plugins sharing one host store cannot collide.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::entry::{keys, EntryDef, Persistence};
use crate::error::{PlugconfError, Result};
use crate::host::OptionStore;
use crate::utils::helpers::option_prefix;

/// Per-plugin configuration backed by a host option store.
///
/// One store is constructed per running plugin and handed to whatever
/// needs configuration access; there is no global instance. Dropping the
/// store flushes outstanding changes as a last resort, but owners that
/// care about write errors should call [`flush`](Self::flush) themselves.
///
/// # Example
///
/// ```
/// use plugconf::{ConfigStore, EntryDef, MemoryStore};
///
/// let mut config = ConfigStore::new("my-plugin", "1.0.0", MemoryStore::new())
///     .with_entry("greeting", EntryDef::host_option("hello"));
///
/// config.activate()?;
/// assert_eq!(config.get("greeting")?, &serde_json::json!("hello"));
/// config.set("greeting", "howdy")?.flush()?;
/// # Ok::<(), plugconf::PlugconfError>(())
/// ```
pub struct ConfigStore<S: OptionStore> {
    /// Entry definitions, keyed by entry key.
    schema: BTreeMap<String, EntryDef>,
    /// Values of entries that have been loaded.
    values: BTreeMap<String, Value>,
    /// Keys whose in-memory value has not been written back yet.
    dirty: BTreeSet<String>,
    /// Prepended to every persisted option name.
    prefix: String,
    store: S,
}

impl<S: OptionStore> ConfigStore<S> {
    /// Create the store for one plugin.
    ///
    /// Seeds the built-in `activated` entry (host option, default `false`)
    /// and the loose `pluginName` and `version` entries.
    pub fn new(name: &str, version: &str, store: S) -> Self {
        let mut schema = BTreeMap::new();
        schema.insert(keys::ACTIVATED.to_string(), EntryDef::host_option(false));

        let mut config = Self {
            schema,
            values: BTreeMap::new(),
            dirty: BTreeSet::new(),
            prefix: option_prefix(name),
            store,
        };
        config
            .declare_and_set(keys::PLUGIN_NAME, name)
            .declare_and_set(keys::VERSION, version);
        config
    }

    /// Add a schema entry at construction time.
    ///
    /// Declaring a key that already exists replaces its definition and
    /// keeps any loaded value.
    pub fn with_entry<K: Into<String>>(mut self, key: K, def: EntryDef) -> Self {
        self.schema.insert(key.into(), def);
        self
    }

    /// Borrow the injected option store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutably borrow the injected option store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Prefix prepended to persisted option names, e.g. `my_plugin_` for
    /// the slug `my-plugin`.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Schema definition of an entry, if declared.
    pub fn entry_def(&self, key: &str) -> Option<&EntryDef> {
        self.schema.get(key)
    }

    /// Get the value of an entry, loading it on first access.
    ///
    /// Host-option entries read the store and fall back to the schema
    /// default when the store has nothing; memory entries resolve straight
    /// to the default. Unknown keys fail with
    /// [`KeyNotFound`](PlugconfError::KeyNotFound).
    pub fn get(&mut self, key: &str) -> Result<&Value> {
        if self.values.contains_key(key) {
            return Ok(&self.values[key]);
        }
        let loaded = self.load_entry(key)?;
        Ok(self.values.entry(key.to_string()).or_insert(loaded))
    }

    /// Get the value of an entry, or `default` when the key is unknown.
    ///
    /// Store failures while loading a known entry still surface.
    pub fn get_or(&mut self, key: &str, default: Value) -> Result<Value> {
        if !self.has(key) {
            return Ok(default);
        }
        Ok(self.get(key)?.clone())
    }

    /// Set the value of a declared entry and mark it dirty.
    ///
    /// Chainable. Unknown keys fail with
    /// [`KeyNotFound`](PlugconfError::KeyNotFound); use
    /// [`declare_and_set`](Self::declare_and_set) to register a loose
    /// entry instead.
    pub fn set<V: Into<Value>>(&mut self, key: &str, value: V) -> Result<&mut Self> {
        if !self.schema.contains_key(key) {
            return Err(PlugconfError::key_not_found(key));
        }
        self.values.insert(key.to_string(), value.into());
        self.dirty.insert(key.to_string());
        Ok(self)
    }

    /// Register `key` as a loose entry if it is unknown, then set its
    /// value.
    ///
    /// Loose entries live in memory only: flush never writes them and
    /// uninstall never deletes them, and declaring one does not mark it
    /// dirty. [`promote`](Self::promote) the entry if it should start
    /// persisting. A key that is already declared keeps its definition;
    /// when that definition persists, the value is marked dirty so the
    /// next flush writes it.
    pub fn declare_and_set<V: Into<Value>>(&mut self, key: &str, value: V) -> &mut Self {
        let persistence = self.schema.entry(key.to_string()).or_default().persistence;
        if persistence == Persistence::HostOption {
            self.dirty.insert(key.to_string());
        }
        self.values.insert(key.to_string(), value.into());
        self
    }

    /// Change the persistence strategy of a declared entry.
    ///
    /// Promoting a loose entry to [`Persistence::HostOption`] is how an
    /// ad-hoc value starts surviving restarts. A loaded value is marked
    /// dirty so the next flush writes it.
    pub fn promote(&mut self, key: &str, persistence: Persistence) -> Result<&mut Self> {
        let def = self
            .schema
            .get_mut(key)
            .ok_or_else(|| PlugconfError::key_not_found(key))?;
        def.persistence = persistence;
        if self.values.contains_key(key) {
            self.dirty.insert(key.to_string());
        }
        Ok(self)
    }

    /// Returns true if the entry is declared in the schema.
    pub fn has(&self, key: &str) -> bool {
        self.schema.contains_key(key)
    }

    /// Entry keys in sorted order: the whole schema, or only loaded
    /// entries.
    pub fn keys(&self, loaded_only: bool) -> Vec<&str> {
        if loaded_only {
            self.values.keys().map(String::as_str).collect()
        } else {
            self.schema.keys().map(String::as_str).collect()
        }
    }

    /// Values of all loaded entries.
    ///
    /// Asking for unloaded entries as well is not supported yet and fails
    /// with [`Unsupported`](PlugconfError::Unsupported).
    pub fn all(&self, loaded_only: bool) -> Result<&BTreeMap<String, Value>> {
        if !loaded_only {
            return Err(PlugconfError::unsupported(
                "all() cannot yet return unloaded entries",
            ));
        }
        Ok(&self.values)
    }

    /// Returns true if `key` has an unflushed change.
    pub fn is_dirty(&self, key: &str) -> bool {
        self.dirty.contains(key)
    }

    /// Keys with unflushed changes, in sorted order.
    pub fn dirty_keys(&self) -> Vec<&str> {
        self.dirty.iter().map(String::as_str).collect()
    }

    /// Create the persisted representation of every schema entry that does
    /// not have one yet.
    ///
    /// Intended to run when the host activates the plugin. Safe to run
    /// again: existing host options keep their stored values, and entries
    /// that are already loaded are not clobbered.
    pub fn activate(&mut self) -> Result<&mut Self> {
        let entries: Vec<(String, EntryDef)> = self
            .schema
            .iter()
            .map(|(key, def)| (key.clone(), def.clone()))
            .collect();
        for (key, def) in entries {
            self.persist_create(&key, &def)?;
        }
        info!("Created persisted entries under prefix [{}]", self.prefix);
        Ok(self)
    }

    /// Delete every persisted entry from the host store.
    ///
    /// Loaded values and dirty flags of deleted entries are evicted too,
    /// so later reads resolve to schema defaults and a later flush cannot
    /// re-create the options. Memory entries are untouched.
    pub fn uninstall(&mut self) -> Result<&mut Self> {
        let entries: Vec<(String, Persistence)> = self
            .schema
            .iter()
            .map(|(key, def)| (key.clone(), def.persistence))
            .collect();
        for (key, persistence) in entries {
            self.persist_delete(&key)?;
            if persistence == Persistence::HostOption {
                self.values.remove(&key);
                self.dirty.remove(&key);
            }
        }
        info!("Deleted persisted entries under prefix [{}]", self.prefix);
        Ok(self)
    }

    /// Write every dirty entry back through its persistence strategy and
    /// clear the flags.
    ///
    /// Keys are flushed in sorted order, one independent write per key. A
    /// failed write surfaces immediately and leaves that key dirty.
    pub fn flush(&mut self) -> Result<&mut Self> {
        while let Some(key) = self.dirty.iter().next().cloned() {
            // Invariant: a dirty key always has a loaded value.
            if let Some(value) = self.values.get(&key).cloned() {
                self.persist_update(&key, &value)?;
            }
            self.dirty.remove(&key);
        }
        Ok(self)
    }

    /// Read one value out of a grouped option.
    ///
    /// Grouped options hold a JSON object of name/value pairs under a
    /// single host option. They bypass the schema and dirty tracking:
    /// reads and writes go straight to the store.
    pub fn get_sub_option(&self, group: &str, name: &str) -> Result<Option<Value>> {
        let stored = self.store.read(&self.prefixed(group))?;
        Ok(stored
            .as_ref()
            .and_then(Value::as_object)
            .and_then(|map| map.get(name))
            .cloned())
    }

    /// Write one value into a grouped option, creating the group as
    /// needed. A stored group that is not a JSON object is replaced.
    pub fn set_sub_option<V: Into<Value>>(
        &mut self,
        group: &str,
        name: &str,
        value: V,
    ) -> Result<&mut Self> {
        let prefixed = self.prefixed(group);
        let mut map = match self.store.read(&prefixed)? {
            Some(Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };
        map.insert(name.to_string(), value.into());
        self.store.update(&prefixed, &Value::Object(map))?;
        Ok(self)
    }

    /// Namespaced option name for `key`.
    fn prefixed(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// Resolve the initial value of a schema entry.
    fn load_entry(&self, key: &str) -> Result<Value> {
        let def = self
            .schema
            .get(key)
            .ok_or_else(|| PlugconfError::key_not_found(key))?;
        let value = match def.persistence {
            Persistence::HostOption => match self.store.read(&self.prefixed(key))? {
                Some(stored) => {
                    debug!("Loaded [{}] from the host store", key);
                    stored
                }
                None => def.default.clone(),
            },
            Persistence::Memory => def.default.clone(),
        };
        Ok(value)
    }

    /// Create an entry's persisted representation if absent.
    fn persist_create(&mut self, key: &str, def: &EntryDef) -> Result<()> {
        match def.persistence {
            Persistence::HostOption => {
                let name = self.prefixed(key);
                debug!("Creating host option [{}]", name);
                self.store.create(&name, &def.default, false)
            }
            Persistence::Memory => {
                // Registration only; never clobber a loaded value.
                if !self.values.contains_key(key) {
                    self.values.insert(key.to_string(), def.default.clone());
                }
                Ok(())
            }
        }
    }

    /// Write one entry through its persistence strategy.
    fn persist_update(&mut self, key: &str, value: &Value) -> Result<()> {
        match self.schema.get(key).map(|def| def.persistence) {
            Some(Persistence::HostOption) => {
                let name = self.prefixed(key);
                debug!("Updating host option [{}]", name);
                self.store.update(&name, value)
            }
            // Memory entries have nothing to write.
            _ => Ok(()),
        }
    }

    /// Delete an entry's persisted representation, if any.
    fn persist_delete(&mut self, key: &str) -> Result<()> {
        match self.schema.get(key).map(|def| def.persistence) {
            Some(Persistence::HostOption) => {
                let name = self.prefixed(key);
                debug!("Deleting host option [{}]", name);
                self.store.delete(&name)
            }
            _ => Ok(()),
        }
    }
}

impl<S: OptionStore> Drop for ConfigStore<S> {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            warn!("Flush on drop failed: {}", e);
        }
    }
}
