//! JSON file option store
//!
//! Persists the option map as a pretty-printed JSON file, rewriting it
//! after every mutation. Suitable for standalone hosts and the bundled
//! CLI. A missing file means an empty store; the file is created on the
//! first write.
//!
//! The whole map is cached at open, so keep at most one handle per file
//! at a time.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::host::options::{OptionStore, StoredOption};

/// Option store persisted as a single JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    options: BTreeMap<String, StoredOption>,
}

impl JsonFileStore {
    /// Open the store at `path`, reading the current contents if the file
    /// exists.
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();
        let options = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            debug!("No option file at {:?}, starting empty", path);
            BTreeMap::new()
        };
        Ok(Self { path, options })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored option record, if present.
    pub fn get(&self, name: &str) -> Option<&StoredOption> {
        self.options.get(name)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&self.options)?;
        fs::write(&self.path, contents)?;
        debug!("Saved {} options to {:?}", self.options.len(), self.path);
        Ok(())
    }
}

impl OptionStore for JsonFileStore {
    fn create(&mut self, name: &str, value: &Value, autoload: bool) -> Result<()> {
        if self.options.contains_key(name) {
            return Ok(());
        }
        self.options.insert(
            name.to_string(),
            StoredOption {
                value: value.clone(),
                autoload,
            },
        );
        self.save()
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
        self.save()
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        if self.options.remove(name).is_some() {
            self.save()?;
        }
        Ok(())
    }
}
