//! The option facility seam between a plugin and its host
//!
//! A host embeds plugins and offers them named-option persistence. The
//! trait here is that facility as one plugin sees it; every name it
//! receives is already namespaced with the plugin's prefix.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Named-option persistence facility provided by the host.
///
/// Each call is a single-option operation; the store supplies per-call
/// atomicity and nothing more.
#[cfg_attr(test, mockall::automock)]
pub trait OptionStore {
    /// Create a named option if it does not exist yet.
    ///
    /// `autoload` hints whether the host should eagerly load the option on
    /// startup; hosts without such a notion may ignore it.
    fn create(&mut self, name: &str, value: &Value, autoload: bool) -> Result<()>;

    /// Current value of a named option, if present.
    fn read(&self, name: &str) -> Result<Option<Value>>;

    /// Overwrite a named option, creating it when absent.
    fn update(&mut self, name: &str, value: &Value) -> Result<()>;

    /// Remove a named option. Deleting an absent option is not an error.
    fn delete(&mut self, name: &str) -> Result<()>;
}

impl<S: OptionStore + ?Sized> OptionStore for Box<S> {
    fn create(&mut self, name: &str, value: &Value, autoload: bool) -> Result<()> {
        (**self).create(name, value, autoload)
    }

    fn read(&self, name: &str) -> Result<Option<Value>> {
        (**self).read(name)
    }

    fn update(&mut self, name: &str, value: &Value) -> Result<()> {
        (**self).update(name, value)
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        (**self).delete(name)
    }
}

/// One stored option with its autoload hint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredOption {
    pub value: Value,
    pub autoload: bool,
}
