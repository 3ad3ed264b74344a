//! Schema entry definitions
//!
//! Every configuration key a plugin knows about is declared as an entry:
//! a persistence strategy plus the default value used when the entry is
//! first persisted.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Well-known entry keys present in every store.
pub mod keys {
    /// Loose entry seeded at construction with the plugin slug.
    pub const PLUGIN_NAME: &str = "pluginName";
    /// Loose entry seeded at construction with the plugin version.
    pub const VERSION: &str = "version";
    /// Built-in host-option entry tracking whether the plugin is active.
    pub const ACTIVATED: &str = "activated";
}

/// Where an entry's value is durably stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Persistence {
    /// Held in memory only; gone when the store goes away.
    #[default]
    Memory,
    /// Stored as a named host option under the plugin's prefix.
    HostOption,
}

impl fmt::Display for Persistence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Persistence::Memory => write!(f, "memory"),
            Persistence::HostOption => write!(f, "host-option"),
        }
    }
}

/// Schema record for one configuration key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryDef {
    pub persistence: Persistence,
    pub default: Value,
}

impl EntryDef {
    /// Entry persisted as a host option.
    pub fn host_option<V: Into<Value>>(default: V) -> Self {
        Self {
            persistence: Persistence::HostOption,
            default: default.into(),
        }
    }

    /// Entry held in memory only.
    pub fn memory<V: Into<Value>>(default: V) -> Self {
        Self {
            persistence: Persistence::Memory,
            default: default.into(),
        }
    }
}
