//! plugconf - plugin configuration with host-backed persistence
//!
//! A library for plugins embedded in a host application. The host
//! provides a named-option persistence facility; a plugin owns a
//! [`ConfigStore`] that declares its configuration schema, loads entry
//! values lazily, tracks unflushed changes, and writes them back through
//! the host's facility under a per-plugin name prefix. Lifecycle entry
//! points cover activation, deactivation, and uninstall.

#[cfg(feature = "file-store")]
pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod lifecycle;
pub mod utils;

// Re-export commonly used types
pub use config::{keys, ConfigStore, EntryDef, Persistence};
pub use error::{PlugconfError, Result};
#[cfg(feature = "file-store")]
pub use host::JsonFileStore;
pub use host::{MemoryStore, OptionStore, StoredOption};
