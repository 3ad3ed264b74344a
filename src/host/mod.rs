//! Host option facility
//!
//! The trait a host implements to give plugins named-option persistence,
//! plus the stores bundled with this crate.

#[cfg(feature = "file-store")]
pub mod file;
pub mod memory;
pub mod options;

#[cfg(feature = "file-store")]
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use options::{OptionStore, StoredOption};

#[cfg(test)]
pub use options::MockOptionStore;
