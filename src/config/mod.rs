//! Plugin configuration management
//!
//! The schema of known entries and the store that mediates between
//! in-memory values and the host's option facility.

pub mod entry;
pub mod store;

pub use entry::*;
pub use store::*;
