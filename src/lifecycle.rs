//! Plugin lifecycle entry points
//!
//! The host invokes these at well-defined moments in a plugin's life.
//! They are the only places the built-in `activated` flag is toggled.
//! None of them flush; outstanding changes are written at the owner's
//! explicit [`ConfigStore::flush`] or when the store is dropped.

use tracing::info;

use crate::config::{keys, ConfigStore};
use crate::error::Result;
use crate::host::OptionStore;

/// Called when the host activates the plugin.
///
/// Creates the persisted representation of every schema entry, then
/// raises the `activated` flag.
pub fn on_activate<S: OptionStore>(config: &mut ConfigStore<S>) -> Result<()> {
    config.activate()?.set(keys::ACTIVATED, true)?;
    info!("Plugin activated");
    Ok(())
}

/// Called when the host deactivates the plugin.
///
/// Lowers the `activated` flag. The flag always holds a scalar boolean,
/// so activation state checks stay plain equality tests.
pub fn on_deactivate<S: OptionStore>(config: &mut ConfigStore<S>) -> Result<()> {
    config.set(keys::ACTIVATED, false)?;
    info!("Plugin deactivated");
    Ok(())
}

/// Called when the host uninstalls the plugin.
///
/// Removes every persisted entry from the host store.
pub fn on_uninstall<S: OptionStore>(config: &mut ConfigStore<S>) -> Result<()> {
    config.uninstall()?;
    info!("Plugin uninstalled");
    Ok(())
}
