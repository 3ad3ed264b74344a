//! CLI commands and argument parsing
//!
//! `pcf` is a stand-in host: it opens a JSON option store, drives one
//! plugin's configuration through it, and doubles as an inspector for
//! the persisted options.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use serde_json::Value;
use tabled::{settings::Style, Table, Tabled};

use crate::config::{ConfigStore, Persistence};
use crate::host::JsonFileStore;
use crate::lifecycle;
use crate::utils::helpers::is_valid_plugin_slug;

#[derive(Parser)]
#[command(name = "pcf")]
#[command(about = "Inspect and drive plugin configuration in a host option store")]
#[command(version, author)]
pub struct Cli {
    /// Plugin slug (kebab-case)
    #[arg(long, global = true, default_value = "sample-plugin")]
    pub plugin: String,

    /// Plugin version string
    #[arg(long, global = true, default_value = "0.1.0")]
    pub plugin_version: String,

    /// Path of the JSON option store shared by all plugins of this host
    #[arg(long, global = true, env = "PLUGCONF_STORE")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show every schema entry with its persistence and resolved value (alias: ls)
    #[command(alias = "ls")]
    Show {
        /// Emit the resolved values as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Get the value of an entry
    Get {
        /// Entry key
        key: String,
        /// Print the raw JSON value
        #[arg(long)]
        json: bool,
    },
    /// Set the value of an entry and flush it
    Set {
        /// Entry key
        key: String,
        /// Value; parsed as JSON first, then taken as a plain string
        value: String,
        /// Declare the key as a loose (memory-only) entry if unknown
        #[arg(long)]
        loose: bool,
    },
    /// Run the activation hook: persist schema defaults and raise the activated flag
    Activate,
    /// Run the deactivation hook: lower the activated flag
    Deactivate,
    /// Run the uninstall hook: delete every persisted entry of the plugin
    Uninstall,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Table row for the show command
#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Persistence")]
    persistence: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        let Cli {
            plugin,
            plugin_version,
            store,
            command,
        } = self;

        if let Commands::Completions { shell } = command {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
            return Ok(());
        }

        if !is_valid_plugin_slug(&plugin) {
            anyhow::bail!("'{plugin}' is not a valid plugin slug (lowercase kebab-case)");
        }

        let store_path = match store {
            Some(path) => path,
            None => default_store_path()?,
        };
        let store = JsonFileStore::open(&store_path)
            .with_context(|| format!("Failed to open option store at {}", store_path.display()))?;
        let mut config = ConfigStore::new(&plugin, &plugin_version, store);

        match command {
            Commands::Show { json } => execute_show(&mut config, json),
            Commands::Get { key, json } => execute_get(&mut config, &key, json),
            Commands::Set { key, value, loose } => execute_set(&mut config, &key, &value, loose),
            Commands::Activate => execute_activate(&mut config, &plugin),
            Commands::Deactivate => execute_deactivate(&mut config, &plugin),
            Commands::Uninstall => execute_uninstall(&mut config, &plugin),
            Commands::Completions { .. } => Ok(()),
        }
    }
}

fn execute_show(config: &mut ConfigStore<JsonFileStore>, json: bool) -> Result<()> {
    let entry_keys: Vec<String> = config.keys(false).iter().map(|k| k.to_string()).collect();

    let mut rows = Vec::new();
    for key in &entry_keys {
        let def = match config.entry_def(key) {
            Some(def) => def.clone(),
            None => continue,
        };
        let persisted = config
            .store()
            .get(&format!("{}{}", config.prefix(), key))
            .is_some();
        let source = match def.persistence {
            Persistence::HostOption if persisted => "store",
            Persistence::HostOption => "default",
            Persistence::Memory => "memory",
        };
        let value = config.get(key)?.clone();

        rows.push(EntryRow {
            key: key.clone(),
            persistence: def.persistence.to_string(),
            source: source.to_string(),
            value: format_value(&value),
        });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(config.all(true)?)?);
    } else {
        let mut table = Table::new(&rows);
        table.with(Style::rounded());
        println!("{table}");
    }
    Ok(())
}

fn execute_get(config: &mut ConfigStore<JsonFileStore>, key: &str, json: bool) -> Result<()> {
    let value = config.get(key)?.clone();
    if json {
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", format_value(&value));
    }
    Ok(())
}

fn execute_set(
    config: &mut ConfigStore<JsonFileStore>,
    key: &str,
    raw: &str,
    loose: bool,
) -> Result<()> {
    let value = parse_value(raw);
    if loose {
        if config.has(key) {
            anyhow::bail!("Key '{key}' is already declared; set it without --loose");
        }
        config.declare_and_set(key, value);
    } else {
        config.set(key, value).with_context(|| {
            format!("Cannot set unknown key '{key}' (use --loose for a memory-only entry)")
        })?;
    }
    config.flush().context("Failed to flush the option store")?;

    if loose {
        println!("Set [{key}] (memory-only; gone when this process exits)");
    } else {
        println!("Set [{key}]");
    }
    Ok(())
}

fn execute_activate(config: &mut ConfigStore<JsonFileStore>, plugin: &str) -> Result<()> {
    lifecycle::on_activate(config)?;
    config.flush()?;
    println!("Activated [{plugin}]");
    Ok(())
}

fn execute_deactivate(config: &mut ConfigStore<JsonFileStore>, plugin: &str) -> Result<()> {
    lifecycle::on_deactivate(config)?;
    config.flush()?;
    println!("Deactivated [{plugin}]");
    Ok(())
}

fn execute_uninstall(config: &mut ConfigStore<JsonFileStore>, plugin: &str) -> Result<()> {
    lifecycle::on_uninstall(config)?;
    println!("Uninstalled [{plugin}]; persisted options removed");
    Ok(())
}

/// Parse a CLI value argument as JSON first, falling back to a plain
/// string.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Render a value for terminal output; bare strings lose their quotes.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Default option store path under the user configuration directory,
/// shared by every plugin of this host.
fn default_store_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Unable to determine config directory")?;
    Ok(config_dir.join("plugconf").join("options.json"))
}
