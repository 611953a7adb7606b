//! Operator CLI
//!
//! Reads and writes persisted wirings in a JSON preference file, so choices
//! can be inspected or seeded before the application starts.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `rewire show <path>` | Print the wiring persisted for one injection point |
//! | `rewire set <path> <names>...` | Persist a wiring for one injection point |
//! | `rewire list` | Print every persisted wiring |
//!
//! `<path>` is an identifier path such as `app/Consumer/__field__/deps`.

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use rewire_domain::constants::WIRED_BEANS_KEY;
use rewire_domain::{Identifier, PreferenceStore, Wiring};
use rewire_infrastructure::config::{AppConfig, ConfigLoader, PreferencesBackend};
use rewire_infrastructure::constants::DEFAULT_PREFERENCES_FILENAME;
use rewire_infrastructure::logging::init_logging;
use rewire_infrastructure::preferences::FilePreferenceStore;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Command line interface for rewire
#[derive(Parser, Debug)]
#[command(name = "rewire")]
#[command(about = "Inspect and seed persisted dependency wiring")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Preference file, overriding the configured one
    #[arg(short, long)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Operator commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the wiring persisted for an injection point
    Show {
        /// Identifier path, e.g. `app/Consumer/__field__/deps`
        path: String,
    },
    /// Persist a wiring for an injection point
    Set {
        /// Identifier path, e.g. `app/Consumer/__field__/deps`
        path: String,
        /// Bean names in wiring order (comma-separated lists are accepted)
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Print every persisted wiring
    List,
}

/// Parse arguments, load configuration and run the command against stdout
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    init_logging(&config.logging)?;

    let store = open_store(&cli, &config)?;
    let stdout = std::io::stdout();
    execute(&cli.command, &store, &mut stdout.lock())
}

/// Load configuration from `--config`, or the default locations
pub fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let loader = match &cli.config {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    Ok(loader.load()?)
}

/// Preference file to operate on
///
/// `--store` wins, then the configured file backend, then
/// `wiring.json` in the working directory.
pub fn store_path(cli: &Cli, config: &AppConfig) -> PathBuf {
    if let Some(path) = &cli.store {
        return path.clone();
    }
    match (&config.preferences.backend, &config.preferences.path) {
        (PreferencesBackend::File, Some(path)) => path.clone(),
        _ => PathBuf::from(DEFAULT_PREFERENCES_FILENAME),
    }
}

/// Open the preference file selected by [`store_path`]
pub fn open_store(cli: &Cli, config: &AppConfig) -> anyhow::Result<FilePreferenceStore> {
    let path = store_path(cli, config);
    FilePreferenceStore::open(&path)
        .with_context(|| format!("cannot open preference file {}", path.display()))
}

/// Run one command against `store`, writing results to `out`
pub fn execute(
    command: &Command,
    store: &FilePreferenceStore,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match command {
        Command::Show { path } => {
            let identifier = Identifier::from_path_string(path)?;
            match store.node(identifier.path()).get(WIRED_BEANS_KEY) {
                Some(value) => writeln!(out, "{} = {}", identifier.path(), value)?,
                None => writeln!(out, "{} is not wired", identifier.path())?,
            }
        }
        Command::Set { path, names } => {
            let identifier = Identifier::from_path_string(path)?;
            let wiring = Wiring::parse(&names.join(","));
            if wiring.is_empty() {
                bail!("no bean names given for {}", identifier.path());
            }

            let node = store.node(identifier.path());
            node.put(WIRED_BEANS_KEY, &wiring.to_preference_value());
            node.flush()?;
            info!(identifier = %identifier, wiring = %wiring, "Wiring persisted");
            writeln!(out, "{} = {}", identifier.path(), wiring.to_preference_value())?;
        }
        Command::List => {
            for node_path in store.node_paths() {
                if let Some(value) = store.node(&node_path).get(WIRED_BEANS_KEY) {
                    writeln!(out, "{node_path} = {value}")?;
                }
            }
        }
    }
    Ok(())
}
