//! Configuration
//!
//! Layered application configuration: built-in defaults, then a TOML file,
//! then `REWIRE__*` environment variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, LoggingConfig, ManagerConfig, PreferencesBackend, PreferencesConfig};
