//! # Infrastructure Layer
//!
//! Technical concerns around the rewiring core: configuration, logging,
//! persistence backends for wiring preferences and a ready-made bean registry.
//!
//! ### Configuration & Bootstrap
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-based configuration (defaults, TOML, env) |
//! | [`bootstrap`] | Composition root assembling a `RewiringManager` |
//! | [`constants`] | Infrastructure constants |
//!
//! ### Persistence
//! | Module | Description |
//! |--------|-------------|
//! | [`preferences`] | In-memory and JSON-file preference stores, file watcher |
//!
//! ### Container
//! | Module | Description |
//! |--------|-------------|
//! | [`registry`] | Ordered bean registry implementing lookup and resolution |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;
pub mod preferences;
pub mod registry;

pub use bootstrap::{ManagerBuilder, build_manager};
pub use config::{AppConfig, ConfigLoader};
pub use error_ext::ErrorContext;
pub use preferences::{
    FilePreferenceStore, InMemoryPreferenceStore, PreferenceWatcher, build_preference_store,
};
pub use registry::BeanRegistry;
