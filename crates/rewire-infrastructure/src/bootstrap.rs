//! Bootstrap - Composition root for the rewiring manager
//!
//! ```text
//! AppConfig ─┬─ preferences → build_preference_store() ─┐
//!            └─ manager.flush_on_modify ────────────────┼→ RewiringManager
//! BeanLookup (host container) ──────────────────────────┘
//! ```
//!
//! With `preferences.watch` set, [`ManagerBuilder::build_watched`] also starts
//! a [`PreferenceWatcher`] on the store file.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let config = ConfigLoader::new().load()?;
//! let registry = Arc::new(BeanRegistry::new());
//! let manager = build_manager(&config, registry.clone())?;
//! let resolver = RewiringResolver::new(registry, manager);
//! ```

use crate::config::{AppConfig, PreferencesBackend};
use crate::preferences::{FilePreferenceStore, PreferenceWatcher, build_preference_store, watch};
use rewire_application::{BasicProxyFactory, ProxyFactory, RewiringManager};
use rewire_domain::error::{Error, Result};
use rewire_domain::{BeanLookup, PreferenceStore};
use std::sync::Arc;
use tracing::info;

/// Builder for a configured [`RewiringManager`]
pub struct ManagerBuilder {
    config: AppConfig,
    lookup: Option<Arc<dyn BeanLookup>>,
    preferences: Option<Arc<dyn PreferenceStore>>,
    factory: Option<Arc<dyn ProxyFactory>>,
}

impl ManagerBuilder {
    /// Start from `config`
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            lookup: None,
            preferences: None,
            factory: None,
        }
    }

    /// Bean lookup of the host container (required)
    pub fn with_lookup(mut self, lookup: Arc<dyn BeanLookup>) -> Self {
        self.lookup = Some(lookup);
        self
    }

    /// Use `store` instead of the configured backend
    pub fn with_preferences(mut self, store: Arc<dyn PreferenceStore>) -> Self {
        self.preferences = Some(store);
        self
    }

    /// Use `factory` instead of [`BasicProxyFactory`]
    pub fn with_factory(mut self, factory: Arc<dyn ProxyFactory>) -> Self {
        self.factory = Some(factory);
        self
    }

    /// Assemble the manager
    pub fn build(self) -> Result<RewiringManager> {
        let lookup = self
            .lookup
            .ok_or_else(|| Error::configuration("A bean lookup is required to build the manager"))?;
        let factory = self
            .factory
            .unwrap_or_else(|| Arc::new(BasicProxyFactory::new()));
        let preferences = match self.preferences {
            Some(store) => Some(store),
            None => build_preference_store(&self.config.preferences)?,
        };

        let mut manager = RewiringManager::new(factory, lookup)
            .with_flush_on_modify(self.config.manager.flush_on_modify);
        if let Some(store) = preferences {
            manager = manager.with_preferences(store);
        }

        info!(
            persisted = manager.has_preferences(),
            flush_on_modify = self.config.manager.flush_on_modify,
            "Rewiring manager initialized"
        );
        Ok(manager)
    }

    /// Assemble a shared manager and start watching the store file when
    /// `preferences.watch` is set
    ///
    /// No watcher is started when a store was supplied through
    /// [`with_preferences`](Self::with_preferences).
    pub fn build_watched(mut self) -> Result<(Arc<RewiringManager>, Option<PreferenceWatcher>)> {
        let prefs = &self.config.preferences;
        let watched = if self.preferences.is_none()
            && prefs.watch
            && prefs.backend == PreferencesBackend::File
        {
            let path = prefs.path.as_ref().ok_or_else(|| {
                Error::configuration("The file preference store needs a path")
            })?;
            let store = FilePreferenceStore::open(path)?;
            self.preferences = Some(Arc::new(store.clone()));
            Some(store)
        } else {
            None
        };

        let manager = Arc::new(self.build()?);
        let watcher = watched
            .map(|store| watch(store, Arc::clone(&manager)))
            .transpose()?;
        Ok((manager, watcher))
    }
}

/// Build a shared manager from configuration and the container's bean lookup
pub fn build_manager(config: &AppConfig, lookup: Arc<dyn BeanLookup>) -> Result<Arc<RewiringManager>> {
    ManagerBuilder::new(config.clone())
        .with_lookup(lookup)
        .build()
        .map(Arc::new)
}
