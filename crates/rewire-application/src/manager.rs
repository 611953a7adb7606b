//! Rewiring Manager - Registry of live manageable proxies
//!
//! Tracks every proxy it hands out, by identifier and by element type, and
//! lets operators swap the beans behind them at runtime.
//!
//! ## Pattern
//!
//! ```text
//! Container → RewiringResolver → Manager.resolve() → ProxyFactory.proxy()
//!                                        ↓                     ↓
//!                              preference store        by-id / by-type index
//!                                        ↑
//! Operator → Manager.modify_dependency() → BeanLookup → Proxy.modify_contents()
//! ```

use crate::proxy::{ManageableProxy, ProxyFactory};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use indexmap::IndexMap;
use rewire_domain::constants::WIRED_BEANS_KEY;
use rewire_domain::error::{Error, Result};
use rewire_domain::{
    Bean, BeanLookup, BeanType, DependencyDescriptor, Identifier, PreferenceStore,
    ResolvedTarget, Wiring,
};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

// ============================================================================
// Admin Interface
// ============================================================================

/// Interface for operator-side wiring administration
///
/// # Example
///
/// ```ignore
/// // Inspect what is wired today
/// let current = admin.current_wiring(&identifier);
/// println!("{identifier}: {current}");
///
/// // Swap the implementations
/// admin.modify_dependency(&identifier, &Wiring::new(["testC", "testA"]))?;
/// ```
pub trait RewiringAdminInterface: Send + Sync {
    /// Rewire one injection point
    fn modify_dependency(&self, identifier: &Identifier, wiring: &Wiring) -> Result<()>;

    /// Rewire every injection point whose element type is `bean_type`
    fn modify_all_of_type(&self, bean_type: &BeanType, wiring: &Wiring) -> Result<()>;

    /// Names currently wired into `identifier`, empty when unknown
    fn current_wiring(&self, identifier: &Identifier) -> Wiring;

    /// Names of all beans of `bean_type` known to the container
    fn all_known_beans(&self, bean_type: Option<&BeanType>) -> Vec<String>;

    /// Identifiers of every registered injection point
    fn registered_identifiers(&self) -> Vec<Identifier>;
}

// ============================================================================
// Manager
// ============================================================================

/// Central registry of rewireable dependencies
pub struct RewiringManager {
    factory: Arc<dyn ProxyFactory>,
    lookup: RwLock<Option<Arc<dyn BeanLookup>>>,
    preferences: RwLock<Option<Arc<dyn PreferenceStore>>>,
    flush_on_modify: bool,
    by_id: DashMap<Identifier, Arc<ManageableProxy>>,
    by_type: DashMap<BeanType, Vec<Arc<ManageableProxy>>>,
}

impl RewiringManager {
    /// Create a manager without persistence
    pub fn new(factory: Arc<dyn ProxyFactory>, lookup: Arc<dyn BeanLookup>) -> Self {
        Self {
            factory,
            lookup: RwLock::new(Some(lookup)),
            preferences: RwLock::new(None),
            flush_on_modify: true,
            by_id: DashMap::new(),
            by_type: DashMap::new(),
        }
    }

    /// Persist and reload wiring through `store`
    pub fn with_preferences(self, store: Arc<dyn PreferenceStore>) -> Self {
        *self
            .preferences
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(store);
        self
    }

    /// Whether every rewiring is written back and flushed (default `true`)
    pub fn with_flush_on_modify(mut self, flush_on_modify: bool) -> Self {
        self.flush_on_modify = flush_on_modify;
        self
    }

    /// Whether a preference store is configured
    pub fn has_preferences(&self) -> bool {
        self.preference_store().is_some()
    }

    // ------------------------------------------------------------------------
    // Resolution
    // ------------------------------------------------------------------------

    /// Return the proxy for an injection point, creating it on first use
    ///
    /// `bean_name` names the owning type; together with the descriptor's member
    /// it forms the [`Identifier`]. A given injection point is proxied exactly
    /// once per manager: later calls return the registered proxy unchanged.
    ///
    /// On first use a persisted wiring, if any, is applied before the proxy is
    /// returned, overriding the container's default.
    pub fn resolve(
        &self,
        descriptor: &DependencyDescriptor,
        bean_name: &str,
        candidate_bean_names: &[String],
        target: ResolvedTarget,
    ) -> Result<Arc<ManageableProxy>> {
        let identifier = Identifier::for_member(bean_name, descriptor.member())?;

        if let Some(existing) = self.by_id.get(&identifier) {
            return Ok(Arc::clone(existing.value()));
        }

        let declared = descriptor.declared_type();
        let element_type = declared
            .element_type()
            .map_err(|e| Error::configuration_with_source(format!("cannot rewire {identifier}"), e))?;

        let target = target.named_by(candidate_bean_names);
        let proxy = self
            .factory
            .proxy(declared, identifier.clone(), target)
            .map_err(|e| Error::configuration_with_source(format!("cannot rewire {identifier}"), e))?;
        let proxy = Arc::new(proxy);

        let proxy = match self.by_id.entry(identifier.clone()) {
            Entry::Occupied(registered) => {
                debug!(identifier = %identifier, "Proxy registered concurrently, reusing it");
                return Ok(Arc::clone(registered.get()));
            }
            Entry::Vacant(slot) => {
                slot.insert(Arc::clone(&proxy));
                proxy
            }
        };
        self.by_type
            .entry(element_type)
            .or_default()
            .push(Arc::clone(&proxy));

        debug!(
            identifier = %identifier,
            declared = %declared,
            wiring = %proxy.current_names(),
            "Registered rewireable dependency"
        );

        if let Some(wiring) = self.read_wiring_preference(&identifier) {
            if !wiring.is_empty() {
                let contents = self.build_dependency_map(&wiring);
                proxy.modify_contents(contents);
                info!(
                    identifier = %identifier,
                    wiring = %wiring,
                    "Applied persisted wiring"
                );
            }
        }

        Ok(proxy)
    }

    /// Registered proxy for `identifier`
    pub fn proxy(&self, identifier: &Identifier) -> Option<Arc<ManageableProxy>> {
        self.by_id.get(identifier).map(|p| Arc::clone(p.value()))
    }

    // ------------------------------------------------------------------------
    // Modification
    // ------------------------------------------------------------------------

    /// Rewire one injection point
    ///
    /// Names the container does not know are dropped with a warning; the
    /// remaining ones are wired in order, even if that leaves nothing wired.
    pub fn modify_dependency(&self, identifier: &Identifier, wiring: &Wiring) -> Result<()> {
        let proxy = self.proxy(identifier).ok_or_else(|| {
            Error::not_found(format!("rewireable dependency {identifier}"))
        })?;

        let contents = self.build_dependency_map(wiring);
        self.apply(&proxy, contents);
        info!(identifier = %identifier, wiring = %wiring, "Rewireable dependency modified");
        Ok(())
    }

    /// Rewire every injection point whose element type is `bean_type`
    ///
    /// Each proxy is updated and persisted on its own; there is no rollback if
    /// a later one fails.
    pub fn modify_all_of_type(&self, bean_type: &BeanType, wiring: &Wiring) -> Result<()> {
        let same_type: Vec<Arc<ManageableProxy>> = self
            .by_type
            .get(bean_type)
            .map(|bucket| bucket.value().clone())
            .unwrap_or_default();

        if same_type.is_empty() {
            return Err(Error::not_found(format!(
                "rewireable dependencies of type {bean_type}"
            )));
        }

        let contents = self.build_dependency_map(wiring);
        for proxy in &same_type {
            self.apply(proxy, contents.clone());
        }
        info!(
            bean_type = %bean_type,
            count = same_type.len(),
            wiring = %wiring,
            "All rewireable dependencies of type modified"
        );
        Ok(())
    }

    /// Names currently wired into `identifier`, empty when unknown
    pub fn current_wiring(&self, identifier: &Identifier) -> Wiring {
        self.proxy(identifier)
            .map(|proxy| proxy.current_names())
            .unwrap_or_default()
    }

    /// Names of all beans of `bean_type` known to the container
    pub fn all_known_beans(&self, bean_type: Option<&BeanType>) -> Vec<String> {
        match (bean_type, self.bean_lookup()) {
            (Some(bean_type), Some(lookup)) => lookup.bean_names_for_type(bean_type),
            _ => Vec::new(),
        }
    }

    /// Identifiers of every registered injection point
    pub fn registered_identifiers(&self) -> Vec<Identifier> {
        self.by_id.iter().map(|entry| entry.key().clone()).collect()
    }

    // ------------------------------------------------------------------------
    // Preference notifications
    // ------------------------------------------------------------------------

    /// React to an out-of-band change of a persisted wiring value
    ///
    /// `property` is `<identifier path>/wiredBeans`. The wiring is applied to
    /// the matching proxy without being written back. Unknown identifiers are
    /// logged and ignored.
    pub fn preference_changed(&self, property: &str, value: &str) -> Result<()> {
        let suffix = format!("/{WIRED_BEANS_KEY}");
        let node_path = property.strip_suffix(&suffix).ok_or_else(|| {
            Error::configuration(format!(
                "preference change for '{property}' does not name a wiring"
            ))
        })?;
        let identifier = Identifier::from_path_string(node_path).map_err(|e| {
            Error::configuration_with_source(
                format!("preference change for '{property}' has no valid identifier"),
                e,
            )
        })?;

        match self.proxy(&identifier) {
            Some(proxy) => {
                let wiring = Wiring::parse(value);
                proxy.modify_contents(self.build_dependency_map(&wiring));
                info!(
                    identifier = %identifier,
                    wiring = %wiring,
                    "Preference change applied to rewireable dependency"
                );
            }
            None => warn!(
                identifier = %identifier,
                "No rewireable dependency registered for changed preference"
            ),
        }
        Ok(())
    }

    /// Re-read the persisted wiring of every registered injection point
    ///
    /// Returns how many proxies were rewired.
    pub fn reload_preferences(&self) -> usize {
        let mut reloaded = 0;
        for identifier in self.registered_identifiers() {
            let Some(wiring) = self.read_wiring_preference(&identifier) else {
                continue;
            };
            if wiring.is_empty() {
                continue;
            }
            if let Some(proxy) = self.proxy(&identifier) {
                proxy.modify_contents(self.build_dependency_map(&wiring));
                reloaded += 1;
            }
        }
        info!(reloaded, "Persisted wiring reloaded");
        reloaded
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Drop every registered proxy and the container and store references
    ///
    /// Must not race with resolution or modification on other threads.
    pub fn dispose(&self) {
        self.by_id.clear();
        self.by_type.clear();
        *self.lookup.write().unwrap_or_else(PoisonError::into_inner) = None;
        *self
            .preferences
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
        info!("Rewiring manager disposed");
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn bean_lookup(&self) -> Option<Arc<dyn BeanLookup>> {
        self.lookup
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn preference_store(&self) -> Option<Arc<dyn PreferenceStore>> {
        self.preferences
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Push `contents` into `proxy`, then persist the names that resolved
    fn apply(&self, proxy: &ManageableProxy, contents: IndexMap<String, Bean>) {
        let resolved = Wiring::new(contents.keys().cloned());
        proxy.modify_contents(contents);
        self.write_wiring_preference(proxy.identifier(), &resolved);
    }

    /// Resolve each name against the container, skipping unknown ones
    fn build_dependency_map(&self, wiring: &Wiring) -> IndexMap<String, Bean> {
        let mut contents = IndexMap::with_capacity(wiring.len());
        let Some(lookup) = self.bean_lookup() else {
            warn!(wiring = %wiring, "Manager disposed, nothing can be wired");
            return contents;
        };

        for name in wiring.iter() {
            match lookup.get_bean(name) {
                Some(bean) => {
                    contents.insert(name.to_string(), bean);
                }
                None => warn!(bean = name, "Cannot find bean, dropping it from the wiring"),
            }
        }
        contents
    }

    fn read_wiring_preference(&self, identifier: &Identifier) -> Option<Wiring> {
        let store = self.preference_store()?;
        store
            .node(identifier.path())
            .get(WIRED_BEANS_KEY)
            .map(|value| Wiring::parse(&value))
    }

    fn write_wiring_preference(&self, identifier: &Identifier, wiring: &Wiring) {
        if !self.flush_on_modify {
            return;
        }
        let Some(store) = self.preference_store() else {
            return;
        };

        let node = store.node(identifier.path());
        node.put(WIRED_BEANS_KEY, &wiring.to_preference_value());
        if let Err(e) = node.flush() {
            warn!(
                identifier = %identifier,
                error = %e,
                "Failed to flush wiring preference, change will not survive a restart"
            );
        }
    }
}

impl fmt::Debug for RewiringManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RewiringManager")
            .field("registered", &self.by_id.len())
            .field("types", &self.by_type.len())
            .field("flush_on_modify", &self.flush_on_modify)
            .field("has_preferences", &self.has_preferences())
            .finish()
    }
}

impl RewiringAdminInterface for RewiringManager {
    fn modify_dependency(&self, identifier: &Identifier, wiring: &Wiring) -> Result<()> {
        RewiringManager::modify_dependency(self, identifier, wiring)
    }

    fn modify_all_of_type(&self, bean_type: &BeanType, wiring: &Wiring) -> Result<()> {
        RewiringManager::modify_all_of_type(self, bean_type, wiring)
    }

    fn current_wiring(&self, identifier: &Identifier) -> Wiring {
        RewiringManager::current_wiring(self, identifier)
    }

    fn all_known_beans(&self, bean_type: Option<&BeanType>) -> Vec<String> {
        RewiringManager::all_known_beans(self, bean_type)
    }

    fn registered_identifiers(&self) -> Vec<Identifier> {
        RewiringManager::registered_identifiers(self)
    }
}
