//! Manageable Proxies - Runtime-rewireable dependency wrappers
//!
//! A [`ManageableProxy`] is what the container injects in place of a
//! rewireable dependency. It owns an ordered `name → bean` backing mapping and
//! a presented view built from it, both published together as one immutable
//! [`WiringSnapshot`].
//!
//! ## Pattern
//!
//! ```text
//! Manager.modify_dependency() → build mapping → ProxyKind::present() → ArcSwap::store()
//!                                                                        ↓
//!                                       readers: ManageableProxy::snapshot() (never blocks)
//! ```
//!
//! The replacement snapshot is fully built before it is stored, so a reader
//! sees either the complete old wiring or the complete new one.

pub mod factory;

pub use factory::{BasicProxyFactory, ProxyFactory};

use arc_swap::ArcSwap;
use indexmap::IndexMap;
use rewire_domain::{Bean, DeclaredType, Identifier, Wiring};
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Presented Values
// ============================================================================

/// Read-only view handed to the consumer of an injection point
#[derive(Debug, Clone)]
pub enum PresentedValue {
    /// First bean of the backing mapping, `None` when nothing is wired
    Single(Option<Bean>),
    /// Beans in wiring order
    List(Vec<Bean>),
    /// Distinct beans in wiring order
    Set(Vec<Bean>),
    /// Beans in wiring order, no ordering promise to the consumer
    Collection(Vec<Bean>),
    /// Bean name to bean, in wiring order
    Map(IndexMap<String, Bean>),
}

impl PresentedValue {
    /// Beans of the view, in iteration order
    pub fn beans(&self) -> Vec<Bean> {
        match self {
            Self::Single(bean) => bean.iter().cloned().collect(),
            Self::List(beans) | Self::Set(beans) | Self::Collection(beans) => beans.clone(),
            Self::Map(beans) => beans.values().cloned().collect(),
        }
    }

    /// Number of beans in the view
    pub fn len(&self) -> usize {
        match self {
            Self::Single(bean) => usize::from(bean.is_some()),
            Self::List(beans) | Self::Set(beans) | Self::Collection(beans) => beans.len(),
            Self::Map(beans) => beans.len(),
        }
    }

    /// Whether the view is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// Proxy Kinds
// ============================================================================

/// Backing-store variant, chosen once from the declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyKind {
    /// Single dependency
    Single,
    /// Read-only list
    List,
    /// Read-only ordered set
    Set,
    /// Read-only generic collection
    Collection,
    /// Read-only map
    Map,
}

impl ProxyKind {
    /// Build the presented view of `backing`
    pub fn present(self, backing: &IndexMap<String, Bean>) -> PresentedValue {
        match self {
            Self::Single => PresentedValue::Single(backing.values().next().cloned()),
            Self::List => PresentedValue::List(backing.values().cloned().collect()),
            Self::Set => {
                let mut distinct: Vec<Bean> = Vec::with_capacity(backing.len());
                for bean in backing.values() {
                    if !distinct.iter().any(|seen| seen.ptr_eq(bean)) {
                        distinct.push(bean.clone());
                    }
                }
                PresentedValue::Set(distinct)
            }
            Self::Collection => PresentedValue::Collection(backing.values().cloned().collect()),
            Self::Map => PresentedValue::Map(backing.clone()),
        }
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// One complete, immutable wiring state of a proxy
#[derive(Debug)]
pub struct WiringSnapshot {
    backing: IndexMap<String, Bean>,
    presented: PresentedValue,
}

impl WiringSnapshot {
    fn build(kind: ProxyKind, backing: IndexMap<String, Bean>) -> Self {
        let presented = kind.present(&backing);
        Self { backing, presented }
    }

    /// Backing mapping, in wiring order
    pub fn backing(&self) -> &IndexMap<String, Bean> {
        &self.backing
    }

    /// Presented view
    pub fn presented(&self) -> &PresentedValue {
        &self.presented
    }

    /// Wired bean names
    pub fn names(&self) -> Wiring {
        Wiring::new(self.backing.keys().cloned())
    }
}

// ============================================================================
// Manageable Proxy
// ============================================================================

/// Live, rewireable stand-in for one injection point
pub struct ManageableProxy {
    identifier: Identifier,
    declared: DeclaredType,
    kind: ProxyKind,
    current: ArcSwap<WiringSnapshot>,
}

impl ManageableProxy {
    /// Create a proxy over an initial backing mapping
    pub fn new(
        identifier: Identifier,
        declared: DeclaredType,
        kind: ProxyKind,
        backing: IndexMap<String, Bean>,
    ) -> Self {
        Self {
            identifier,
            declared,
            kind,
            current: ArcSwap::from_pointee(WiringSnapshot::build(kind, backing)),
        }
    }

    /// Identifier of the owning injection point
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Declared type the proxy stands in for
    pub fn declared_type(&self) -> &DeclaredType {
        &self.declared
    }

    /// Backing-store variant
    pub fn kind(&self) -> ProxyKind {
        self.kind
    }

    /// Replace the backing mapping wholesale
    pub fn modify_contents(&self, contents: IndexMap<String, Bean>) {
        self.current
            .store(Arc::new(WiringSnapshot::build(self.kind, contents)));
    }

    /// Names of the current backing mapping, in wiring order
    pub fn current_names(&self) -> Wiring {
        self.current.load().names()
    }

    /// Current complete wiring state
    pub fn snapshot(&self) -> Arc<WiringSnapshot> {
        self.current.load_full()
    }

    /// Current presented view
    pub fn presented(&self) -> PresentedValue {
        self.current.load().presented.clone()
    }

    /// Presented single bean, typed
    ///
    /// For collection proxies this is the first wired bean.
    pub fn get<T: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.current
            .load()
            .backing
            .values()
            .next()
            .and_then(Bean::get::<T>)
    }

    /// Presented beans, typed, in iteration order
    ///
    /// Beans that are not registered as `T` are skipped.
    pub fn get_all<T: ?Sized + Send + Sync + 'static>(&self) -> Vec<Arc<T>> {
        self.current
            .load()
            .presented
            .beans()
            .iter()
            .filter_map(Bean::get::<T>)
            .collect()
    }
}

impl fmt::Debug for ManageableProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManageableProxy")
            .field("identifier", &self.identifier)
            .field("declared", &self.declared)
            .field("kind", &self.kind)
            .field("wiring", &self.current_names())
            .finish()
    }
}
