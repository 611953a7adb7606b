//! Proxy Factory
//!
//! Builds a [`ManageableProxy`] that structurally matches the declared
//! dependency type. No I/O and no persistence access happen here.
//!
//! | Declared shape | Proxy kind | Initial backing mapping |
//! |----------------|------------|-------------------------|
//! | `Map` | `Map` | copy of the resolved map |
//! | `List` | `List` | beans keyed by display string |
//! | `Set` | `Set` | beans keyed by display string |
//! | `Collection` | `Collection` | beans keyed by display string |
//! | other collection | - | unsupported specialization error |
//! | `Array` | - | unsupported shape error |
//! | single | `Single` | the one resolved bean |
//!
//! Keying unnamed beans by display string is lossy: two beans with the same
//! display string collapse into one entry.

use super::{ManageableProxy, ProxyKind};
use indexmap::IndexMap;
use rewire_domain::error::{Error, Result};
use rewire_domain::{Bean, DeclaredType, DependencyShape, Identifier, ResolvedTarget};

/// Interface for proxy construction
pub trait ProxyFactory: Send + Sync {
    /// Wrap `target` in a proxy standing in for `declared`
    fn proxy(
        &self,
        declared: &DeclaredType,
        identifier: Identifier,
        target: ResolvedTarget,
    ) -> Result<ManageableProxy>;
}

/// Default proxy factory
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicProxyFactory;

impl BasicProxyFactory {
    /// Create a new factory
    pub fn new() -> Self {
        Self
    }

    /// Pick the backing-store variant for a declared shape
    pub fn kind_for(declared: &DeclaredType) -> Result<ProxyKind> {
        match declared.shape() {
            DependencyShape::Map => Ok(ProxyKind::Map),
            DependencyShape::List => Ok(ProxyKind::List),
            DependencyShape::Set => Ok(ProxyKind::Set),
            DependencyShape::Collection => Ok(ProxyKind::Collection),
            DependencyShape::SpecializedCollection(name) => Err(Error::unsupported_shape(format!(
                "only list and set specializations of a collection can be rewired, got {name}"
            ))),
            DependencyShape::Array => Err(Error::unsupported_shape(format!(
                "{declared} is an array and cannot be proxied"
            ))),
            DependencyShape::Single => Ok(ProxyKind::Single),
        }
    }

    fn initial_backing(kind: ProxyKind, target: ResolvedTarget) -> IndexMap<String, Bean> {
        let backing = match target {
            ResolvedTarget::Empty => IndexMap::new(),
            ResolvedTarget::Single(bean) => keyed_by_display(std::iter::once(bean)),
            ResolvedTarget::Sequence(beans) => keyed_by_display(beans),
            ResolvedTarget::Named(beans) => beans,
        };

        match kind {
            // A single dependency keeps only the entry it presents
            ProxyKind::Single => backing.into_iter().take(1).collect(),
            _ => backing,
        }
    }
}

impl ProxyFactory for BasicProxyFactory {
    fn proxy(
        &self,
        declared: &DeclaredType,
        identifier: Identifier,
        target: ResolvedTarget,
    ) -> Result<ManageableProxy> {
        let kind = Self::kind_for(declared)?;
        let backing = Self::initial_backing(kind, target);

        Ok(ManageableProxy::new(
            identifier,
            declared.clone(),
            kind,
            backing,
        ))
    }
}

fn keyed_by_display(beans: impl IntoIterator<Item = Bean>) -> IndexMap<String, Bean> {
    beans
        .into_iter()
        .map(|bean| (bean.display().to_string(), bean))
        .collect()
}
