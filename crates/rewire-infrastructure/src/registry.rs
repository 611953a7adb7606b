//! Bean Registry
//!
//! A minimal container: beans registered by name, in order, behind a lock.
//! Implements both container-side ports, so it can back the manager's lookups
//! and sit underneath a `RewiringResolver`.
//!
//! Resolution picks beans whose [`BeanType`] equals the declared element type:
//!
//! | Declared shape | Resolved target |
//! |----------------|-----------------|
//! | single | first registered bean of the type |
//! | map | every bean of the type, by name |
//! | list, set, collection, array | every bean of the type, in order |

use indexmap::IndexMap;
use rewire_domain::error::{Error, Result};
use rewire_domain::{
    Bean, BeanLookup, BeanType, DependencyDescriptor, DependencyResolver, DependencyShape,
    ResolvedDependency, ResolvedTarget,
};
use std::sync::{PoisonError, RwLock};
use tracing::debug;

/// Ordered, thread-safe bean registry
#[derive(Debug, Default)]
pub struct BeanRegistry {
    beans: RwLock<IndexMap<String, Bean>>,
}

impl BeanRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bean` under `name`
    ///
    /// Names are unique; registering a name twice is rejected.
    pub fn register(&self, name: impl Into<String>, bean: Bean) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::invalid_argument("bean name must not be empty"));
        }

        let mut beans = self.beans.write().unwrap_or_else(PoisonError::into_inner);
        if beans.contains_key(&name) {
            return Err(Error::invalid_argument(format!(
                "a bean named '{name}' is already registered"
            )));
        }
        debug!(bean = %name, bean_type = %bean.bean_type(), "Bean registered");
        beans.insert(name, bean);
        Ok(())
    }

    /// Builder-style [`register`](Self::register)
    pub fn with_bean(self, name: impl Into<String>, bean: Bean) -> Result<Self> {
        self.register(name, bean)?;
        Ok(self)
    }

    /// Registered names, in registration order
    pub fn names(&self) -> Vec<String> {
        self.beans
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Number of registered beans
    pub fn len(&self) -> usize {
        self.beans
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BeanLookup for BeanRegistry {
    fn get_bean(&self, name: &str) -> Option<Bean> {
        self.beans
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    fn beans_of_type(&self, bean_type: &BeanType) -> IndexMap<String, Bean> {
        self.beans
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(_, bean)| bean.bean_type() == *bean_type)
            .map(|(name, bean)| (name.clone(), bean.clone()))
            .collect()
    }
}

impl DependencyResolver for BeanRegistry {
    fn resolve_dependency(
        &self,
        descriptor: &DependencyDescriptor,
        bean_name: &str,
    ) -> Result<ResolvedDependency> {
        let declared = descriptor.declared_type();
        let beans = self.beans_of_type(&declared.element());

        let resolved = match declared.shape() {
            DependencyShape::Single => match beans.into_iter().next() {
                Some((name, bean)) => ResolvedDependency {
                    candidate_names: vec![name],
                    target: ResolvedTarget::Single(bean),
                },
                None => ResolvedDependency::default(),
            },
            DependencyShape::Map => ResolvedDependency {
                candidate_names: beans.keys().cloned().collect(),
                target: ResolvedTarget::Named(beans),
            },
            _ => {
                let (names, beans): (Vec<String>, Vec<Bean>) = beans.into_iter().unzip();
                ResolvedDependency {
                    candidate_names: names,
                    target: ResolvedTarget::Sequence(beans),
                }
            }
        };

        debug!(
            bean = bean_name,
            declared = %declared,
            candidates = ?resolved.candidate_names,
            "Dependency resolved"
        );
        Ok(resolved)
    }
}
