//! Interception Adapter
//!
//! Wraps the container's dependency resolution path. Every resolution goes
//! through the wrapped resolver first; descriptors carrying the
//! [`Rewireable`](rewire_domain::Rewireable) marker are then redirected to the
//! [`RewiringManager`], everything else passes through untouched.

use crate::manager::RewiringManager;
use crate::proxy::ManageableProxy;
use rewire_domain::error::{Error, Result};
use rewire_domain::{DependencyDescriptor, DependencyResolver, ResolvedTarget};
use std::sync::Arc;
use tracing::debug;

/// Value injected into an injection point
#[derive(Debug, Clone)]
pub enum Injection {
    /// The container's own resolution, for unmarked dependencies
    Direct(ResolvedTarget),
    /// A manageable proxy, for rewireable dependencies
    Proxied(Arc<ManageableProxy>),
}

impl Injection {
    /// The proxy, when the dependency was rewireable
    pub fn proxy(&self) -> Option<&Arc<ManageableProxy>> {
        match self {
            Self::Proxied(proxy) => Some(proxy),
            Self::Direct(_) => None,
        }
    }

    /// Consume into the proxy, when the dependency was rewireable
    pub fn into_proxy(self) -> Option<Arc<ManageableProxy>> {
        match self {
            Self::Proxied(proxy) => Some(proxy),
            Self::Direct(_) => None,
        }
    }
}

/// Dependency resolver that hands out manageable proxies for marked dependencies
pub struct RewiringResolver<R> {
    inner: R,
    manager: Arc<RewiringManager>,
}

impl<R: DependencyResolver> RewiringResolver<R> {
    /// Wrap `inner`, redirecting marked dependencies to `manager`
    pub fn new(inner: R, manager: Arc<RewiringManager>) -> Self {
        Self { inner, manager }
    }

    /// Manager receiving the marked dependencies
    pub fn manager(&self) -> &Arc<RewiringManager> {
        &self.manager
    }

    /// Resolve an injection point of bean `bean_name`
    pub fn resolve(&self, descriptor: &DependencyDescriptor, bean_name: &str) -> Result<Injection> {
        let resolved = self.inner.resolve_dependency(descriptor, bean_name)?;

        let Some(marker) = descriptor.marker() else {
            return Ok(Injection::Direct(resolved.target));
        };

        if marker.required && resolved.target.is_empty() {
            return Err(Error::not_found(format!(
                "required rewireable dependency {} of {bean_name} has no candidate bean",
                descriptor.declared_type()
            )));
        }

        debug!(
            bean = bean_name,
            declared = %descriptor.declared_type(),
            candidates = resolved.candidate_names.len(),
            "Redirecting rewireable dependency to manager"
        );
        let proxy = self.manager.resolve(
            descriptor,
            bean_name,
            &resolved.candidate_names,
            resolved.target,
        )?;
        Ok(Injection::Proxied(proxy))
    }
}

impl<R: DependencyResolver> std::fmt::Debug for RewiringResolver<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RewiringResolver")
            .field("manager", &self.manager)
            .finish_non_exhaustive()
    }
}
