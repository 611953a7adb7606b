//! Dependency Resolver Port
//!
//! The single call path by which the host container resolves an injection
//! point. The interception adapter wraps an implementation of this trait.

use crate::error::Result;
use crate::value_objects::{DependencyDescriptor, ResolvedTarget};

/// Outcome of a container resolution
#[derive(Debug, Clone, Default)]
pub struct ResolvedDependency {
    /// Names of the beans the container selected, in resolution order
    pub candidate_names: Vec<String>,
    /// The resolved value
    pub target: ResolvedTarget,
}

/// Container dependency resolution
pub trait DependencyResolver: Send + Sync {
    /// Resolve the injection point described by `descriptor` on bean `bean_name`
    fn resolve_dependency(
        &self,
        descriptor: &DependencyDescriptor,
        bean_name: &str,
    ) -> Result<ResolvedDependency>;
}

impl<T: DependencyResolver + ?Sized> DependencyResolver for std::sync::Arc<T> {
    fn resolve_dependency(
        &self,
        descriptor: &DependencyDescriptor,
        bean_name: &str,
    ) -> Result<ResolvedDependency> {
        (**self).resolve_dependency(descriptor, bean_name)
    }
}
