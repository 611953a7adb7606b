//! # rewire
//!
//! Runtime rewiring of injected dependencies. Injection points marked as
//! rewireable receive a live proxy instead of a fixed value; an operator can
//! later change which beans sit behind it, in which order, without a restart.
//! Choices are persisted per injection point and restored on the next start.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use rewire::{
//!     Bean, BeanRegistry, DeclaredType, DependencyDescriptor, RewiringResolver, Wiring,
//!     infrastructure::config::AppConfig, build_manager,
//! };
//!
//! trait Codec: Send + Sync {
//!     fn name(&self) -> &'static str;
//! }
//! struct Gzip;
//! impl Codec for Gzip {
//!     fn name(&self) -> &'static str { "gzip" }
//! }
//! struct Zstd;
//! impl Codec for Zstd {
//!     fn name(&self) -> &'static str { "zstd" }
//! }
//!
//! let registry = Arc::new(BeanRegistry::new());
//! registry.register("gzip", Bean::shared::<dyn Codec>("gzip", Arc::new(Gzip))).unwrap();
//! registry.register("zstd", Bean::shared::<dyn Codec>("zstd", Arc::new(Zstd))).unwrap();
//!
//! let manager = build_manager(&AppConfig::default(), registry.clone()).unwrap();
//! let resolver = RewiringResolver::new(registry, manager.clone());
//!
//! let codec = DependencyDescriptor::field("codec", DeclaredType::single::<dyn Codec>()).rewireable();
//! let proxy = resolver.resolve(&codec, "app::Server").unwrap().into_proxy().unwrap();
//! assert_eq!(proxy.get::<dyn Codec>().unwrap().name(), "gzip");
//!
//! manager.modify_dependency(proxy.identifier(), &Wiring::new(["zstd"])).unwrap();
//! assert_eq!(proxy.get::<dyn Codec>().unwrap().name(), "zstd");
//! ```
//!
//! ## Architecture
//!
//! - `domain` - identifiers, descriptors, beans, wiring and port traits
//! - `application` - proxies, proxy factory, manager and interception adapter
//! - `infrastructure` - configuration, logging, preference stores, bean registry
//! - [`cli`] - operator commands over a preference file

pub mod cli;

/// Domain layer - identifiers, descriptors and port traits
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use rewire_domain::*;
}

/// Application layer - the rewiring core
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use rewire_application::*;
}

/// Infrastructure layer - config, logging and persistence
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use rewire_infrastructure::*;
}

// Re-export commonly used types at the crate root
pub use application::{
    Injection, ManageableProxy, PresentedValue, RewiringAdminInterface, RewiringManager,
    RewiringResolver,
};
pub use domain::*;
pub use infrastructure::{BeanRegistry, ManagerBuilder, build_manager};
