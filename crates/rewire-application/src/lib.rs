//! Application Layer - rewire
//!
//! The dynamic dependency-rewiring core: manageable proxies, the factory that
//! builds them, the manager that tracks and rewires them, and the adapter that
//! plugs the manager into a container's resolution path.
//!
//! ## Components
//!
//! - [`proxy`]: `ManageableProxy`, presented views and the `ProxyFactory`
//! - [`manager`]: `RewiringManager`, registry by identifier and by type
//! - [`interceptor`]: `RewiringResolver`, the container-facing adapter
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `rewire-domain`: identifiers, descriptors, beans and port traits
//! - Pure Rust libraries for concurrency (`dashmap`, `arc-swap`) and logging

pub mod interceptor;
pub mod manager;
pub mod proxy;

pub use interceptor::{Injection, RewiringResolver};
pub use manager::{RewiringAdminInterface, RewiringManager};
pub use proxy::{
    BasicProxyFactory, ManageableProxy, PresentedValue, ProxyFactory, ProxyKind, WiringSnapshot,
};
