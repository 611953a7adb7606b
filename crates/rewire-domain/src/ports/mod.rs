//! Ports
//!
//! Traits implemented outside the core: the host container's bean lookup and
//! resolution path, and the persisted preference tree.

pub mod lookup;
pub mod preferences;
pub mod resolver;

pub use lookup::BeanLookup;
pub use preferences::{PreferenceNode, PreferenceStore};
pub use resolver::{DependencyResolver, ResolvedDependency};
