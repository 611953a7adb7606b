//! Value Objects
//!
//! Immutable values exchanged between the container boundary, the manager
//! and the persistence layer.

pub mod bean;
pub mod dependency;
pub mod identifier;
pub mod wiring;

pub use bean::{Bean, BeanType};
pub use dependency::{
    DeclaredType, DependencyDescriptor, DependencyShape, InjectionMember, ResolvedTarget,
    Rewireable,
};
pub use identifier::{Identifier, InjectionKind};
pub use wiring::Wiring;
