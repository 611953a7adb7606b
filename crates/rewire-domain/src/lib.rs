//! # Domain Layer
//!
//! Core types of rewire: the identifier of a rewireable injection point, the
//! dependency descriptor handed over by the host container, bean handles,
//! wirings, and the ports through which the core talks to the outside world.
//!
//! ## Module Categories
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Domain error type and `Result` alias |
//! | [`constants`] | Path markers and preference keys |
//! | [`value_objects`] | Identifier, descriptor, bean and wiring values |
//! | [`ports`] | Bean lookup, dependency resolver and preference store traits |
//!
//! This crate has no dependency on infrastructure: it only uses pure
//! libraries for errors, serialization and ordered collections.

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::*;
pub use value_objects::*;
