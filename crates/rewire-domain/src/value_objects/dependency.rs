//! Dependency descriptors
//!
//! The read-only view of one injection point that the host container hands
//! over when it resolves a dependency: declared shape, element type, the
//! member being injected and an optional rewireable marker.

use crate::error::{Error, Result};
use crate::value_objects::bean::{Bean, BeanType};
use indexmap::IndexMap;
use std::fmt;

/// Structural shape of a declared dependency
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DependencyShape {
    /// One bean
    Single,
    /// Ordered sequence of beans
    List,
    /// Ordered set of distinct beans
    Set,
    /// Generic collection of beans
    Collection,
    /// Collection specialization other than list or set (e.g. a queue)
    SpecializedCollection(String),
    /// Bean name to bean mapping
    Map,
    /// Fixed-size array of beans
    Array,
}

impl fmt::Display for DependencyShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => f.write_str("single"),
            Self::List => f.write_str("list"),
            Self::Set => f.write_str("set"),
            Self::Collection => f.write_str("collection"),
            Self::SpecializedCollection(name) => write!(f, "collection<{name}>"),
            Self::Map => f.write_str("map"),
            Self::Array => f.write_str("array"),
        }
    }
}

/// Declared type of an injection point
///
/// `element` is the bean type carried by the dependency: the type itself for a
/// single dependency, the element type of a collection or the value type of a
/// map.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeclaredType {
    shape: DependencyShape,
    element: BeanType,
}

impl DeclaredType {
    /// Build a declared type from its parts
    pub fn new(shape: DependencyShape, element: BeanType) -> Self {
        Self { shape, element }
    }

    /// A single `T`
    pub fn single<T: ?Sized + 'static>() -> Self {
        Self::new(DependencyShape::Single, BeanType::of::<T>())
    }

    /// A list of `T`
    pub fn list<T: ?Sized + 'static>() -> Self {
        Self::new(DependencyShape::List, BeanType::of::<T>())
    }

    /// A set of `T`
    pub fn set<T: ?Sized + 'static>() -> Self {
        Self::new(DependencyShape::Set, BeanType::of::<T>())
    }

    /// A generic collection of `T`
    pub fn collection<T: ?Sized + 'static>() -> Self {
        Self::new(DependencyShape::Collection, BeanType::of::<T>())
    }

    /// A named map of `T`
    pub fn map<T: ?Sized + 'static>() -> Self {
        Self::new(DependencyShape::Map, BeanType::of::<T>())
    }

    /// An array of `T`
    pub fn array<T: ?Sized + 'static>() -> Self {
        Self::new(DependencyShape::Array, BeanType::of::<T>())
    }

    /// Declared shape
    pub fn shape(&self) -> &DependencyShape {
        &self.shape
    }

    /// Carried bean type, whatever the shape
    pub fn element(&self) -> BeanType {
        self.element
    }

    /// Bean type used as the by-type registry key
    ///
    /// Arrays are rejected: they cannot be substituted by a proxy.
    pub fn element_type(&self) -> Result<BeanType> {
        match self.shape {
            DependencyShape::Array => Err(Error::unsupported_shape(format!(
                "array of {} cannot be rewired",
                self.element
            ))),
            _ => Ok(self.element),
        }
    }

    /// Whether the shape holds several beans
    pub fn is_multiple(&self) -> bool {
        !matches!(self.shape, DependencyShape::Single)
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.shape {
            DependencyShape::Single => write!(f, "{}", self.element),
            _ => write!(f, "{}<{}>", self.shape, self.element),
        }
    }
}

/// The member an injection point belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InjectionMember {
    /// A field of the owning type
    Field {
        /// Field name
        name: String,
    },
    /// A parameter of a method or constructor of the owning type
    MethodParameter {
        /// Method name
        method: String,
        /// Parameter name
        parameter: String,
    },
}

impl InjectionMember {
    /// Field member
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field { name: name.into() }
    }

    /// Method parameter member
    pub fn method_parameter(method: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self::MethodParameter {
            method: method.into(),
            parameter: parameter.into(),
        }
    }
}

/// Marker requesting rewireable injection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rewireable {
    /// Whether a dependency with no candidate bean is an error
    pub required: bool,
}

impl Default for Rewireable {
    fn default() -> Self {
        Self { required: true }
    }
}

/// Read-only description of one injection point
#[derive(Debug, Clone)]
pub struct DependencyDescriptor {
    declared: DeclaredType,
    member: InjectionMember,
    marker: Option<Rewireable>,
}

impl DependencyDescriptor {
    /// Describe an injection point without any marker
    pub fn new(member: InjectionMember, declared: DeclaredType) -> Self {
        Self {
            declared,
            member,
            marker: None,
        }
    }

    /// Describe a field injection point
    pub fn field(name: impl Into<String>, declared: DeclaredType) -> Self {
        Self::new(InjectionMember::field(name), declared)
    }

    /// Describe a method parameter injection point
    pub fn method_parameter(
        method: impl Into<String>,
        parameter: impl Into<String>,
        declared: DeclaredType,
    ) -> Self {
        Self::new(InjectionMember::method_parameter(method, parameter), declared)
    }

    /// Attach the default (required) rewireable marker
    pub fn rewireable(self) -> Self {
        self.with_marker(Rewireable::default())
    }

    /// Attach a rewireable marker
    pub fn with_marker(mut self, marker: Rewireable) -> Self {
        self.marker = Some(marker);
        self
    }

    /// Declared type of the dependency
    pub fn declared_type(&self) -> &DeclaredType {
        &self.declared
    }

    /// Member being injected
    pub fn member(&self) -> &InjectionMember {
        &self.member
    }

    /// Rewireable marker, if any
    pub fn marker(&self) -> Option<Rewireable> {
        self.marker
    }

    /// Whether this injection point asked for a rewireable proxy
    pub fn is_rewireable(&self) -> bool {
        self.marker.is_some()
    }
}

/// Value the container resolved for an injection point
#[derive(Debug, Clone, Default)]
pub enum ResolvedTarget {
    /// Nothing matched
    #[default]
    Empty,
    /// One bean
    Single(Bean),
    /// Beans in resolution order, without names
    Sequence(Vec<Bean>),
    /// Beans keyed by bean name, in resolution order
    Named(IndexMap<String, Bean>),
}

impl ResolvedTarget {
    /// Whether no bean was resolved
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Single(_) => false,
            Self::Sequence(beans) => beans.is_empty(),
            Self::Named(beans) => beans.is_empty(),
        }
    }

    /// Number of resolved beans
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Single(_) => 1,
            Self::Sequence(beans) => beans.len(),
            Self::Named(beans) => beans.len(),
        }
    }

    /// Attach container bean names to an unnamed resolution
    ///
    /// Applies only when the names line up one-to-one with the resolved beans;
    /// otherwise the target is returned unchanged and keeps its display keys.
    pub fn named_by(self, bean_names: &[String]) -> Self {
        match self {
            Self::Single(bean) if bean_names.len() == 1 => {
                Self::Named(IndexMap::from([(bean_names[0].clone(), bean)]))
            }
            Self::Sequence(beans) if beans.len() == bean_names.len() && !beans.is_empty() => {
                Self::Named(bean_names.iter().cloned().zip(beans).collect())
            }
            other => other,
        }
    }
}
