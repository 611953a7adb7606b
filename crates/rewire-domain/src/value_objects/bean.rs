//! Bean value objects
//!
//! A [`Bean`] is an opaque, shareable handle on one container-managed
//! instance. It remembers the [`BeanType`] it was registered under and a
//! display string, which plays the role of the instance's identity string
//! when no bean name is available.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Runtime type key of a bean or of a dependency's element type
///
/// Two `BeanType`s are equal when they describe the same Rust type. The
/// type name is kept for diagnostics only.
#[derive(Clone, Copy)]
pub struct BeanType {
    id: TypeId,
    name: &'static str,
}

impl BeanType {
    /// Type key for `T`, which may be a trait object such as `dyn Greeter`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Full type name, as reported by the compiler
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for BeanType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for BeanType {}

impl Hash for BeanType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for BeanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for BeanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Shareable handle on one bean instance
///
/// Internally the instance is stored as `Arc<T>` boxed behind `dyn Any`, which
/// lets trait-object beans (`Arc<dyn Greeter>`) round-trip through the
/// type-erased registry.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use rewire_domain::Bean;
///
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
///
/// struct English;
/// impl Greeter for English {
///     fn greet(&self) -> String {
///         "hello".to_string()
///     }
/// }
///
/// let bean = Bean::shared::<dyn Greeter>("english", Arc::new(English));
/// let greeter = bean.get::<dyn Greeter>().unwrap();
/// assert_eq!(greeter.greet(), "hello");
/// ```
#[derive(Clone)]
pub struct Bean {
    instance: Arc<dyn Any + Send + Sync>,
    bean_type: BeanType,
    display: Arc<str>,
}

impl Bean {
    /// Wrap an owned value
    pub fn new<T: Any + Send + Sync>(display: impl Into<String>, value: T) -> Self {
        Self::shared::<T>(display, Arc::new(value))
    }

    /// Wrap an already shared instance, registering it under the type `T`
    pub fn shared<T: ?Sized + Send + Sync + 'static>(
        display: impl Into<String>,
        instance: Arc<T>,
    ) -> Self {
        Self {
            instance: Arc::new(instance),
            bean_type: BeanType::of::<T>(),
            display: Arc::from(display.into()),
        }
    }

    /// Type this bean was registered under
    pub fn bean_type(&self) -> BeanType {
        self.bean_type
    }

    /// Display string of the instance
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Typed access to the instance, `None` when `T` is not the registered type
    pub fn get<T: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.instance.downcast_ref::<Arc<T>>().cloned()
    }

    /// Whether both handles point to the same instance
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.instance, &other.instance)
    }
}

impl fmt::Debug for Bean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bean")
            .field("display", &self.display)
            .field("bean_type", &self.bean_type)
            .finish()
    }
}

impl fmt::Display for Bean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}
