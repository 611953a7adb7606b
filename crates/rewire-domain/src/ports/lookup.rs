//! Bean Lookup Port
//!
//! The slice of the host container the manager needs: fetching beans by name
//! and listing beans of a type.

use crate::value_objects::{Bean, BeanType};
use indexmap::IndexMap;

/// Bean lookup supplied by the host container
pub trait BeanLookup: Send + Sync {
    /// Bean registered under `name`, if any
    fn get_bean(&self, name: &str) -> Option<Bean>;

    /// All beans of `bean_type`, keyed by name, in registration order
    fn beans_of_type(&self, bean_type: &BeanType) -> IndexMap<String, Bean>;

    /// Names of all beans of `bean_type`, in registration order
    fn bean_names_for_type(&self, bean_type: &BeanType) -> Vec<String> {
        self.beans_of_type(bean_type).into_keys().collect()
    }
}
