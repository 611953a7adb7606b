//! Wiring value object
//!
//! The ordered set of bean names selected for one injection point. Order is
//! significant: it is the iteration order of collection proxies and the
//! first name decides what a single-dependency proxy presents.

use crate::constants::WIRING_SEPARATOR;
use indexmap::IndexSet;
use std::fmt;

/// Ordered, duplicate-free list of bean names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wiring {
    names: IndexSet<String>,
}

impl Wiring {
    /// Build a wiring; duplicates keep their first position
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().collect()
    }

    /// Empty wiring
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a persisted value such as `"testC,testA"`
    ///
    /// Names are trimmed and empty segments skipped. There is no escaping: a
    /// bean name containing the separator cannot be persisted.
    pub fn parse(value: &str) -> Self {
        value
            .split(WIRING_SEPARATOR)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// Value stored in the preference node
    pub fn to_preference_value(&self) -> String {
        let separator = WIRING_SEPARATOR.to_string();
        self.names
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(&separator)
    }

    /// Names in wiring order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// First name, which a single-dependency proxy presents
    pub fn first(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    /// Whether `name` is wired
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether nothing is wired
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names as an owned vector
    pub fn to_vec(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for Wiring {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Wiring {
    type Item = &'a String;
    type IntoIter = indexmap::set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}

impl fmt::Display for Wiring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.to_preference_value())
    }
}
