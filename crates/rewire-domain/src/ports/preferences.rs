//! Preference Store Port
//!
//! Defines the contract for the hierarchical key/value tree that remembers
//! wiring choices across restarts. Each identifier path names one node; the
//! node holds the comma-joined bean names under
//! [`WIRED_BEANS_KEY`](crate::constants::WIRED_BEANS_KEY).

use crate::error::Result;

/// One node of the preference tree
pub trait PreferenceNode: Send + Sync {
    /// Node path
    fn path(&self) -> &str;

    /// Value stored under `key`
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key` (not durable until [`flush`](Self::flush))
    fn put(&self, key: &str, value: &str);

    /// Durability boundary: write pending changes to the backing store
    fn flush(&self) -> Result<()>;
}

/// Hierarchical preference store
pub trait PreferenceStore: Send + Sync {
    /// Node at `path`, created on demand
    fn node(&self, path: &str) -> Box<dyn PreferenceNode>;

    /// Paths of every node holding at least one value
    fn node_paths(&self) -> Vec<String>;
}
