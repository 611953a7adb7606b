//! Preference Stores
//!
//! Backends for the wiring preference tree. Both keep a flat map from
//! `<node path>/<key>` to value, split into pending writes and durable
//! values; [`flush`](rewire_domain::PreferenceNode::flush) moves a node's
//! pending writes into the durable map.
//!
//! | Backend | Durable storage |
//! |---------|-----------------|
//! | [`InMemoryPreferenceStore`] | shared map, lives as long as any clone |
//! | [`FilePreferenceStore`] | JSON object on disk, merged into on every flush |
//!
//! [`watch`] keeps a running manager in step with edits other processes make
//! to the file store.

pub mod file;
pub mod memory;
pub mod watcher;

pub use file::FilePreferenceStore;
pub use memory::InMemoryPreferenceStore;
pub use watcher::{PreferenceWatcher, forward_changes, watch};

use crate::config::{PreferencesBackend, PreferencesConfig};
use rewire_domain::PreferenceStore;
use rewire_domain::constants::PATH_SEPARATOR;
use rewire_domain::error::{Error, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::info;

/// Build the preference store selected by `config`
///
/// Returns `None` for the `none` backend.
pub fn build_preference_store(
    config: &PreferencesConfig,
) -> Result<Option<Arc<dyn PreferenceStore>>> {
    match config.backend {
        PreferencesBackend::None => Ok(None),
        PreferencesBackend::Memory => {
            info!("Using in-memory preference store");
            Ok(Some(Arc::new(InMemoryPreferenceStore::new())))
        }
        PreferencesBackend::File => {
            let path = config.path.as_ref().ok_or_else(|| {
                Error::configuration("The file preference store needs a path")
            })?;
            let store = FilePreferenceStore::open(path)?;
            info!(path = %path.display(), "Using file preference store");
            Ok(Some(Arc::new(store)))
        }
    }
}

// ============================================================================
// Flat key helpers
// ============================================================================

pub(crate) type FlatPreferences = BTreeMap<String, String>;

/// Flat key of `key` in the node at `path`
pub(crate) fn flat_key(path: &str, key: &str) -> String {
    format!("{path}{PATH_SEPARATOR}{key}")
}

/// Node path of a flat key
pub(crate) fn node_of(flat_key: &str) -> Option<&str> {
    flat_key.rsplit_once(PATH_SEPARATOR).map(|(node, _)| node)
}

/// Remove and return every pending entry of the node at `path`
pub(crate) fn drain_node(pending: &mut FlatPreferences, path: &str) -> FlatPreferences {
    let keys: Vec<String> = pending
        .keys()
        .filter(|key| node_of(key) == Some(path))
        .cloned()
        .collect();
    keys.into_iter()
        .filter_map(|key| pending.remove_entry(&key))
        .collect()
}

/// Distinct node paths across several flat maps, sorted
pub(crate) fn node_paths<'a>(maps: impl IntoIterator<Item = &'a FlatPreferences>) -> Vec<String> {
    let paths: BTreeSet<&str> = maps
        .into_iter()
        .flat_map(|map| map.keys().filter_map(|key| node_of(key)))
        .collect();
    paths.into_iter().map(str::to_string).collect()
}
