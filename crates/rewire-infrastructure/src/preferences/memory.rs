//! In-memory preference store
//!
//! Clones share state, so a store handed to one manager can be handed to a
//! second one to simulate a restart. Flushes can be made to fail.

use super::{FlatPreferences, drain_node, flat_key, node_paths};
use rewire_domain::error::{Error, Result};
use rewire_domain::{PreferenceNode, PreferenceStore};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

#[derive(Debug, Default)]
struct MemoryState {
    pending: RwLock<FlatPreferences>,
    durable: RwLock<FlatPreferences>,
    fail_flush: AtomicBool,
    flushes: AtomicUsize,
}

/// Process-local preference store
#[derive(Debug, Clone, Default)]
pub struct InMemoryPreferenceStore {
    state: Arc<MemoryState>,
}

impl InMemoryPreferenceStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent flush fail (or succeed again)
    pub fn set_fail_flush(&self, fail: bool) {
        self.state.fail_flush.store(fail, Ordering::SeqCst);
    }

    /// Number of successful flushes
    pub fn flush_count(&self) -> usize {
        self.state.flushes.load(Ordering::SeqCst)
    }

    /// Flushed value of `key` in the node at `path`
    pub fn durable_value(&self, path: &str, key: &str) -> Option<String> {
        self.state
            .durable
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&flat_key(path, key))
            .cloned()
    }

    /// Drop every write that was never flushed, as a process exit would
    pub fn discard_pending(&self) {
        self.state
            .pending
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn node(&self, path: &str) -> Box<dyn PreferenceNode> {
        Box::new(MemoryPreferenceNode {
            path: path.to_string(),
            state: Arc::clone(&self.state),
        })
    }

    fn node_paths(&self) -> Vec<String> {
        let pending = self
            .state
            .pending
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let durable = self
            .state
            .durable
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        node_paths([&pending, &*durable])
    }
}

struct MemoryPreferenceNode {
    path: String,
    state: Arc<MemoryState>,
}

impl PreferenceNode for MemoryPreferenceNode {
    fn path(&self) -> &str {
        &self.path
    }

    fn get(&self, key: &str) -> Option<String> {
        let key = flat_key(&self.path, key);
        let pending = self
            .state
            .pending
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned();
        pending.or_else(|| {
            self.state
                .durable
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .get(&key)
                .cloned()
        })
    }

    fn put(&self, key: &str, value: &str) {
        self.state
            .pending
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(flat_key(&self.path, key), value.to_string());
    }

    fn flush(&self) -> Result<()> {
        if self.state.fail_flush.load(Ordering::SeqCst) {
            return Err(Error::persistence(format!(
                "flush of preference node {} rejected",
                self.path
            )));
        }

        // Held across the drain so a reader never sees the entries in neither map
        let mut durable = self
            .state
            .durable
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let drained = drain_node(
            &mut self
                .state
                .pending
                .write()
                .unwrap_or_else(PoisonError::into_inner),
            &self.path,
        );
        let count = drained.len();
        durable.extend(drained);
        drop(durable);
        self.state.flushes.fetch_add(1, Ordering::SeqCst);
        debug!(node = %self.path, entries = count, "Preference node flushed");
        Ok(())
    }
}
