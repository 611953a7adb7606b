//! JSON file preference store
//!
//! The durable map is a single JSON object of `"<node path>/<key>": "<value>"`
//! entries. A flush merges the node's pending writes into the file as it is
//! on disk at that moment, so entries flushed by other processes survive it.
//! The in-memory view only learns about those entries through
//! [`FilePreferenceStore::reload`], which reports them as changes.

use super::{FlatPreferences, drain_node, flat_key, node_paths};
use crate::error_ext::ErrorContext;
use rewire_domain::error::Result;
use rewire_domain::{PreferenceNode, PreferenceStore};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

#[derive(Debug)]
struct FileState {
    file: PathBuf,
    pending: RwLock<FlatPreferences>,
    durable: RwLock<FlatPreferences>,
}

impl FileState {
    fn write_durable(&self, durable: &FlatPreferences) -> Result<()> {
        if let Some(parent) = self.file.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).io_context(format!(
                "Failed to create preference directory {}",
                parent.display()
            ))?;
        }
        let json = serde_json::to_string_pretty(durable)
            .persistence_context("Failed to serialize preferences")?;
        fs::write(&self.file, json).persistence_context(format!(
            "Failed to write preference file {}",
            self.file.display()
        ))
    }
}

/// Preference store persisted as a JSON file
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    state: Arc<FileState>,
}

impl FilePreferenceStore {
    /// Open the store at `path`, loading it when the file exists
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = path.as_ref().to_path_buf();
        let durable = read_file(&file)?;
        debug!(path = %file.display(), entries = durable.len(), "Preference file opened");

        Ok(Self {
            state: Arc::new(FileState {
                file,
                pending: RwLock::new(FlatPreferences::new()),
                durable: RwLock::new(durable),
            }),
        })
    }

    /// Backing file
    pub fn file_path(&self) -> &Path {
        &self.state.file
    }

    /// Every stored `(flat key, value)` pair, pending writes included
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut merged = self
            .state
            .durable
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        merged.extend(
            self.state
                .pending
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        merged.into_iter().collect()
    }

    /// Re-read the file and return the entries whose value changed
    ///
    /// Each change is a `(flat key, new value)` pair, suitable for
    /// `RewiringManager::preference_changed`. Removed entries are dropped
    /// without being reported.
    pub fn reload(&self) -> Result<Vec<(String, String)>> {
        let fresh = read_file(&self.state.file)?;
        let mut durable = self
            .state
            .durable
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let changes: Vec<(String, String)> = fresh
            .iter()
            .filter(|(key, value)| durable.get(*key) != Some(*value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        *durable = fresh;

        info!(
            path = %self.state.file.display(),
            changed = changes.len(),
            "Preference file reloaded"
        );
        Ok(changes)
    }
}

fn read_file(file: &Path) -> Result<FlatPreferences> {
    if !file.exists() {
        return Ok(FlatPreferences::new());
    }
    let content = fs::read_to_string(file).io_context(format!(
        "Failed to read preference file {}",
        file.display()
    ))?;
    if content.trim().is_empty() {
        return Ok(FlatPreferences::new());
    }
    serde_json::from_str(&content).persistence_context(format!(
        "Preference file {} is not a JSON object of strings",
        file.display()
    ))
}

impl PreferenceStore for FilePreferenceStore {
    fn node(&self, path: &str) -> Box<dyn PreferenceNode> {
        Box::new(FilePreferenceNode {
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

struct FilePreferenceNode {
    path: String,
    state: Arc<FileState>,
}

impl PreferenceNode for FilePreferenceNode {
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
        // Held across the write so concurrent flushes never interleave on disk
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
        let written = read_file(&self.state.file).and_then(|mut on_disk| {
            on_disk.extend(drained.clone());
            self.state.write_durable(&on_disk)
        });
        if let Err(e) = written {
            // Keep the writes pending so a later flush can retry them
            self.state
                .pending
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .extend(drained);
            return Err(e);
        }
        durable.extend(drained);
        debug!(node = %self.path, file = %self.state.file.display(), "Preference node flushed");
        Ok(())
    }
}
