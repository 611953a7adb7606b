//! Preference file watcher
//!
//! Applies edits other processes make to a [`FilePreferenceStore`]'s file,
//! such as `rewire set`, to a running manager.
//!
//! ```text
//! file modified → notify → worker thread → store.reload() → manager.preference_changed()
//! ```

use super::FilePreferenceStore;
use crate::error_ext::ErrorContext;
use notify::{Config as NotifyConfig, Event, RecommendedWatcher, RecursiveMode, Watcher};
use rewire_application::RewiringManager;
use rewire_domain::constants::{PATH_SEPARATOR, WIRED_BEANS_KEY};
use rewire_domain::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use tracing::{debug, error, info, warn};

/// Reload `store` and hand every changed wiring to `manager`
///
/// Changed entries that are not wirings are skipped. Returns how many wiring
/// changes were forwarded.
pub fn forward_changes(store: &FilePreferenceStore, manager: &RewiringManager) -> Result<usize> {
    let mut forwarded = 0;
    for (property, value) in store.reload()? {
        if !is_wiring_key(&property) {
            debug!(property = %property, "Skipping changed preference that is not a wiring");
            continue;
        }
        match manager.preference_changed(&property, &value) {
            Ok(()) => forwarded += 1,
            Err(e) => warn!(property = %property, error = %e, "Ignoring malformed wiring preference"),
        }
    }
    Ok(forwarded)
}

fn is_wiring_key(property: &str) -> bool {
    property
        .rsplit_once(PATH_SEPARATOR)
        .is_some_and(|(_, key)| key == WIRED_BEANS_KEY)
}

/// Running watch on a preference file
///
/// Changes stop being applied once this is dropped.
pub struct PreferenceWatcher {
    file: PathBuf,
    _watcher: RecommendedWatcher,
}

impl PreferenceWatcher {
    /// Watched preference file
    pub fn file_path(&self) -> &Path {
        &self.file
    }
}

impl std::fmt::Debug for PreferenceWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceWatcher")
            .field("file", &self.file)
            .finish_non_exhaustive()
    }
}

/// Start applying out-of-band edits of `store`'s file to `manager`
///
/// The directory holding the file is watched, so the file may be created or
/// replaced after the watch starts.
pub fn watch(store: FilePreferenceStore, manager: Arc<RewiringManager>) -> Result<PreferenceWatcher> {
    let file = store.file_path().to_path_buf();
    let file_name = file.file_name().map(ToOwned::to_owned).ok_or_else(|| {
        Error::configuration(format!("preference path {} names no file", file.display()))
    })?;
    let directory = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&directory).io_context(format!(
        "Failed to create preference directory {}",
        directory.display()
    ))?;

    let (tx, rx) = mpsc::channel();
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                let relevant = (event.kind.is_modify() || event.kind.is_create())
                    && event
                        .paths
                        .iter()
                        .any(|path| path.file_name() == Some(file_name.as_os_str()));
                if relevant {
                    let _ = tx.send(());
                }
            }
            Err(e) => warn!(error = %e, "Preference watcher error"),
        },
        NotifyConfig::default(),
    )
    .map_err(|e| Error::configuration_with_source("Failed to create preference watcher", e))?;

    watcher
        .watch(&directory, RecursiveMode::NonRecursive)
        .map_err(|e| {
            Error::configuration_with_source(
                format!("Failed to watch preference directory {}", directory.display()),
                e,
            )
        })?;

    let watched = file.clone();
    thread::Builder::new()
        .name("rewire-preferences".to_string())
        .spawn(move || {
            // Ends when the notify watcher, and with it the sender, is dropped
            while rx.recv().is_ok() {
                // A single write can raise several events
                while rx.try_recv().is_ok() {}
                match forward_changes(&store, &manager) {
                    Ok(forwarded) => debug!(
                        path = %watched.display(),
                        forwarded,
                        "Preference file change processed"
                    ),
                    Err(e) => error!(
                        path = %watched.display(),
                        error = %e,
                        "Failed to reload preference file"
                    ),
                }
            }
            debug!(path = %watched.display(), "Preference watcher stopped");
        })
        .io_context("Failed to start preference watcher thread")?;

    info!(path = %file.display(), "Watching preference file");
    Ok(PreferenceWatcher {
        file,
        _watcher: watcher,
    })
}
