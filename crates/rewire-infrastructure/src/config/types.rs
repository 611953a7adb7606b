//! Configuration types

use crate::constants::{DEFAULT_LOG_LEVEL, LOG_MAX_FILES};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Rewiring manager behaviour
    pub manager: ManagerConfig,

    /// Where wiring choices are persisted
    pub preferences: PreferencesConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,

    /// Log to a daily-rolling file in addition to stderr
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_output: Option<PathBuf>,

    /// Maximum number of rotated files to keep
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
            max_files: LOG_MAX_FILES,
        }
    }
}

/// Rewiring manager configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Write back and flush every modification to the preference store
    pub flush_on_modify: bool,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            flush_on_modify: true,
        }
    }
}

/// Preference store backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferencesBackend {
    /// No persistence: wiring choices are lost on restart
    None,
    /// Process-local store
    #[default]
    Memory,
    /// JSON file on disk
    File,
}

/// Preference store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferencesConfig {
    /// Backend kind
    pub backend: PreferencesBackend,

    /// Store file, required by the `file` backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Apply edits other processes make to the store file (`file` backend only)
    pub watch: bool,
}
