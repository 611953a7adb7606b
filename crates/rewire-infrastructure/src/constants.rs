//! Infrastructure layer constants
//!
//! Wiring-related constants shared with the core live in
//! `rewire_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "rewire.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "rewire";

/// Environment variable prefix for configuration (`REWIRE__SECTION__KEY`)
pub const CONFIG_ENV_PREFIX: &str = "REWIRE";

/// Separator between the prefix and nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_ENV_FILTER: &str = "REWIRE_LOG";

/// Default file name prefix for rolling log files
pub const LOG_FILE_PREFIX: &str = "rewire";

/// Maximum number of rotated log files to keep
pub const LOG_MAX_FILES: usize = 7;

// ============================================================================
// PREFERENCE STORE CONSTANTS
// ============================================================================

/// Default file name of the JSON preference store
pub const DEFAULT_PREFERENCES_FILENAME: &str = "wiring.json";
