//! Domain constants
//!
//! Path markers and preference keys shared by every layer. Changing any of
//! these invalidates previously persisted wiring.

/// Separator between segments of an identifier path
pub const PATH_SEPARATOR: char = '/';

/// Segment marking a field injection point in an identifier path
pub const FIELD_MARKER: &str = "__field__";

/// Suffix appended to the method name segment of a method parameter path
pub const METHOD_MARKER: &str = "()";

/// Preference key holding the wired bean names of one injection point
pub const WIRED_BEANS_KEY: &str = "wiredBeans";

/// Separator between bean names in a persisted wiring value
pub const WIRING_SEPARATOR: char = ',';
