//! System-wide constants and default file names.

/// Manifest file looked up when none is given on the command line.
pub const DEFAULT_MANIFEST: &str = "linkplan.yaml";

/// Marker appended to library names in debug builds.
pub const DEBUG_MARKER: &str = "_d";

/// Separator between a library base name and its version token.
pub const VERSION_SEPARATOR: char = '-';

/// Separator between major and minor in a library version token.
pub const VERSION_TOKEN_JOIN: char = '_';

/// Include directory every component gets unless the package overrides it.
pub const DEFAULT_INCLUDE_DIR: &str = "include";

/// Binary directory appended to `PATH` unless the package overrides it.
pub const DEFAULT_BIN_DIR: &str = "bin";

/// Separator between a target namespace and a component name.
pub const TARGET_NAMESPACE_SEPARATOR: &str = "::";

/// Application name used in CLI output.
pub const APP_NAME: &str = "linkplan";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "lkp";
