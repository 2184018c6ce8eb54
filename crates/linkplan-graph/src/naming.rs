//! Library file naming for a build configuration.
//!
//! The suffix depends only on the [`BuildConfiguration`], never on the
//! component, so every versioned library in a plan gets the same one.

use linkplan_common::config::BuildConfiguration;
use linkplan_common::constants::{DEBUG_MARKER, VERSION_SEPARATOR, VERSION_TOKEN_JOIN};
use linkplan_common::types::PlatformFamily;

use crate::component::LibraryTemplate;

/// Whether library names embed the `major_minor` version token.
///
/// Static archives always do; shared libraries only on Windows, where the
/// import library carries the version.
#[must_use]
pub fn embeds_version(config: &BuildConfiguration) -> bool {
    !config.is_shared() || config.platform == PlatformFamily::Windows
}

/// Suffix appended to every versioned library name, e.g. `-3_2_d`.
#[must_use]
pub fn library_suffix(config: &BuildConfiguration) -> String {
    let mut suffix = String::new();
    if embeds_version(config) {
        suffix.push(VERSION_SEPARATOR);
        suffix.push_str(&config.version.major.to_string());
        suffix.push(VERSION_TOKEN_JOIN);
        suffix.push_str(&config.version.minor.to_string());
    }
    if config.is_debug() {
        suffix.push_str(DEBUG_MARKER);
    }
    suffix
}

/// Concrete library file name for `template` given a precomputed `suffix`.
#[must_use]
pub fn library_file_name(template: &LibraryTemplate, suffix: &str) -> String {
    if template.versioned {
        format!("{}{suffix}", template.base)
    } else {
        template.base.clone()
    }
}
