//! Built-in manifests for well-known packages.

use linkplan_common::error::{PlanError, Result};

use crate::manifest::Manifest;
use crate::resolver::ComponentGraph;

/// Names and manifest sources of every built-in preset.
pub const PRESETS: &[(&str, &str)] = &[("openexr", include_str!("../presets/openexr.yaml"))];

/// Names of the built-in presets.
#[must_use]
pub fn preset_names() -> Vec<&'static str> {
    PRESETS.iter().map(|(name, _)| *name).collect()
}

/// Raw manifest text of a preset.
#[must_use]
pub fn preset_source(name: &str) -> Option<&'static str> {
    PRESETS
        .iter()
        .find(|(preset, _)| preset.eq_ignore_ascii_case(name))
        .map(|(_, source)| *source)
}

/// Parses a preset manifest.
///
/// # Errors
///
/// Returns [`PlanError::NotFound`] for an unknown preset name.
pub fn load_manifest(name: &str) -> Result<Manifest> {
    let source = preset_source(name).ok_or_else(|| PlanError::NotFound {
        kind: "preset",
        id: name.to_string(),
    })?;
    tracing::debug!(preset = name, "loading built-in preset");
    Manifest::from_yaml(source)
}

/// Parses a preset and registers its components.
///
/// # Errors
///
/// Returns [`PlanError::NotFound`] for an unknown preset name.
pub fn load_preset(name: &str) -> Result<ComponentGraph> {
    load_manifest(name)?.into_graph()
}
