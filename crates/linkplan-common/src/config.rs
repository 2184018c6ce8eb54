//! Build configuration model that parameterizes plan resolution.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::types::{BuildType, Linkage, PlatformFamily};
use crate::version::Version;

/// Inputs that parameterize a single resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfiguration {
    /// Target platform family.
    pub platform: PlatformFamily,
    /// Static or shared linkage.
    pub linkage: Linkage,
    /// Build type of the produced libraries.
    pub build_type: BuildType,
    /// Version of the library being packaged.
    pub version: Version,
    /// Explicitly enabled feature flags.
    pub features: BTreeSet<String>,
    /// Whether position-independent code was requested.
    pub position_independent: bool,
}

impl Default for BuildConfiguration {
    fn default() -> Self {
        Self {
            platform: PlatformFamily::Linux,
            linkage: Linkage::Static,
            build_type: BuildType::Release,
            version: Version::default(),
            features: BTreeSet::new(),
            position_independent: true,
        }
    }
}

impl BuildConfiguration {
    /// Creates a release, static configuration for `platform` at `version`.
    #[must_use]
    pub fn new(platform: PlatformFamily, version: Version) -> Self {
        Self {
            platform,
            version,
            ..Self::default()
        }
    }

    /// Sets the linkage.
    #[must_use]
    pub const fn with_linkage(mut self, linkage: Linkage) -> Self {
        self.linkage = linkage;
        self
    }

    /// Sets the build type.
    #[must_use]
    pub const fn with_build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = build_type;
        self
    }

    /// Enables a feature flag.
    #[must_use]
    pub fn with_feature(mut self, feature: impl Into<String>) -> Self {
        let _ = self.features.insert(feature.into());
        self
    }

    /// Returns `true` for shared linkage.
    #[must_use]
    pub fn is_shared(&self) -> bool {
        self.linkage == Linkage::Shared
    }

    /// Returns `true` for debug builds.
    #[must_use]
    pub const fn is_debug(&self) -> bool {
        self.build_type.is_debug()
    }

    /// Whether the position-independent-code option applies at all.
    ///
    /// Returns `None` on Windows and for shared linkage, where the option
    /// is meaningless, otherwise the requested value.
    #[must_use]
    pub fn effective_position_independent(&self) -> Option<bool> {
        if self.platform == PlatformFamily::Windows || self.is_shared() {
            None
        } else {
            Some(self.position_independent)
        }
    }

    /// Loads a configuration from a YAML or JSON file.
    ///
    /// The format is chosen by extension: `.json` is parsed as JSON,
    /// anything else as YAML. Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PlanError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        if path.extension().is_some_and(|ext| ext == "json") {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(serde_yaml::from_str(&content)?)
        }
    }
}
