//! Package-wide metadata shared by every component.

use std::collections::BTreeSet;

use linkplan_common::config::BuildConfiguration;
use linkplan_common::constants::{DEFAULT_BIN_DIR, DEFAULT_INCLUDE_DIR, TARGET_NAMESPACE_SEPARATOR};
use linkplan_common::version::Version;
use serde::{Deserialize, Serialize};

use crate::component::Component;

/// Feature that switches on once the packaged version reaches a threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionFeature {
    /// Feature flag name.
    pub feature: String,
    /// First version the feature applies to.
    pub min_version: Version,
}

/// Another package this one depends on.
///
/// The version range is kept verbatim (`">=1.2.11 <2"`); choosing and
/// fetching a matching version is left to the downstream step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageRequirement {
    /// Required package name.
    pub name: String,
    /// Accepted version range.
    pub version_range: String,
    /// Whether consumers of this package also see the dependency's headers.
    #[serde(default)]
    pub transitive_headers: bool,
    /// Feature the requirement depends on, if any.
    #[serde(default)]
    pub feature: Option<String>,
}

impl PackageRequirement {
    /// Creates an unconditional requirement.
    #[must_use]
    pub fn new(name: impl Into<String>, version_range: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version_range: version_range.into(),
            transitive_headers: false,
            feature: None,
        }
    }

    /// Marks the dependency's headers as visible to consumers.
    #[must_use]
    pub const fn with_transitive_headers(mut self) -> Self {
        self.transitive_headers = true;
        self
    }

    /// Gates the requirement on `feature`.
    #[must_use]
    pub fn when(mut self, feature: impl Into<String>) -> Self {
        self.feature = Some(feature.into());
        self
    }

    /// Whether the requirement applies under `features`.
    #[must_use]
    pub fn is_active(&self, features: &BTreeSet<String>) -> bool {
        self.feature.as_ref().is_none_or(|f| features.contains(f))
    }

    /// `name/[range]` reference form.
    #[must_use]
    pub fn reference(&self) -> String {
        format!("{}/[{}]", self.name, self.version_range)
    }
}

/// Naming and defaults of the package the components belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackageInfo {
    /// Package name, used as the component key prefix.
    pub name: String,
    /// Build-system target namespace (`OpenEXR` in `OpenEXR::Iex`).
    pub namespace: Option<String>,
    /// Build-system package file name.
    pub file_name: Option<String>,
    /// pkg-config module name.
    pub pkg_config_name: Option<String>,
    /// Include directories every component starts with.
    pub include_dirs: Vec<String>,
    /// Directories holding executables, for `PATH`.
    pub bin_dirs: Vec<String>,
    /// Features enabled by version thresholds.
    pub version_features: Vec<VersionFeature>,
    /// Packages this one depends on, in declaration order.
    pub requirements: Vec<PackageRequirement>,
}

impl Default for PackageInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            namespace: None,
            file_name: None,
            pkg_config_name: None,
            include_dirs: vec![DEFAULT_INCLUDE_DIR.to_string()],
            bin_dirs: vec![DEFAULT_BIN_DIR.to_string()],
            version_features: Vec::new(),
            requirements: Vec::new(),
        }
    }
}

impl PackageInfo {
    /// Creates package metadata with default directories.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the target namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Adds a version-threshold feature.
    #[must_use]
    pub fn with_version_feature(mut self, feature: impl Into<String>, min_version: Version) -> Self {
        self.version_features.push(VersionFeature {
            feature: feature.into(),
            min_version,
        });
        self
    }

    /// Adds a package-level requirement.
    #[must_use]
    pub fn with_requirement(mut self, requirement: PackageRequirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    /// Requirements whose feature gate is satisfied by `features`.
    #[must_use]
    pub fn active_requirements(&self, features: &BTreeSet<String>) -> Vec<PackageRequirement> {
        self.requirements
            .iter()
            .filter(|req| req.is_active(features))
            .cloned()
            .collect()
    }

    /// Package-scoped key of a component: `<package>_<component lowercased>`.
    #[must_use]
    pub fn component_key(&self, component: &str) -> String {
        let lowered = component.to_lowercase();
        if self.name.is_empty() {
            lowered
        } else {
            format!("{}_{lowered}", self.name.to_lowercase())
        }
    }

    /// Build-system target name of a component.
    #[must_use]
    pub fn target_name(&self, component: &Component) -> String {
        if let Some(target) = component.target() {
            return target.to_string();
        }
        match &self.namespace {
            Some(ns) => format!("{ns}{TARGET_NAMESPACE_SEPARATOR}{}", component.name()),
            None => component.name().to_string(),
        }
    }

    /// Explicit configuration features plus every reached version threshold.
    #[must_use]
    pub fn effective_features(&self, config: &BuildConfiguration) -> BTreeSet<String> {
        let mut features = config.features.clone();
        features.extend(
            self.version_features
                .iter()
                .filter(|vf| config.version >= vf.min_version)
                .map(|vf| vf.feature.clone()),
        );
        features
    }
}
