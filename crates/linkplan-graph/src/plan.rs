//! Resolved build and link plan.
//!
//! The plan is the only output of resolution. It lists components with
//! dependencies first and carries everything an external build/link step
//! needs to turn it into compiler and linker flags.

use std::collections::{BTreeSet, HashSet};

use linkplan_common::config::BuildConfiguration;
use linkplan_common::error::Result;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::package::PackageRequirement;

/// A component with its metadata resolved for one configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedComponent {
    /// Component name.
    pub name: String,
    /// Package-scoped key, e.g. `openexr_iex`.
    pub key: String,
    /// Build-system target name, e.g. `OpenEXR::Iex`.
    pub target: String,
    /// Concrete library file name, absent for config-only components.
    pub library: Option<String>,
    /// Package include directories followed by the component's own.
    pub include_dirs: Vec<String>,
    /// Directly required components, verbatim and not flattened.
    pub requires: Vec<String>,
    /// External package references active for this configuration.
    pub external: Vec<String>,
    /// System libraries whose platform predicate matched.
    pub system_libs: Vec<String>,
}

/// Ordered plan for one build configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPlan {
    /// Package name.
    pub package: String,
    /// Build-system package file name.
    pub file_name: Option<String>,
    /// pkg-config module name.
    pub pkg_config_name: Option<String>,
    /// Configuration the plan was resolved for.
    pub config: BuildConfiguration,
    /// Effective features (explicit plus version-threshold).
    pub features: BTreeSet<String>,
    /// Position-independent-code option, `None` where it does not apply.
    pub position_independent: Option<bool>,
    /// Directories to add to `PATH`.
    pub bin_dirs: Vec<String>,
    /// Package-level requirements active for this configuration.
    pub requirements: Vec<PackageRequirement>,
    /// Components, every one after all components it requires.
    pub components: Vec<ResolvedComponent>,
}

impl ResolvedPlan {
    /// Component names in plan order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.components.iter().map(|c| c.name.as_str()).collect()
    }

    /// Looks up a component by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ResolvedComponent> {
        self.components.iter().find(|c| c.name == name)
    }

    /// Position of a component in the plan.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.components.iter().position(|c| c.name == name)
    }

    /// Library file names in plan order (dependencies first).
    #[must_use]
    pub fn libraries(&self) -> Vec<&str> {
        self.components.iter().filter_map(|c| c.library.as_deref()).collect()
    }

    /// Library file names in the order a single-pass linker wants them:
    /// dependents before their dependencies.
    #[must_use]
    pub fn link_order(&self) -> Vec<&str> {
        let mut libs = self.libraries();
        libs.reverse();
        libs
    }

    /// Every system library in the plan, first occurrence kept.
    #[must_use]
    pub fn system_libs(&self) -> Vec<&str> {
        unique(self.components.iter().flat_map(|c| &c.system_libs))
    }

    /// Every external package reference in the plan, first occurrence kept.
    #[must_use]
    pub fn external_requirements(&self) -> Vec<&str> {
        unique(self.components.iter().flat_map(|c| &c.external))
    }

    /// Hex SHA-256 of the plan's JSON serialization.
    ///
    /// Equal plans always produce equal fingerprints.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan cannot be serialized.
    pub fn fingerprint(&self) -> Result<String> {
        let bytes = serde_json::to_vec(self)?;
        Ok(format!("{:x}", Sha256::digest(&bytes)))
    }
}

fn unique<'a>(items: impl Iterator<Item = &'a String>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    items
        .map(String::as_str)
        .filter(|item| seen.insert(*item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(name: &str, library: Option<&str>, system_libs: &[&str], external: &[&str]) -> ResolvedComponent {
        ResolvedComponent {
            name: name.into(),
            key: name.to_lowercase(),
            target: name.into(),
            library: library.map(Into::into),
            include_dirs: vec!["include".into()],
            requires: Vec::new(),
            external: external.iter().map(|s| (*s).to_string()).collect(),
            system_libs: system_libs.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    fn sample() -> ResolvedPlan {
        ResolvedPlan {
            package: "demo".into(),
            file_name: None,
            pkg_config_name: None,
            config: BuildConfiguration::default(),
            features: BTreeSet::new(),
            position_independent: Some(true),
            bin_dirs: vec!["bin".into()],
            requirements: vec![PackageRequirement::new("zlib", ">=1.2.11 <2")],
            components: vec![
                component("Config", None, &[], &[]),
                component("Core", Some("Core-0_0"), &["m"], &["zlib::zlib"]),
                component("Thread", Some("Thread-0_0"), &["pthread", "m"], &[]),
                component("Top", Some("Top-0_0"), &["m"], &["zlib::zlib", "imath::imath"]),
            ],
        }
    }

    #[test]
    fn libraries_skip_config_only_components() {
        let plan = sample();
        assert_eq!(plan.libraries(), vec!["Core-0_0", "Thread-0_0", "Top-0_0"]);
        assert_eq!(plan.link_order(), vec!["Top-0_0", "Thread-0_0", "Core-0_0"]);
    }

    #[test]
    fn merged_lists_keep_first_occurrence() {
        let plan = sample();
        assert_eq!(plan.system_libs(), vec!["m", "pthread"]);
        assert_eq!(plan.external_requirements(), vec!["zlib::zlib", "imath::imath"]);
    }

    #[test]
    fn lookup_by_name() {
        let plan = sample();
        assert_eq!(plan.position("Thread"), Some(2));
        assert!(plan.get("Core").is_some());
        assert!(plan.get("Nope").is_none());
        assert_eq!(plan.names(), vec!["Config", "Core", "Thread", "Top"]);
    }

    #[test]
    fn fingerprint_is_stable_and_sensitive() {
        let plan = sample();
        let a = plan.fingerprint().expect("fingerprint");
        let b = plan.clone().fingerprint().expect("fingerprint");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);

        let mut changed = plan;
        changed.components[1].library = Some("Core-0_0_d".into());
        assert_ne!(changed.fingerprint().expect("fingerprint"), a);
    }

    #[test]
    fn plan_serialization_roundtrip() {
        let plan = sample();
        let json = serde_json::to_string(&plan).expect("serialize");
        let back: ResolvedPlan = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, plan);
    }
}
