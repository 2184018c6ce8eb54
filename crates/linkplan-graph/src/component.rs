//! Component definitions and their builder.
//!
//! A [`Component`] is an immutable value: every field is collected by
//! [`ComponentBuilder`] and checked once in [`ComponentBuilder::build`].

use std::collections::BTreeSet;

use linkplan_common::error::{PlanError, Result};
use linkplan_common::types::PlatformFamily;

/// Condition over the target platform gating a group of system libraries.
#[derive(Debug, Clone)]
pub enum PlatformPredicate {
    /// Matches every platform.
    Any,
    /// Matches only the listed platforms.
    OneOf(Vec<PlatformFamily>),
    /// Matches every platform except the listed ones.
    NoneOf(Vec<PlatformFamily>),
    /// Arbitrary predicate supplied by the caller.
    Custom(fn(PlatformFamily) -> bool),
}

impl PlatformPredicate {
    /// Linux and FreeBSD, where the C math and thread libraries are separate.
    #[must_use]
    pub fn unix_like() -> Self {
        Self::OneOf(vec![PlatformFamily::Linux, PlatformFamily::FreeBsd])
    }

    /// Returns `true` if the predicate holds for `platform`.
    #[must_use]
    pub fn matches(&self, platform: PlatformFamily) -> bool {
        match self {
            Self::Any => true,
            Self::OneOf(platforms) => platforms.contains(&platform),
            Self::NoneOf(platforms) => !platforms.contains(&platform),
            Self::Custom(predicate) => predicate(platform),
        }
    }
}

/// Library produced by a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryTemplate {
    /// Base file name without prefix, suffix or extension.
    pub base: String,
    /// Whether the version and debug suffix rules apply.
    pub versioned: bool,
}

/// External package reference, optionally gated on a feature flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalRequirement {
    /// Opaque reference such as `zlib::zlib`.
    pub reference: String,
    /// Feature that must be active for the requirement to apply.
    pub feature: Option<String>,
}

impl ExternalRequirement {
    /// Returns `true` if the requirement applies under `features`.
    #[must_use]
    pub fn is_active(&self, features: &BTreeSet<String>) -> bool {
        self.feature.as_ref().is_none_or(|f| features.contains(f))
    }
}

/// System libraries linked only on matching platforms.
#[derive(Debug, Clone)]
pub struct SystemLibGroup {
    /// Library names as passed to the linker (`m`, `pthread`).
    pub libs: Vec<String>,
    /// Platforms the group applies to.
    pub predicate: PlatformPredicate,
}

/// A named, independently linkable unit of a package.
#[derive(Debug, Clone)]
pub struct Component {
    name: String,
    library: Option<LibraryTemplate>,
    include_dirs: Vec<String>,
    requires: Vec<String>,
    external: Vec<ExternalRequirement>,
    system_libs: Vec<SystemLibGroup>,
    target: Option<String>,
}

impl Component {
    /// Starts building a component named `name`.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ComponentBuilder {
        ComponentBuilder::new(name)
    }

    /// Unique component name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Library template, if the component produces a library.
    #[must_use]
    pub const fn library(&self) -> Option<&LibraryTemplate> {
        self.library.as_ref()
    }

    /// Include directories added on top of the package defaults.
    #[must_use]
    pub fn include_dirs(&self) -> &[String] {
        &self.include_dirs
    }

    /// Directly required component names, in declaration order.
    #[must_use]
    pub fn requires(&self) -> &[String] {
        &self.requires
    }

    /// Required external package references, in declaration order.
    #[must_use]
    pub fn external(&self) -> &[ExternalRequirement] {
        &self.external
    }

    /// Platform-gated system library groups.
    #[must_use]
    pub fn system_libs(&self) -> &[SystemLibGroup] {
        &self.system_libs
    }

    /// Explicit build-system target name, overriding the package default.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }
}

/// Builder collecting every field of a [`Component`] up front.
#[derive(Debug)]
pub struct ComponentBuilder {
    name: String,
    library: Option<LibraryTemplate>,
    include_dirs: Vec<String>,
    requires: Vec<String>,
    external: Vec<ExternalRequirement>,
    system_libs: Vec<SystemLibGroup>,
    target: Option<String>,
}

impl ComponentBuilder {
    /// Creates a builder for a component named `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            library: None,
            include_dirs: Vec::new(),
            requires: Vec::new(),
            external: Vec::new(),
            system_libs: Vec::new(),
            target: None,
        }
    }

    /// Declares a library that follows the version and debug suffix rules.
    #[must_use]
    pub fn library(mut self, base: impl Into<String>) -> Self {
        self.library = Some(LibraryTemplate {
            base: base.into(),
            versioned: true,
        });
        self
    }

    /// Declares a library whose file name is used verbatim.
    #[must_use]
    pub fn unversioned_library(mut self, base: impl Into<String>) -> Self {
        self.library = Some(LibraryTemplate {
            base: base.into(),
            versioned: false,
        });
        self
    }

    /// Adds an include directory.
    #[must_use]
    pub fn include_dir(mut self, dir: impl Into<String>) -> Self {
        self.include_dirs.push(dir.into());
        self
    }

    /// Adds a required component.
    #[must_use]
    pub fn requires(mut self, component: impl Into<String>) -> Self {
        self.requires.push(component.into());
        self
    }

    /// Adds several required components, keeping their order.
    #[must_use]
    pub fn requires_all<I, S>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requires.extend(components.into_iter().map(Into::into));
        self
    }

    /// Adds an unconditional external package reference.
    #[must_use]
    pub fn external(mut self, reference: impl Into<String>) -> Self {
        self.external.push(ExternalRequirement {
            reference: reference.into(),
            feature: None,
        });
        self
    }

    /// Adds an external package reference active only with `feature`.
    #[must_use]
    pub fn external_when(mut self, reference: impl Into<String>, feature: impl Into<String>) -> Self {
        self.external.push(ExternalRequirement {
            reference: reference.into(),
            feature: Some(feature.into()),
        });
        self
    }

    /// Adds a group of system libraries gated on `predicate`.
    #[must_use]
    pub fn system_libs<I, S>(mut self, predicate: PlatformPredicate, libs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.system_libs.push(SystemLibGroup {
            libs: libs.into_iter().map(Into::into).collect(),
            predicate,
        });
        self
    }

    /// Overrides the build-system target name.
    #[must_use]
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Finishes the component. The name and requirement names are trimmed
    /// so they match each other at registration.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Config`] if the name, library base name, a
    /// requirement, an external reference or a system library is empty.
    pub fn build(self) -> Result<Component> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(invalid("component name must not be empty".into()));
        }
        if self.library.as_ref().is_some_and(|l| l.base.trim().is_empty()) {
            return Err(invalid(format!("component \"{name}\" has an empty library name")));
        }
        if self.requires.iter().any(|r| r.trim().is_empty()) {
            return Err(invalid(format!("component \"{name}\" requires an empty component name")));
        }
        if self.external.iter().any(|e| e.reference.trim().is_empty()) {
            return Err(invalid(format!("component \"{name}\" has an empty external reference")));
        }
        if self
            .system_libs
            .iter()
            .flat_map(|g| &g.libs)
            .any(|l| l.trim().is_empty())
        {
            return Err(invalid(format!("component \"{name}\" has an empty system library")));
        }

        Ok(Component {
            name,
            library: self.library,
            include_dirs: self.include_dirs,
            requires: self.requires.iter().map(|r| r.trim().to_string()).collect(),
            external: self.external,
            system_libs: self.system_libs,
            target: self.target,
        })
    }
}

const fn invalid(message: String) -> PlanError {
    PlanError::Config { message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_all_fields() {
        let component = Component::builder("IlmThread")
            .library("IlmThread")
            .requires_all(["IlmThreadConfig", "Iex"])
            .external("imath::imath")
            .system_libs(PlatformPredicate::unix_like(), ["pthread", "m"])
            .build()
            .expect("build");

        assert_eq!(component.name(), "IlmThread");
        assert_eq!(component.requires(), ["IlmThreadConfig", "Iex"]);
        assert_eq!(component.external().len(), 1);
        assert_eq!(component.system_libs()[0].libs, vec!["pthread", "m"]);
        let library = component.library().expect("library");
        assert!(library.versioned);
    }

    #[test]
    fn config_only_component_has_no_library() {
        let component = Component::builder("OpenEXRConfig")
            .include_dir("include/OpenEXR")
            .build()
            .expect("build");
        assert!(component.library().is_none());
        assert_eq!(component.include_dirs(), ["include/OpenEXR"]);
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = Component::builder("  ").build().unwrap_err();
        assert!(err.to_string().contains("must not be empty"), "got: {err}");
    }

    #[test]
    fn empty_requirement_is_rejected() {
        let err = Component::builder("a").requires("").build().unwrap_err();
        assert!(err.to_string().contains("\"a\""), "got: {err}");
    }

    #[test]
    fn empty_library_base_is_rejected() {
        assert!(Component::builder("a").library("").build().is_err());
    }

    #[test]
    fn predicates_match_expected_platforms() {
        let unix = PlatformPredicate::unix_like();
        assert!(unix.matches(PlatformFamily::Linux));
        assert!(unix.matches(PlatformFamily::FreeBsd));
        assert!(!unix.matches(PlatformFamily::Windows));

        let not_windows = PlatformPredicate::NoneOf(vec![PlatformFamily::Windows]);
        assert!(not_windows.matches(PlatformFamily::Macos));
        assert!(!not_windows.matches(PlatformFamily::Windows));

        assert!(PlatformPredicate::Any.matches(PlatformFamily::Ios));

        let apple = PlatformPredicate::Custom(|p| matches!(p, PlatformFamily::Macos | PlatformFamily::Ios));
        assert!(apple.matches(PlatformFamily::Ios));
        assert!(!apple.matches(PlatformFamily::Android));
    }

    #[test]
    fn gated_external_follows_features() {
        let gated = ExternalRequirement {
            reference: "libdeflate::libdeflate".into(),
            feature: Some("libdeflate".into()),
        };
        let mut features = BTreeSet::new();
        assert!(!gated.is_active(&features));
        let _ = features.insert("libdeflate".to_string());
        assert!(gated.is_active(&features));
    }

    #[test]
    fn requirement_names_are_trimmed_like_the_name() {
        let component = Component::builder(" B ").requires(" A ").build().expect("build");
        assert_eq!(component.name(), "B");
        assert_eq!(component.requires(), ["A"]);
    }
}
