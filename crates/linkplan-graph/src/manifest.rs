//! Declarative manifests in YAML or JSON.
//!
//! A manifest holds the package metadata and a list of component
//! declarations. Declarations go through [`ComponentBuilder`] so a manifest
//! can never produce a component the builder would reject.
//!
//! Every table rejects unknown keys, so a misspelled key fails to parse
//! instead of silently changing the plan. Versions are quoted strings
//! (`"3.2"`) or bare integers.

use std::path::Path;

use linkplan_common::error::{PlanError, Result};
use linkplan_common::types::PlatformFamily;
use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentBuilder, PlatformPredicate};
use crate::package::PackageInfo;
use crate::resolver::ComponentGraph;
use crate::validator;

/// Root of a manifest document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestFile {
    /// Package metadata.
    pub package: PackageInfo,
    /// Component declarations, in registration order.
    pub components: Vec<ComponentDecl>,
}

/// A component as written in a manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentDecl {
    /// Component name.
    pub name: String,
    /// Library base name; omitted for config-only components.
    #[serde(default)]
    pub library: Option<String>,
    /// Whether the library follows the version and debug suffix rules.
    #[serde(default = "default_versioned")]
    pub versioned: bool,
    /// Extra include directories.
    #[serde(default)]
    pub include_dirs: Vec<String>,
    /// Required component names.
    #[serde(default)]
    pub requires: Vec<String>,
    /// Required external packages.
    #[serde(default)]
    pub external: Vec<ExternalDecl>,
    /// Platform-gated system library groups.
    #[serde(default)]
    pub system_libs: Vec<SystemLibsDecl>,
    /// Explicit build-system target name.
    #[serde(default)]
    pub target: Option<String>,
}

const fn default_versioned() -> bool {
    true
}

/// An external requirement: a bare reference or a feature-gated one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExternalDecl {
    /// Always required.
    Plain(String),
    /// Required only when its feature is active, if given.
    Gated(GatedExternalDecl),
}

/// Long form of an external requirement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatedExternalDecl {
    /// Opaque package reference.
    pub reference: String,
    /// Gating feature.
    #[serde(default)]
    pub feature: Option<String>,
}

/// A group of system libraries and the platforms it applies to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemLibsDecl {
    /// Library names.
    pub libs: Vec<String>,
    /// Only these platforms.
    #[serde(default)]
    pub platforms: Option<Vec<PlatformFamily>>,
    /// Every platform except these.
    #[serde(default)]
    pub except: Option<Vec<PlatformFamily>>,
}

impl SystemLibsDecl {
    fn predicate(&self, component: &str) -> Result<PlatformPredicate> {
        match (&self.platforms, &self.except) {
            (Some(_), Some(_)) => Err(PlanError::Config {
                message: format!(
                    "component \"{component}\": system_libs group sets both `platforms` and `except`"
                ),
            }),
            (Some(only), None) => Ok(PlatformPredicate::OneOf(only.clone())),
            (None, Some(except)) => Ok(PlatformPredicate::NoneOf(except.clone())),
            (None, None) => Ok(PlatformPredicate::Any),
        }
    }
}

impl ComponentDecl {
    /// Converts the declaration into a component.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Config`] if the builder rejects a field or a
    /// system library group is ambiguous.
    pub fn into_component(self) -> Result<Component> {
        let mut builder = ComponentBuilder::new(self.name.clone());
        builder = match (self.library, self.versioned) {
            (Some(base), true) => builder.library(base),
            (Some(base), false) => builder.unversioned_library(base),
            (None, _) => builder,
        };
        for dir in self.include_dirs {
            builder = builder.include_dir(dir);
        }
        builder = builder.requires_all(self.requires);
        for external in self.external {
            builder = match external {
                ExternalDecl::Plain(reference)
                | ExternalDecl::Gated(GatedExternalDecl {
                    reference,
                    feature: None,
                }) => builder.external(reference),
                ExternalDecl::Gated(GatedExternalDecl {
                    reference,
                    feature: Some(feature),
                }) => builder.external_when(reference, feature),
            };
        }
        for group in self.system_libs {
            let predicate = group.predicate(&self.name)?;
            builder = builder.system_libs(predicate, group.libs);
        }
        if let Some(target) = self.target {
            builder = builder.target(target);
        }
        builder.build()
    }
}

/// A parsed manifest whose components passed the builder checks.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Package metadata.
    pub package: PackageInfo,
    /// Components in declaration order, duplicates included.
    pub components: Vec<Component>,
}

impl Manifest {
    /// Parses a YAML manifest.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Manifest`] for malformed YAML and
    /// [`PlanError::Config`] for invalid declarations.
    pub fn from_yaml(input: &str) -> Result<Self> {
        let file: ManifestFile = serde_yaml::from_str(input)?;
        Self::from_file(file)
    }

    /// Parses a JSON manifest.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Serialization`] for malformed JSON and
    /// [`PlanError::Config`] for invalid declarations.
    pub fn from_json(input: &str) -> Result<Self> {
        let file: ManifestFile = serde_json::from_str(input)?;
        Self::from_file(file)
    }

    /// Loads a manifest file; `.json` files are parsed as JSON, others as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        tracing::info!(path = %path.display(), "loading manifest");
        let content = std::fs::read_to_string(path).map_err(|e| PlanError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    fn from_file(file: ManifestFile) -> Result<Self> {
        let components = file
            .components
            .into_iter()
            .map(ComponentDecl::into_component)
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(
            package = %file.package.name,
            components = components.len(),
            "manifest parsed"
        );
        Ok(Self {
            package: file.package,
            components,
        })
    }

    /// Every problem in the declared component set.
    #[must_use]
    pub fn diagnose(&self) -> Vec<PlanError> {
        validator::diagnose(&self.components)
    }

    /// Registers every component into a fresh graph.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::DuplicateComponent`] on the first repeated name.
    pub fn into_graph(self) -> Result<ComponentGraph> {
        let mut graph = ComponentGraph::new(self.package);
        for component in self.components {
            graph.register(component)?;
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use linkplan_common::config::BuildConfiguration;
    use linkplan_common::version::Version;

    use super::*;

    const SAMPLE: &str = r#"
package:
  name: demo
  namespace: Demo
  version_features:
    - feature: fast
      min_version: "2.0"
  requirements:
    - name: zlib
      version_range: ">=1.2.11 <2"
    - name: fast
      version_range: ">=1 <2"
      feature: fast
components:
  - name: Config
    include_dirs: [include/demo]
  - name: Core
    library: Core
    requires: [Config]
    external:
      - "zlib::zlib"
      - reference: "fast::fast"
        feature: fast
    system_libs:
      - libs: [m]
        platforms: [linux, freebsd]
      - libs: [ws2_32]
        except: [linux, freebsd, macos]
  - name: Plugin
    library: demo_plugin
    versioned: false
    requires: [Core]
    target: "Demo::plugin"
"#;

    #[test]
    fn parse_yaml_manifest() {
        let manifest = Manifest::from_yaml(SAMPLE).expect("parse");
        assert_eq!(manifest.package.name, "demo");
        assert_eq!(manifest.components.len(), 3);
        let core = &manifest.components[1];
        assert_eq!(core.external().len(), 2);
        assert_eq!(core.external()[1].feature.as_deref(), Some("fast"));
        assert_eq!(core.system_libs().len(), 2);
    }

    #[test]
    fn manifest_resolves_end_to_end() {
        let graph = Manifest::from_yaml(SAMPLE)
            .and_then(Manifest::into_graph)
            .expect("graph");
        let config = BuildConfiguration::new(PlatformFamily::Windows, Version::new(2, 1, 0));
        let plan = graph.resolve(&config).expect("resolve");

        assert_eq!(plan.names(), vec!["Config", "Core", "Plugin"]);
        let core = plan.get("Core").expect("core");
        assert_eq!(core.library.as_deref(), Some("Core-2_1"));
        assert_eq!(core.external, vec!["zlib::zlib", "fast::fast"]);
        assert_eq!(core.system_libs, vec!["ws2_32"]);
        assert_eq!(core.target, "Demo::Core");
        assert_eq!(plan.requirements.len(), 2);

        let plugin = plan.get("Plugin").expect("plugin");
        assert_eq!(plugin.library.as_deref(), Some("demo_plugin"));
        assert_eq!(plugin.target, "Demo::plugin");
        assert_eq!(plan.get("Config").expect("config").include_dirs, vec!["include", "include/demo"]);
    }

    #[test]
    fn json_manifest_is_accepted() {
        let json = r#"{"package":{"name":"j"},"components":[{"name":"a"},{"name":"b","requires":["a"]}]}"#;
        let manifest = Manifest::from_json(json).expect("parse");
        let plan = manifest
            .into_graph()
            .and_then(|g| g.resolve(&BuildConfiguration::default()))
            .expect("resolve");
        assert_eq!(plan.names(), vec!["a", "b"]);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = Manifest::from_yaml("components:\n  - name: a\n    requirez: [b]\n").unwrap_err();
        assert!(matches!(err, PlanError::Manifest { .. }), "got: {err}");
    }

    #[test]
    fn misspelled_external_gate_is_rejected() {
        let yaml = "components:\n  - name: Core\n    external:\n      - reference: \"libdeflate::libdeflate\"\n        featur: libdeflate\n";
        let err = Manifest::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, PlanError::Manifest { .. }), "got: {err}");
    }

    #[test]
    fn unknown_package_key_is_rejected() {
        let yaml = "package:\n  name: p\n  version_feature:\n    - feature: libdeflate\n      min_version: \"3.2\"\ncomponents: []\n";
        let err = Manifest::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("version_feature"), "got: {err}");
    }

    #[test]
    fn unquoted_decimal_version_is_rejected() {
        let yaml = "package:\n  name: p\n  version_features:\n    - feature: fast\n      min_version: 3.2\n";
        let err = Manifest::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("quote it"), "got: {err}");
    }

    #[test]
    fn package_requirements_are_parsed() {
        let manifest = Manifest::from_yaml(SAMPLE).expect("parse");
        let requirements = &manifest.package.requirements;
        assert_eq!(requirements.len(), 2);
        assert_eq!(requirements[0].name, "zlib");
        assert_eq!(requirements[0].version_range, ">=1.2.11 <2");
        assert_eq!(requirements[1].feature.as_deref(), Some("fast"));
    }

    #[test]
    fn ambiguous_system_lib_group_is_rejected() {
        let yaml = "components:\n  - name: a\n    system_libs:\n      - libs: [m]\n        platforms: [linux]\n        except: [windows]\n";
        let err = Manifest::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("both"), "got: {err}");
    }

    #[test]
    fn duplicates_survive_parsing_but_not_registration() {
        let yaml = "components:\n  - name: a\n  - name: a\n";
        let manifest = Manifest::from_yaml(yaml).expect("parse");
        assert_eq!(manifest.diagnose().len(), 1);
        let err = manifest.into_graph().unwrap_err();
        assert!(matches!(err, PlanError::DuplicateComponent { .. }));
    }

    #[test]
    fn load_from_disk_by_extension() {
        let dir = tempfile::tempdir().expect("tempdir");
        let yaml_path = dir.path().join("linkplan.yaml");
        std::fs::write(&yaml_path, SAMPLE).expect("write");
        assert_eq!(Manifest::load(&yaml_path).expect("load").components.len(), 3);

        let json_path = dir.path().join("linkplan.json");
        std::fs::write(&json_path, r#"{"components":[{"name":"only"}]}"#).expect("write");
        assert_eq!(Manifest::load(&json_path).expect("load").components.len(), 1);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = Manifest::load(Path::new("/nonexistent/linkplan.yaml")).unwrap_err();
        assert!(matches!(err, PlanError::Io { .. }));
    }
}
