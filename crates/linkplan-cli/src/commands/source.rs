//! Arguments shared by commands: where components come from and which
//! build configuration to resolve for.

use std::path::{Path, PathBuf};

use clap::Args;
use linkplan_common::config::BuildConfiguration;
use linkplan_common::constants::DEFAULT_MANIFEST;
use linkplan_common::types::{BuildType, Linkage, PlatformFamily};
use linkplan_common::version::Version;
use linkplan_graph::ComponentGraph;
use linkplan_graph::catalog;
use linkplan_graph::manifest::Manifest;

/// Selects a manifest file or a built-in preset.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Path to a YAML or JSON manifest (defaults to `linkplan.yaml`).
    #[arg(short, long, conflicts_with = "preset")]
    pub manifest: Option<PathBuf>,

    /// Name of a built-in preset instead of a manifest file.
    #[arg(short, long)]
    pub preset: Option<String>,
}

impl SourceArgs {
    /// Loads the selected manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the preset is unknown or the file cannot be
    /// read or parsed.
    pub fn load_manifest(&self) -> anyhow::Result<Manifest> {
        let manifest = match (&self.preset, &self.manifest) {
            (Some(name), _) => catalog::load_manifest(name)?,
            (None, Some(path)) => Manifest::load(path)?,
            (None, None) => Manifest::load(Path::new(DEFAULT_MANIFEST))?,
        };
        Ok(manifest)
    }

    /// Loads the selected manifest and registers its components.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or a component name repeats.
    pub fn load_graph(&self) -> anyhow::Result<ComponentGraph> {
        Ok(self.load_manifest()?.into_graph()?)
    }
}

/// Build configuration flags. Flags override values from `--config`.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// YAML or JSON file holding a build configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Target platform family (linux, freebsd, windows, macos, android, ios).
    #[arg(long)]
    pub platform: Option<PlatformFamily>,

    /// Linkage (static or shared).
    #[arg(long, conflicts_with = "shared")]
    pub linkage: Option<Linkage>,

    /// Shorthand for `--linkage shared`.
    #[arg(long)]
    pub shared: bool,

    /// Build type (Release, Debug, RelWithDebInfo, MinSizeRel).
    #[arg(long, conflicts_with = "debug")]
    pub build_type: Option<BuildType>,

    /// Shorthand for `--build-type Debug`.
    #[arg(long)]
    pub debug: bool,

    /// Version of the packaged library.
    #[arg(long = "lib-version")]
    pub version: Option<Version>,

    /// Enable a feature flag (repeatable).
    #[arg(long = "feature")]
    pub features: Vec<String>,

    /// Do not request position-independent code.
    #[arg(long)]
    pub no_pic: bool,
}

impl ConfigArgs {
    /// Builds the configuration: file (or defaults) first, then flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be loaded.
    pub fn to_config(&self) -> anyhow::Result<BuildConfiguration> {
        let mut config = match &self.config {
            Some(path) => BuildConfiguration::load(path)?,
            None => BuildConfiguration::default(),
        };
        if let Some(platform) = self.platform {
            config.platform = platform;
        }
        if let Some(linkage) = self.linkage {
            config.linkage = linkage;
        }
        if self.shared {
            config.linkage = Linkage::Shared;
        }
        if let Some(build_type) = self.build_type {
            config.build_type = build_type;
        }
        if self.debug {
            config.build_type = BuildType::Debug;
        }
        if let Some(version) = self.version {
            config.version = version;
        }
        config.features.extend(self.features.iter().cloned());
        if self.no_pic {
            config.position_independent = false;
        }
        tracing::debug!(?config, "build configuration");
        Ok(config)
    }
}
