//! Component registry and plan resolution.
//!
//! A [`ComponentGraph`] is filled with [`ComponentGraph::register`] and then
//! resolved through a shared reference. Registration needs `&mut self`, so a
//! graph cannot change while any resolve is in flight.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::num::NonZeroUsize;

use linkplan_common::config::BuildConfiguration;
use linkplan_common::error::{PlanError, Result};

use crate::component::Component;
use crate::graph::DependencyGraph;
use crate::naming;
use crate::package::PackageInfo;
use crate::plan::{ResolvedComponent, ResolvedPlan};
use crate::validator;

/// Per-resolve values derived once from the configuration.
#[derive(Debug)]
pub struct ResolveContext<'a> {
    /// Configuration being resolved.
    pub config: &'a BuildConfiguration,
    /// Effective feature set.
    pub features: BTreeSet<String>,
    /// Library suffix shared by every versioned library.
    pub suffix: String,
}

impl<'a> ResolveContext<'a> {
    /// Derives the context for `config` under `package`.
    #[must_use]
    pub fn new(package: &PackageInfo, config: &'a BuildConfiguration) -> Self {
        Self {
            config,
            features: package.effective_features(config),
            suffix: naming::library_suffix(config),
        }
    }
}

/// Resolves one component's metadata. Pure: depends only on its arguments.
#[must_use]
pub fn resolve_component(component: &Component, package: &PackageInfo, ctx: &ResolveContext<'_>) -> ResolvedComponent {
    let library = component
        .library()
        .map(|template| naming::library_file_name(template, &ctx.suffix));

    let mut include_dirs = package.include_dirs.clone();
    for dir in component.include_dirs() {
        if !include_dirs.contains(dir) {
            include_dirs.push(dir.clone());
        }
    }

    let external = component
        .external()
        .iter()
        .filter(|req| req.is_active(&ctx.features))
        .map(|req| req.reference.clone())
        .collect();

    let mut seen = HashSet::new();
    let system_libs = component
        .system_libs()
        .iter()
        .filter(|group| group.predicate.matches(ctx.config.platform))
        .flat_map(|group| group.libs.iter())
        .filter(|lib| seen.insert(lib.as_str()))
        .cloned()
        .collect();

    ResolvedComponent {
        name: component.name().to_string(),
        key: package.component_key(component.name()),
        target: package.target_name(component),
        library,
        include_dirs,
        requires: component.requires().to_vec(),
        external,
        system_libs,
    }
}

/// Registry of components belonging to one package.
#[derive(Debug, Clone, Default)]
pub struct ComponentGraph {
    package: PackageInfo,
    components: Vec<Component>,
    index: HashMap<String, usize>,
}

impl ComponentGraph {
    /// Creates an empty graph for `package`.
    #[must_use]
    pub fn new(package: PackageInfo) -> Self {
        Self {
            package,
            components: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Package metadata.
    #[must_use]
    pub const fn package(&self) -> &PackageInfo {
        &self.package
    }

    /// Registered components, in registration order.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Looks up a registered component.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Component> {
        self.index.get(name).map(|&i| &self.components[i])
    }

    /// Number of registered components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Adds a component definition.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::DuplicateComponent`] if the name is taken; the
    /// graph is left unchanged.
    pub fn register(&mut self, component: Component) -> Result<()> {
        if self.index.contains_key(component.name()) {
            return Err(PlanError::DuplicateComponent {
                name: component.name().to_string(),
            });
        }
        tracing::debug!(component = component.name(), "registering component");
        let _ = self.index.insert(component.name().to_string(), self.components.len());
        self.components.push(component);
        Ok(())
    }

    /// Validates references and builds the requirement graph.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::UnknownDependency`] for the first dangling
    /// requirement in registration order.
    pub fn dependency_graph(&self) -> Result<DependencyGraph> {
        validator::check_requirement_references(&self.components)?;
        validator::build_graph(&self.components)
    }

    /// Resolves the plan for `config`.
    ///
    /// All-or-nothing: on error no partial plan is produced.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::UnknownDependency`] or
    /// [`PlanError::CyclicDependency`].
    pub fn resolve(&self, config: &BuildConfiguration) -> Result<ResolvedPlan> {
        tracing::info!(
            package = %self.package.name,
            platform = %config.platform,
            linkage = %config.linkage,
            build_type = %config.build_type,
            version = %config.version,
            "resolving component graph"
        );

        let order = self.dependency_graph()?.resolve_order()?;
        let ctx = ResolveContext::new(&self.package, config);

        let components = order
            .iter()
            .filter_map(|name| self.get(name))
            .map(|component| {
                let resolved = resolve_component(component, &self.package, &ctx);
                tracing::debug!(
                    component = %resolved.name,
                    library = ?resolved.library,
                    system_libs = ?resolved.system_libs,
                    "resolved component"
                );
                resolved
            })
            .collect();

        let requirements = self.package.active_requirements(&ctx.features);

        Ok(ResolvedPlan {
            package: self.package.name.clone(),
            file_name: self.package.file_name.clone(),
            pkg_config_name: self.package.pkg_config_name.clone(),
            config: config.clone(),
            features: ctx.features,
            position_independent: config.effective_position_independent(),
            bin_dirs: self.package.bin_dirs.clone(),
            requirements,
            components,
        })
    }

    /// Resolves several configurations concurrently against this graph.
    ///
    /// Work is split into at most [`worker_count`] contiguous chunks, one
    /// scoped thread each. Results come back in the order of `configs`.
    pub fn resolve_many(&self, configs: &[BuildConfiguration]) -> Vec<Result<ResolvedPlan>> {
        if configs.is_empty() {
            return Vec::new();
        }
        let chunk_size = configs.len().div_ceil(worker_count(configs.len()));
        tracing::debug!(configs = configs.len(), chunk_size, "resolving configurations in parallel");

        std::thread::scope(|scope| {
            let handles: Vec<_> = configs
                .chunks(chunk_size)
                .map(|chunk| {
                    let handle = scope.spawn(move || chunk.iter().map(|config| self.resolve(config)).collect::<Vec<_>>());
                    (chunk.len(), handle)
                })
                .collect();

            let mut results = Vec::with_capacity(configs.len());
            for (len, handle) in handles {
                match handle.join() {
                    Ok(plans) => results.extend(plans),
                    Err(_) => results.extend((0..len).map(|_| {
                        Err(PlanError::Config {
                            message: "resolver thread panicked".into(),
                        })
                    })),
                }
            }
            results
        })
    }

    /// Reports every problem in the registered set.
    #[must_use]
    pub fn diagnose(&self) -> Vec<PlanError> {
        validator::diagnose(&self.components)
    }
}

/// Number of threads used for `jobs` resolutions: the available
/// parallelism, never more than the number of jobs and never zero.
#[must_use]
pub fn worker_count(jobs: usize) -> usize {
    let available = std::thread::available_parallelism().map_or(1, NonZeroUsize::get);
    available.min(jobs).max(1)
}
