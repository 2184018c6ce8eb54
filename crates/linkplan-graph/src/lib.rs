//! # linkplan-graph
//!
//! Component graph model and resolver for declarative library metadata.
//!
//! Handles:
//! - **Component**: immutable component definitions and their builder.
//! - **Package**: package-wide naming, version-threshold features and
//!   package-level requirements.
//! - **Naming**: library file name suffixing for a build configuration.
//! - **Graph**: dependency graph construction and deterministic topological ordering.
//! - **Validator**: duplicate and dangling-reference checks.
//! - **Resolver**: the registry of components and plan resolution.
//! - **Plan**: the resolved, ordered output handed to a build/link step.
//! - **Manifest**: YAML/JSON declarative input.
//! - **Catalog**: built-in presets.

pub mod catalog;
pub mod component;
pub mod graph;
pub mod manifest;
pub mod naming;
pub mod package;
pub mod plan;
pub mod resolver;
pub mod validator;

pub use component::{Component, ComponentBuilder, PlatformPredicate};
pub use package::{PackageInfo, PackageRequirement};
pub use plan::{ResolvedComponent, ResolvedPlan};
pub use resolver::ComponentGraph;
