//! Static validation of a component set.
//!
//! Checks for duplicate names, dangling requirements and cycles before a
//! plan is resolved.

use std::collections::HashSet;

use linkplan_common::error::{PlanError, Result};

use crate::component::Component;
use crate::graph::DependencyGraph;

/// Validates a component set for referential integrity.
///
/// # Checks performed
///
/// 1. No duplicate component names.
/// 2. Every required component name references a defined component.
///
/// Components are visited in the given order and the first failure wins.
///
/// # Errors
///
/// Returns [`PlanError::DuplicateComponent`] or
/// [`PlanError::UnknownDependency`].
pub fn validate(components: &[Component]) -> Result<()> {
    check_duplicate_components(components)?;
    check_requirement_references(components)?;
    Ok(())
}

/// Fails on the first name that appears twice.
///
/// # Errors
///
/// Returns [`PlanError::DuplicateComponent`] naming the repeated component.
pub fn check_duplicate_components(components: &[Component]) -> Result<()> {
    match duplicates(components).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Fails on the first requirement naming an undefined component.
///
/// # Errors
///
/// Returns [`PlanError::UnknownDependency`] naming both components.
pub fn check_requirement_references(components: &[Component]) -> Result<()> {
    match dangling_requirements(components).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Builds the requirement graph of an already validated component set.
///
/// # Errors
///
/// Returns [`PlanError::DuplicateComponent`] or
/// [`PlanError::UnknownDependency`] if the set was not validated.
pub fn build_graph(components: &[Component]) -> Result<DependencyGraph> {
    let mut graph = DependencyGraph::new();
    for component in components {
        let _ = graph.add_component(component.name())?;
    }
    for component in components {
        let Some(dependent) = graph.node(component.name()) else {
            continue;
        };
        for required in component.requires() {
            let dependency = graph.node(required).ok_or_else(|| PlanError::UnknownDependency {
                component: component.name().to_string(),
                missing: required.clone(),
            })?;
            graph.add_dependency(dependent, dependency);
        }
    }
    Ok(graph)
}

/// Collects every problem instead of stopping at the first one.
///
/// Duplicates and dangling requirements are all reported. A cycle is only
/// looked for when neither is present, since the graph is not well defined
/// otherwise.
#[must_use]
pub fn diagnose(components: &[Component]) -> Vec<PlanError> {
    let mut issues = duplicates(components);
    issues.extend(dangling_requirements(components));
    if issues.is_empty() {
        if let Err(err) = build_graph(components).and_then(|graph| graph.resolve_order()) {
            issues.push(err);
        }
    }
    for issue in &issues {
        tracing::warn!(%issue, "component set issue");
    }
    issues
}

fn duplicates(components: &[Component]) -> Vec<PlanError> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut issues = Vec::new();
    for component in components {
        let name = component.name();
        if !seen.insert(name) && reported.insert(name) {
            issues.push(PlanError::DuplicateComponent { name: name.to_string() });
        }
    }
    issues
}

fn dangling_requirements(components: &[Component]) -> Vec<PlanError> {
    let names: HashSet<&str> = components.iter().map(Component::name).collect();
    let mut issues = Vec::new();
    for component in components {
        for required in component.requires() {
            if !names.contains(required.as_str()) {
                issues.push(PlanError::UnknownDependency {
                    component: component.name().to_string(),
                    missing: required.clone(),
                });
            }
        }
    }
    issues
}
