//! Dependency graph management using `petgraph`.
//!
//! Builds a directed graph from component requirements and resolves a
//! deterministic topological ordering: dependencies first, ties broken by
//! component name.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt;

use linkplan_common::error::{PlanError, Result};
use petgraph::Direction;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};

/// Edge weight: the target requires the source.
#[derive(Debug, Clone, Copy)]
struct Requires;

impl fmt::Display for Requires {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("requires")
    }
}

/// A dependency graph of components.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// Edges point from a dependency to its dependents.
    graph: DiGraph<String, Requires>,
    nodes: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Creates an empty dependency graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a component node to the graph.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::DuplicateComponent`] if the name is already present.
    pub fn add_component(&mut self, name: impl Into<String>) -> Result<NodeIndex> {
        let name = name.into();
        if self.nodes.contains_key(&name) {
            return Err(PlanError::DuplicateComponent { name });
        }
        let idx = self.graph.add_node(name.clone());
        let _ = self.nodes.insert(name, idx);
        Ok(idx)
    }

    /// Returns the node of a component, if present.
    #[must_use]
    pub fn node(&self, name: &str) -> Option<NodeIndex> {
        self.nodes.get(name).copied()
    }

    /// Adds a dependency edge: `dependent` depends on `dependency`.
    ///
    /// Declaring the same requirement twice keeps a single edge.
    pub fn add_dependency(&mut self, dependent: NodeIndex, dependency: NodeIndex) {
        let _ = self.graph.update_edge(dependency, dependent, Requires);
    }

    /// Number of components in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns `true` if the graph has no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Returns a topological ordering of components.
    ///
    /// Dependencies appear before the components that depend on them. When
    /// several components are ready at once the lexicographically smallest
    /// name goes first, so the order is reproducible.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::CyclicDependency`] naming one cycle if the graph
    /// is not acyclic.
    pub fn resolve_order(&self) -> Result<Vec<String>> {
        let mut indegree: HashMap<NodeIndex, usize> = self
            .graph
            .node_indices()
            .map(|idx| {
                let count = self.graph.neighbors_directed(idx, Direction::Incoming).count();
                (idx, count)
            })
            .collect();

        let mut ready: BinaryHeap<Reverse<(&str, NodeIndex)>> = indegree
            .iter()
            .filter(|&(_, &count)| count == 0)
            .map(|(&idx, _)| Reverse((self.graph[idx].as_str(), idx)))
            .collect();

        let mut order = Vec::with_capacity(self.graph.node_count());
        while let Some(Reverse((name, idx))) = ready.pop() {
            order.push(name.to_string());
            for next in self.graph.neighbors_directed(idx, Direction::Outgoing) {
                if let Some(count) = indegree.get_mut(&next) {
                    *count -= 1;
                    if *count == 0 {
                        ready.push(Reverse((self.graph[next].as_str(), next)));
                    }
                }
            }
        }

        if order.len() == self.graph.node_count() {
            return Ok(order);
        }

        let blocked: HashSet<NodeIndex> = indegree
            .into_iter()
            .filter(|&(_, count)| count > 0)
            .map(|(idx, _)| idx)
            .collect();
        let cycle = self.find_cycle(&blocked);
        tracing::debug!(cycle = ?cycle, "cycle found during ordering");
        Err(PlanError::CyclicDependency { cycle })
    }

    /// Walks requirement edges inside `blocked` until a node repeats.
    ///
    /// Every blocked node still has a blocked dependency, so the walk
    /// cannot dead-end. Starting node and each step take the smallest name.
    fn find_cycle(&self, blocked: &HashSet<NodeIndex>) -> Vec<String> {
        let Some(mut current) = blocked.iter().copied().min_by(|a, b| self.graph[*a].cmp(&self.graph[*b])) else {
            return Vec::new();
        };

        let mut path: Vec<NodeIndex> = Vec::new();
        let mut seen: HashMap<NodeIndex, usize> = HashMap::new();
        loop {
            if let Some(&start) = seen.get(&current) {
                let mut cycle: Vec<String> = path[start..].iter().map(|&idx| self.graph[idx].clone()).collect();
                cycle.push(self.graph[current].clone());
                return cycle;
            }
            let _ = seen.insert(current, path.len());
            path.push(current);

            let next = self
                .graph
                .neighbors_directed(current, Direction::Incoming)
                .filter(|idx| blocked.contains(idx))
                .min_by(|a, b| self.graph[*a].cmp(&self.graph[*b]));
            match next {
                Some(idx) => current = idx,
                None => return path.iter().map(|&idx| self.graph[idx].clone()).collect(),
            }
        }
    }

    /// Renders the graph in Graphviz DOT format.
    ///
    /// Edges point from a dependency to the components requiring it.
    #[must_use]
    pub fn to_dot(&self) -> String {
        format!("{}", Dot::with_config(&self.graph, &[Config::EdgeNoLabel]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with(names: &[&str]) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for name in names {
            let _ = graph.add_component(*name).expect("add");
        }
        graph
    }

    fn depend(graph: &mut DependencyGraph, dependent: &str, dependency: &str) {
        let a = graph.node(dependent).expect("dependent");
        let b = graph.node(dependency).expect("dependency");
        graph.add_dependency(a, b);
    }

    #[test]
    fn empty_graph_resolves_to_empty() {
        let graph = DependencyGraph::new();
        let order = graph.resolve_order().expect("should resolve");
        assert!(order.is_empty());
        assert!(graph.is_empty());
    }

    #[test]
    fn duplicate_node_is_rejected() {
        let mut graph = graph_with(&["a"]);
        let err = graph.add_component("a").unwrap_err();
        assert!(matches!(err, PlanError::DuplicateComponent { ref name } if name == "a"));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn linear_dependency_chain() {
        let mut graph = graph_with(&["api", "db"]);
        depend(&mut graph, "api", "db");
        let order = graph.resolve_order().expect("should resolve");
        assert_eq!(order, vec!["db", "api"]);
    }

    #[test]
    fn diamond_dependency() {
        let mut graph = graph_with(&["a", "b", "c", "d"]);
        depend(&mut graph, "a", "b");
        depend(&mut graph, "a", "c");
        depend(&mut graph, "b", "d");
        depend(&mut graph, "c", "d");

        let order = graph.resolve_order().expect("should resolve");
        assert_eq!(order, vec!["d", "b", "c", "a"]);
    }

    #[test]
    fn independent_nodes_sorted_by_name() {
        let graph = graph_with(&["z", "x", "y"]);
        let order = graph.resolve_order().expect("should resolve");
        assert_eq!(order, vec!["x", "y", "z"]);
    }

    #[test]
    fn tie_break_applies_as_nodes_become_ready() {
        let mut graph = graph_with(&["base", "zeta", "alpha", "mid"]);
        depend(&mut graph, "zeta", "base");
        depend(&mut graph, "alpha", "mid");
        depend(&mut graph, "mid", "base");
        let order = graph.resolve_order().expect("should resolve");
        assert_eq!(order, vec!["base", "mid", "alpha", "zeta"]);
    }

    #[test]
    fn repeated_requirement_keeps_single_edge() {
        let mut graph = graph_with(&["a", "b"]);
        depend(&mut graph, "a", "b");
        depend(&mut graph, "a", "b");
        let order = graph.resolve_order().expect("should resolve");
        assert_eq!(order, vec!["b", "a"]);
    }

    #[test]
    fn two_node_cycle_is_reported() {
        let mut graph = graph_with(&["a", "b"]);
        depend(&mut graph, "a", "b");
        depend(&mut graph, "b", "a");

        let err = graph.resolve_order().unwrap_err();
        match err {
            PlanError::CyclicDependency { cycle } => assert_eq!(cycle, vec!["a", "b", "a"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn three_node_cycle_follows_requirement_direction() {
        let mut graph = graph_with(&["a", "b", "c"]);
        depend(&mut graph, "a", "b");
        depend(&mut graph, "b", "c");
        depend(&mut graph, "c", "a");

        let err = graph.resolve_order().unwrap_err();
        match err {
            PlanError::CyclicDependency { cycle } => assert_eq!(cycle, vec!["a", "b", "c", "a"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn self_requirement_is_a_cycle() {
        let mut graph = graph_with(&["solo"]);
        depend(&mut graph, "solo", "solo");
        let err = graph.resolve_order().unwrap_err();
        match err {
            PlanError::CyclicDependency { cycle } => assert_eq!(cycle, vec!["solo", "solo"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn cycle_report_skips_nodes_downstream_of_cycle() {
        let mut graph = graph_with(&["a", "b", "c", "top"]);
        depend(&mut graph, "b", "c");
        depend(&mut graph, "c", "b");
        depend(&mut graph, "a", "b");
        depend(&mut graph, "top", "a");

        let err = graph.resolve_order().unwrap_err();
        match err {
            PlanError::CyclicDependency { cycle } => assert_eq!(cycle, vec!["b", "c", "b"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn dot_output_names_every_node() {
        let mut graph = graph_with(&["Iex", "IexConfig"]);
        depend(&mut graph, "Iex", "IexConfig");
        let dot = graph.to_dot();
        assert!(dot.starts_with("digraph"), "got: {dot}");
        assert!(dot.contains("IexConfig"));
        assert!(dot.contains("->"));
    }
}
