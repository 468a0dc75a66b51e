//! Package dependency graph with forward and reverse adjacency
//!
//! Only the aggregator mutates a graph. Every edge `A -> B` recorded in the
//! forward map has `A` listed under `B` in the reverse map.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependencyGraph {
    /// Package -> packages it depends on. The key set is the node set.
    forward: BTreeMap<String, Vec<String>>,
    /// Package -> packages that depend on it
    reverse: HashMap<String, Vec<String>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a node together with its outgoing edges
    ///
    /// Adding the same package twice replaces its edges.
    pub fn add_package(&mut self, package: impl Into<String>, dependencies: Vec<String>) {
        let package = package.into();

        if let Some(previous) = self.forward.remove(&package) {
            for dep in previous {
                if let Some(dependents) = self.reverse.get_mut(&dep) {
                    dependents.retain(|d| d != &package);
                }
            }
        }

        for dep in &dependencies {
            self.reverse
                .entry(dep.clone())
                .or_default()
                .push(package.clone());
        }
        self.forward.insert(package, dependencies);
    }

    pub fn contains(&self, package: &str) -> bool {
        self.forward.contains_key(package)
    }

    /// Graph nodes in lexical order
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.forward.keys().map(String::as_str)
    }

    pub fn dependencies(&self, package: &str) -> &[String] {
        self.forward.get(package).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn dependents(&self, package: &str) -> &[String] {
        self.reverse.get(package).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ce
    pub fn efferent_coupling(&self, package: &str) -> usize {
        self.dependencies(package).len()
    }

    /// Ca
    pub fn afferent_coupling(&self, package: &str) -> usize {
        self.dependents(package).len()
    }

    pub fn node_count(&self) -> usize {
        self.forward.len()
    }

    pub fn edge_count(&self) -> usize {
        self.forward.values().map(Vec::len).sum()
    }

    /// Check that forward and reverse adjacency describe the same edge set
    pub fn is_symmetric(&self) -> bool {
        let forward_ok = self.forward.iter().all(|(from, deps)| {
            deps.iter().all(|to| {
                let back = self.dependents(to).iter().filter(|d| *d == from).count();
                let fwd = deps.iter().filter(|d| *d == to).count();
                back == fwd
            })
        });

        let reverse_ok = self.reverse.iter().all(|(to, dependents)| {
            dependents
                .iter()
                .all(|from| self.dependencies(from).iter().any(|d| d == to))
        });

        forward_ok && reverse_ok
    }
}
