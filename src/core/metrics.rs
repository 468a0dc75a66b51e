//! Martin package metrics
//!
//! Turns the aggregated graph and declaration counts into instability,
//! abstractness and distance from the main sequence.

use crate::core::aggregator::Aggregation;
use crate::models::metrics::{ModuleMetrics, PackageMetrics};
use crate::utils::{last_segment, relative_to_module};
use std::path::Path;
use tracing::warn;

/// I = Ce / (Ca + Ce), 0 for an isolated package
pub fn instability(ca: usize, ce: usize) -> f64 {
    if ca + ce == 0 {
        0.0
    } else {
        ce as f64 / (ca + ce) as f64
    }
}

/// A = Na / Nc, 0 when nothing is counted
pub fn abstractness(na: usize, nc: usize) -> f64 {
    if nc == 0 {
        0.0
    } else {
        na as f64 / nc as f64
    }
}

/// D = |A + I - 1|
pub fn distance(abstractness: f64, instability: f64) -> f64 {
    (abstractness + instability - 1.0).abs()
}

/// Human-readable package name
///
/// Module packages are shown relative to the module, the root as the last
/// segment of the module identity. Anything else is cut down to its last two
/// segments after dropping loader annotations such as `pkg [pkg.test]`.
pub fn display_name(package_id: &str, module: &str) -> String {
    if !module.is_empty() {
        if let Some(rel) = relative_to_module(package_id, module) {
            return if rel.is_empty() {
                last_segment(module).to_string()
            } else {
                rel.to_string()
            };
        }
    }

    let path = package_id.split_whitespace().next().unwrap_or(package_id);
    let segments: Vec<&str> = path.split('/').collect();
    if segments.len() <= 2 {
        path.to_string()
    } else {
        segments[segments.len() - 2..].join("/")
    }
}

pub struct MetricsCalculator<'a> {
    module_name: &'a str,
}

impl<'a> MetricsCalculator<'a> {
    pub fn new(module_name: &'a str) -> Self {
        Self { module_name }
    }

    pub fn package_metrics(&self, package: &str, aggregation: &Aggregation) -> PackageMetrics {
        let graph = &aggregation.graph;
        let counts = aggregation.counts_for(package);

        let ca = graph.afferent_coupling(package);
        let ce = graph.efferent_coupling(package);
        let na = counts.abstract_count;
        let nc = counts.total_type_count;

        let i = instability(ca, ce);
        let a = abstractness(na, nc);

        PackageMetrics {
            name: display_name(package, self.module_name),
            id: package.to_string(),
            ca,
            ce,
            na,
            nc,
            instability: i,
            abstractness: a,
            distance: distance(a, i),
        }
    }

    /// Metrics for every graph node, keyed by display name
    ///
    /// Two packages that would share a display name are keyed by their full
    /// ids instead.
    pub fn calculate(&self, module_path: &Path, aggregation: &Aggregation) -> ModuleMetrics {
        let mut module = ModuleMetrics::new(module_path, self.module_name);

        for package in aggregation.graph.nodes() {
            let metrics = self.package_metrics(package, aggregation);

            if module.packages.contains_key(&metrics.name) {
                warn!(
                    "Display name {} is ambiguous, using {}",
                    metrics.name, metrics.id
                );
                let mut metrics = metrics;
                metrics.name = metrics.id.clone();
                module.packages.insert(metrics.id.clone(), metrics);
            } else {
                module.packages.insert(metrics.name.clone(), metrics);
            }
        }

        module
    }
}
