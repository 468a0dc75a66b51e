//! Single-owner aggregation of analysis results

use crate::core::progress::{Phase, ProgressTracker};
use crate::error::{MetricsError, Result};
use crate::models::analysis::{AnalysisResult, TypeCounts};
use crate::models::dependency_graph::DependencyGraph;
use std::collections::HashMap;
use tracing::debug;

/// Everything the metrics calculator needs
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub graph: DependencyGraph,
    pub counts: HashMap<String, TypeCounts>,
}

impl Aggregation {
    pub fn counts_for(&self, package: &str) -> TypeCounts {
        self.counts.get(package).copied().unwrap_or_default()
    }
}

/// Folds results into the dependency graph and per-package counts
///
/// The aggregator is the only writer of both structures. Folding is purely
/// additive, so the outcome does not depend on arrival order.
#[derive(Debug, Default)]
pub struct Aggregator {
    aggregation: Aggregation,
    processed: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Fold one result; a failed result aborts aggregation
    pub fn accept(&mut self, result: AnalysisResult) -> Result<()> {
        self.processed += 1;

        if let Some(err) = result.error {
            return Err(MetricsError::package_analysis_error(result.package_id, err));
        }
        if result.is_empty() {
            return Ok(());
        }

        debug!(
            "Recording {} with {} dependencies",
            result.package_id,
            result.dependencies.len()
        );
        self.aggregation
            .counts
            .insert(result.package_id.clone(), result.counts);
        self.aggregation
            .graph
            .add_package(result.package_id, result.dependencies);
        Ok(())
    }

    /// Drain `results`, reporting analysis progress out of `expected`
    pub fn consume<I>(
        mut self,
        results: I,
        expected: usize,
        progress: &mut ProgressTracker<'_>,
    ) -> Result<Aggregation>
    where
        I: IntoIterator<Item = AnalysisResult>,
    {
        progress.enter(Phase::Analysis);
        for result in results {
            self.accept(result)?;
            progress.report_work(
                self.processed,
                expected,
                &format!("Analyzed {} of {} packages", self.processed, expected),
            );
        }
        Ok(self.finish())
    }

    pub fn finish(self) -> Aggregation {
        self.aggregation
    }
}
