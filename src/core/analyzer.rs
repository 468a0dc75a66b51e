//! Per-package analysis and the worker pool that runs it
//!
//! Workers never touch shared state: each one turns a resolved package into
//! an [`AnalysisResult`] and sends it down a channel owned by the caller.

use crate::core::classifier::ImportClassifier;
use crate::error::{MetricsError, Result};
use crate::models::analysis::{AnalysisResult, DeclarationTally};
use crate::models::package::ResolvedPackage;
use crate::parsers::SourceParser;
use rayon::prelude::*;
use std::collections::HashSet;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use tracing::debug;

/// Classifies a package's imports and counts its declarations
pub struct PackageAnalyzer {
    classifier: ImportClassifier,
    parser: Arc<dyn SourceParser>,
}

impl PackageAnalyzer {
    pub fn new(classifier: ImportClassifier, parser: Arc<dyn SourceParser>) -> Self {
        Self { classifier, parser }
    }

    pub fn classifier(&self) -> &ImportClassifier {
        &self.classifier
    }

    /// Analyze one package
    ///
    /// Standard-library and vendored packages produce an empty result. The
    /// first file that fails to parse fails the whole package.
    pub fn analyze(&self, package: &ResolvedPackage) -> AnalysisResult {
        if !self.classifier.is_graph_member(&package.id) {
            debug!("Skipping non-module package {}", package.id);
            return AnalysisResult::skipped(package.id.clone());
        }

        let mut seen = HashSet::new();
        let dependencies: Vec<String> = package
            .imports
            .iter()
            .filter(|import| self.classifier.is_graph_member(import))
            .filter(|import| seen.insert(import.as_str()))
            .cloned()
            .collect();

        let mut tally = DeclarationTally::default();
        for file in &package.source_files {
            match self.parser.parse_file(file) {
                Ok(parsed) => tally.add_file(&parsed),
                Err(err) => return AnalysisResult::failed(package.id.clone(), err),
            }
        }

        debug!(
            "Analyzed {}: {} dependencies, {:?}",
            package.id,
            dependencies.len(),
            tally
        );
        AnalysisResult::node(package.id.clone(), dependencies, tally.type_counts())
    }
}

/// Bounded pool of analysis workers
#[derive(Debug, Clone, Copy)]
pub struct AnalyzerPool {
    workers: usize,
}

impl AnalyzerPool {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Analyze every package on the pool while `consume` drains the results
    ///
    /// `consume` runs on the calling thread. When it returns, the receiver is
    /// dropped and workers stop at their next send.
    pub fn run<T, F>(
        &self,
        analyzer: &PackageAnalyzer,
        packages: Vec<ResolvedPackage>,
        consume: F,
    ) -> Result<T>
    where
        F: FnOnce(Receiver<AnalysisResult>) -> Result<T>,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("aid-metrics-worker-{}", i))
            .build()
            .map_err(|e| MetricsError::parallel_error(e.to_string()))?;

        let (tx, rx) = mpsc::channel();

        std::thread::scope(|scope| {
            scope.spawn(move || {
                pool.install(|| {
                    // A failed send means the consumer has stopped listening
                    let _ = packages
                        .par_iter()
                        .try_for_each_with(tx, |tx, package| tx.send(analyzer.analyze(package)));
                });
            });

            consume(rx)
        })
    }
}
