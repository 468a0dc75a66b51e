//! End-to-end analysis of one module
//!
//! Discovery, batched loading, parallel analysis and aggregation run in
//! sequence against a single progress scale. Any fatal error stops the run and
//! no metrics are produced.

use crate::core::aggregator::Aggregator;
use crate::core::analyzer::{AnalyzerPool, PackageAnalyzer};
use crate::core::classifier::ImportClassifier;
use crate::core::discovery::Discoverer;
use crate::core::loader::{BatchLoader, PackageLoader};
use crate::core::metrics::MetricsCalculator;
use crate::core::progress::{Phase, ProgressSink, ProgressTracker};
use crate::error::{MetricsError, Result};
use crate::models::config::Settings;
use crate::models::metrics::ModuleMetrics;
use crate::parsers::{FsPackageLoader, GoModReader, GoSourceParser, ModuleMetadataProvider, SourceParser};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

pub struct ModuleAnalyzer {
    settings: Settings,
    module_root: PathBuf,
    module_name: String,
    parser: Arc<dyn SourceParser>,
    loader: Arc<dyn PackageLoader>,
}

impl ModuleAnalyzer {
    /// Analyzer wired to the filesystem, go.mod and the Go parser
    pub fn new(settings: &Settings) -> Result<Self> {
        let module_root = settings.module_path.clone();
        if !module_root.is_dir() {
            return Err(MetricsError::discovery_error(
                &module_root,
                "module path is not a directory",
            ));
        }

        let module_name = GoModReader::new().module_name(&module_root);
        if module_name.is_empty() {
            warn!(
                "No module directive found under {}; falling back to path heuristics",
                module_root.display()
            );
        }

        let parser: Arc<dyn SourceParser> = Arc::new(GoSourceParser::new());
        let loader = Arc::new(FsPackageLoader::new(
            module_root.clone(),
            module_name.clone(),
            Arc::clone(&parser),
        ));

        Ok(Self::with_collaborators(settings, module_name, parser, loader))
    }

    /// Analyzer with caller-supplied parser and loader
    pub fn with_collaborators(
        settings: &Settings,
        module_name: impl Into<String>,
        parser: Arc<dyn SourceParser>,
        loader: Arc<dyn PackageLoader>,
    ) -> Self {
        Self {
            settings: settings.clone(),
            module_root: settings.module_path.clone(),
            module_name: module_name.into(),
            parser,
            loader,
        }
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn analyze(&self, sink: &dyn ProgressSink) -> Result<ModuleMetrics> {
        let mut progress = ProgressTracker::new(sink);
        progress.start();

        // Discovery
        progress.enter(Phase::Discovery);
        let discoverer = Discoverer::new(&self.module_root, &self.module_name)
            .with_pattern(&self.settings.pattern)
            .with_exclude_patterns(&self.settings.exclude_patterns)?
            .follow_links(self.settings.follow_links);

        let plan = *progress.plan();
        let descriptors = discoverer.discover(|found| {
            progress.report(
                plan.discovery_value(found),
                &format!("Discovered {} packages", found),
            );
        })?;
        progress.report(
            plan.discovery.end,
            &format!("Discovered {} packages", descriptors.len()),
        );

        // Loading
        let batch_loader = BatchLoader::new(self.loader.as_ref(), self.settings.batch_size)
            .with_total_hint(descriptors.len());
        let packages = batch_loader.load_all(&descriptors, &mut progress)?;

        // Analysis
        let expected = packages.len();
        let pool = AnalyzerPool::new(self.settings.worker_count());
        let analyzer = PackageAnalyzer::new(
            ImportClassifier::new(&self.module_name),
            Arc::clone(&self.parser),
        );
        info!(
            "Analyzing {} packages with {} workers",
            expected,
            pool.workers()
        );

        progress.enter(Phase::Analysis);
        let aggregation = pool.run(&analyzer, packages, |results| {
            Aggregator::new().consume(results, expected, &mut progress)
        })?;

        let metrics = MetricsCalculator::new(&self.module_name)
            .calculate(&self.module_root, &aggregation);

        progress.finish("Analysis complete");
        info!("Computed metrics for {} packages", metrics.len());

        Ok(metrics)
    }
}

/// Analyze the module described by `settings`
pub fn analyze_module(settings: &Settings, sink: &dyn ProgressSink) -> Result<ModuleMetrics> {
    ModuleAnalyzer::new(settings)?.analyze(sink)
}
