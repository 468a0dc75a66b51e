//! Core analysis pipeline: discovery, loading, analysis, aggregation and metrics

pub mod aggregator;
pub mod analyzer;
pub mod classifier;
pub mod discovery;
pub mod loader;
pub mod metrics;
pub mod module_analyzer;
pub mod progress;

pub use aggregator::{Aggregation, Aggregator};
pub use analyzer::{AnalyzerPool, PackageAnalyzer};
pub use classifier::{ImportClass, ImportClassifier};
pub use discovery::{Discoverer, PackagePattern};
pub use loader::{BatchLoader, PackageLoader};
pub use metrics::MetricsCalculator;
pub use module_analyzer::{analyze_module, ModuleAnalyzer};
pub use progress::{NoopProgress, Phase, ProgressPlan, ProgressSink, ProgressState, ProgressTracker};
