//! Data models and structures for aid-metrics

pub mod analysis;
pub mod config;
pub mod declarations;
pub mod dependency_graph;
pub mod metrics;
pub mod package;

pub use analysis::{AnalysisResult, DeclarationTally, TypeCounts};
pub use config::{OutputFormat, PartialSettings, Settings};
pub use declarations::{Declaration, DeclarationKind, SourceFile};
pub use dependency_graph::DependencyGraph;
pub use metrics::{ModuleMetrics, PackageMetrics};
pub use package::{PackageDescriptor, PackageDiagnostic, ResolvedPackage};
