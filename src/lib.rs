//! aid-metrics - package design metrics for Go modules
//!
//! This library discovers the packages of a Go module, extracts their
//! intra-module dependencies and abstract/concrete declaration counts, and
//! computes afferent/efferent coupling, instability, abstractness and
//! distance from the main sequence for each of them.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod parsers;
pub mod utils;

// Re-export commonly used types
pub use crate::core::analyze_module;
pub use error::{handle_error, try_with_recovery, ErrorSeverity, MetricsError, OptionExt, Result, ResultExt};
pub use models::{
    config::Settings,
    metrics::{ModuleMetrics, PackageMetrics},
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
