//! Command-line argument parsing

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// aid-metrics - package design metrics for Go modules
#[derive(Parser, Debug, Default)]
#[command(name = "aid-metrics")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compute coupling, instability, abstractness and distance metrics for Go packages")]
#[command(long_about = "aid-metrics analyzes every package of a Go module and reports Robert Martin's \
package design metrics: afferent coupling (Ca), efferent coupling (Ce), instability (I), \
abstractness (A) and distance from the main sequence (D). Only dependencies between packages \
of the same module are counted; standard library, vendored and external imports are ignored.")]
#[command(after_help = "EXAMPLES:

Basic Usage:
    # Analyze the module in the current directory
    aid-metrics

    # Analyze a module somewhere else
    aid-metrics ./path/to/module

    # Only the packages under internal/
    aid-metrics --pattern ./internal/...

    # Only the root package
    aid-metrics --pattern .

Output Options:
    # CSV for spreadsheets
    aid-metrics --output csv --output-file metrics.csv

    # JSON for scripts
    aid-metrics --output json

    # Plain text without colors
    aid-metrics --no-colors

Performance Options:
    # Show a progress bar while analyzing
    aid-metrics --progress

    # Smaller loader batches and fewer workers
    aid-metrics --batch-size 20 --workers 2

Configuration:
    # Use a specific configuration file
    aid-metrics --config ./aid-metrics.toml

    # Create a default configuration file
    aid-metrics --init

Logging:
    # Debug logs on stderr
    AID_METRICS_LOG=debug aid-metrics --verbose
")]
pub struct Args {
    /// Module root directory
    #[arg(value_name = "PATH", help = "Root directory of the Go module (defaults to the current directory)")]
    pub path: Option<PathBuf>,

    /// Package pattern
    #[arg(long, value_name = "PATTERN", help = "Packages to analyze: './...' for all, '.' for the root package, or a sub-path such as './pkg/...'")]
    pub pattern: Option<String>,

    /// Output format (text, json, csv)
    #[arg(short, long, value_enum, help = "Output format for results: 'text' for an aligned table, 'json' for machine processing, 'csv' for spreadsheet analysis")]
    pub output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(long, value_name = "FILE", help = "File to write the report to (uses stdout if not specified)")]
    pub output_file: Option<PathBuf>,

    /// Loader batch size
    #[arg(long, value_name = "SIZE", help = "Number of packages handed to the loader at once (default: 100)")]
    pub batch_size: Option<usize>,

    /// Maximum worker count
    #[arg(long, value_name = "N", help = "Maximum number of concurrent analysis workers (default: 8, capped by available CPUs)")]
    pub workers: Option<usize>,

    /// Show progress bar
    #[arg(long, help = "Show a progress bar on stderr while discovering, loading and analyzing packages")]
    pub progress: bool,

    /// Disable colored output
    #[arg(long, help = "Disable colored output (useful when piping the text report)")]
    pub no_colors: bool,

    /// Exclude directories matching these glob patterns
    #[arg(short, long, value_name = "GLOB", help = "Glob patterns for directories to skip during discovery (can be specified multiple times)")]
    pub exclude: Vec<String>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", help = "Path to configuration file (defaults to .aid-metrics.toml in the current directory)")]
    pub config: Option<PathBuf>,

    /// Initialize a default configuration file
    #[arg(long, help = "Create a default configuration file (.aid-metrics.toml) in the current directory")]
    pub init: bool,

    /// Suppress non-essential output
    #[arg(short, long, conflicts_with = "verbose", help = "Suppress non-essential output (no progress bar, errors only in logs)")]
    pub quiet: bool,

    /// Show detailed information
    #[arg(short, long, help = "Show debug logs and a summary line after the report")]
    pub verbose: bool,

    /// Follow symbolic links during discovery
    #[arg(long, help = "Follow symbolic links while discovering packages")]
    pub follow_links: bool,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output for spreadsheet analysis
    Csv,
}

impl From<OutputFormat> for crate::models::config::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Self::Text,
            OutputFormat::Json => Self::Json,
            OutputFormat::Csv => Self::Csv,
        }
    }
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }
}
