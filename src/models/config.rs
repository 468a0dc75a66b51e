//! Configuration-related data structures

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default number of import paths handed to the loader per batch
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Upper bound on analysis workers regardless of host parallelism
pub const DEFAULT_MAX_WORKERS: usize = 8;

/// Main configuration settings for aid-metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Root directory of the module to analyze
    pub module_path: PathBuf,

    /// Package pattern (`./...`, `.`, or a sub-path such as `pkg/...`)
    pub pattern: String,

    /// Output format (text, json, csv)
    pub output_format: OutputFormat,

    /// Output file path (if not specified, output to stdout)
    pub output_file: Option<PathBuf>,

    /// Import paths per loader batch; 0 selects the default
    pub batch_size: usize,

    /// Cap on concurrent analysis workers
    pub max_workers: usize,

    /// Whether to show the progress bar
    pub show_progress: bool,

    /// Whether to suppress non-essential output
    pub quiet: bool,

    /// Whether to show detailed progress and debug information
    pub verbose: bool,

    /// Whether to use colors in text output
    pub use_colors: bool,

    /// Whether to follow symbolic links during discovery
    pub follow_links: bool,

    /// Extra glob patterns for directories to skip during discovery
    pub exclude_patterns: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            module_path: PathBuf::from("."),
            pattern: "./...".to_string(),
            output_format: OutputFormat::Text,
            output_file: None,
            batch_size: DEFAULT_BATCH_SIZE,
            max_workers: DEFAULT_MAX_WORKERS,
            show_progress: false,
            quiet: false,
            verbose: false,
            use_colors: true,
            follow_links: false,
            exclude_patterns: Vec::new(),
        }
    }
}

impl Settings {
    /// Worker count for this host: available parallelism, capped
    pub fn worker_count(&self) -> usize {
        num_cpus::get().min(self.max_workers.max(1)).max(1)
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output for spreadsheet analysis
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Partial settings for configuration merging
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialSettings {
    pub module_path: Option<PathBuf>,
    pub pattern: Option<String>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub batch_size: Option<usize>,
    pub max_workers: Option<usize>,
    pub show_progress: Option<bool>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub use_colors: Option<bool>,
    pub follow_links: Option<bool>,
    pub exclude_patterns: Option<Vec<String>>,
}

impl PartialSettings {
    /// Merge another PartialSettings into this one
    /// Fields from `other` take precedence over existing fields
    pub fn merge_from(&mut self, other: PartialSettings) {
        if other.module_path.is_some() {
            self.module_path = other.module_path;
        }
        if other.pattern.is_some() {
            self.pattern = other.pattern;
        }
        if other.output_format.is_some() {
            self.output_format = other.output_format;
        }
        if other.output_file.is_some() {
            self.output_file = other.output_file;
        }
        if other.batch_size.is_some() {
            self.batch_size = other.batch_size;
        }
        if other.max_workers.is_some() {
            self.max_workers = other.max_workers;
        }
        if other.show_progress.is_some() {
            self.show_progress = other.show_progress;
        }
        if other.quiet.is_some() {
            self.quiet = other.quiet;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
        if other.use_colors.is_some() {
            self.use_colors = other.use_colors;
        }
        if other.follow_links.is_some() {
            self.follow_links = other.follow_links;
        }
        if other.exclude_patterns.is_some() {
            self.exclude_patterns = other.exclude_patterns;
        }
    }

    /// Convert partial settings to full settings
    /// Uses defaults for any fields that are None
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::default();

        if let Some(module_path) = &self.module_path {
            settings.module_path = module_path.clone();
        }
        if let Some(pattern) = &self.pattern {
            settings.pattern = pattern.clone();
        }
        if let Some(output_format) = self.output_format {
            settings.output_format = output_format;
        }
        if let Some(output_file) = &self.output_file {
            settings.output_file = Some(output_file.clone());
        }
        if let Some(batch_size) = self.batch_size {
            settings.batch_size = batch_size;
        }
        if let Some(max_workers) = self.max_workers {
            settings.max_workers = max_workers;
        }
        if let Some(show_progress) = self.show_progress {
            settings.show_progress = show_progress;
        }
        if let Some(quiet) = self.quiet {
            settings.quiet = quiet;
        }
        if let Some(verbose) = self.verbose {
            settings.verbose = verbose;
        }
        if let Some(use_colors) = self.use_colors {
            settings.use_colors = use_colors;
        }
        if let Some(follow_links) = self.follow_links {
            settings.follow_links = follow_links;
        }
        if let Some(exclude_patterns) = &self.exclude_patterns {
            settings.exclude_patterns = exclude_patterns.clone();
        }

        settings
    }
}
