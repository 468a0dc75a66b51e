//! Report formatting and writing

mod formatters;
mod progress;
mod writers;

pub use self::formatters::{format_metrics_csv, format_metrics_json, format_metrics_text, sorted_packages};
pub use self::progress::ProgressReporter;
pub use self::writers::{create_writer, FileWriter, OutputWriter, StdoutWriter};

use crate::error::Result;
use crate::models::config::OutputFormat;
use crate::models::metrics::ModuleMetrics;

/// Trait for different output formatters
pub trait Formatter {
    /// Render module metrics into a report
    fn format(&self, metrics: &ModuleMetrics) -> Result<String>;
}

/// Aligned table for terminals
pub struct TextFormatter {
    pub use_colors: bool,
    pub verbose: bool,
}

impl TextFormatter {
    pub fn new(use_colors: bool, verbose: bool) -> Self {
        Self {
            use_colors,
            verbose,
        }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, metrics: &ModuleMetrics) -> Result<String> {
        Ok(formatters::format_metrics_text(
            metrics,
            self.use_colors,
            self.verbose,
        ))
    }
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, metrics: &ModuleMetrics) -> Result<String> {
        formatters::format_metrics_json(metrics)
    }
}

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, metrics: &ModuleMetrics) -> Result<String> {
        formatters::format_metrics_csv(metrics)
    }
}

/// Create a formatter based on the output format
pub fn create_formatter(format: OutputFormat, use_colors: bool, verbose: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(use_colors, verbose)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}
