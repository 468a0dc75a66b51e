//! Command-line argument configuration source

use std::path::PathBuf;

use super::ConfigSource;
use crate::cli::args::Args;
use crate::error::Result;
use crate::models::config::{OutputFormat, PartialSettings};

/// Command-line argument configuration source
#[derive(Debug)]
pub struct CliConfig {
    args: CliArgs,
    name: String,
    priority: u8,
}

/// Command-line arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub path: Option<PathBuf>,
    pub pattern: Option<String>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub batch_size: Option<usize>,
    pub workers: Option<usize>,
    pub progress: bool,
    pub no_colors: bool,
    pub exclude: Option<Vec<String>>,
    pub config: Option<PathBuf>,
    pub quiet: bool,
    pub verbose: bool,
    pub follow_links: bool,
}

impl From<&Args> for CliArgs {
    fn from(args: &Args) -> Self {
        Self {
            path: args.path.clone(),
            pattern: args.pattern.clone(),
            output_format: args.output.map(OutputFormat::from),
            output_file: args.output_file.clone(),
            batch_size: args.batch_size,
            workers: args.workers,
            progress: args.progress,
            no_colors: args.no_colors,
            exclude: if args.exclude.is_empty() {
                None
            } else {
                Some(args.exclude.clone())
            },
            config: args.config.clone(),
            quiet: args.quiet,
            verbose: args.verbose,
            follow_links: args.follow_links,
        }
    }
}

impl CliConfig {
    /// Create a new CLI configuration source
    pub fn new(args: CliArgs) -> Self {
        Self {
            args,
            name: "command-line arguments".to_string(),
            priority: 30,
        }
    }

    /// Create a CLI configuration source from Args
    pub fn from_args(args: &Args) -> Self {
        Self::new(CliArgs::from(args))
    }

    /// Get the config file path if specified
    pub fn config_path(&self) -> Option<&PathBuf> {
        self.args.config.as_ref()
    }
}

impl ConfigSource for CliConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings {
            module_path: self.args.path.clone(),
            pattern: self.args.pattern.clone(),
            output_format: self.args.output_format,
            output_file: self.args.output_file.clone(),
            batch_size: self.args.batch_size,
            max_workers: self.args.workers,
            exclude_patterns: self.args.exclude.clone(),
            ..Default::default()
        };

        // Flags only override when set
        if self.args.progress {
            settings.show_progress = Some(true);
        }
        if self.args.no_colors {
            settings.use_colors = Some(false);
        }
        if self.args.quiet {
            settings.quiet = Some(true);
        }
        if self.args.verbose {
            settings.verbose = Some(true);
        }
        if self.args.follow_links {
            settings.follow_links = Some(true);
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
