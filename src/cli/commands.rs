//! Command implementations

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::Args;
use crate::config::{self, CliArgs, DEFAULT_CONFIG_FILE};
use crate::core::{analyze_module, NoopProgress, ProgressSink};
use crate::error::{ErrorSeverity, MetricsError, Result};
use crate::logging::{init_logging, init_logging_for};
use crate::models::config::Settings;
use crate::models::metrics::ModuleMetrics;
use crate::output::{create_formatter, create_writer, ProgressReporter};

/// Available commands
#[derive(Debug)]
pub enum Command {
    /// Analyze the packages of a module
    Analyze(Args),
    /// Initialize a default configuration file
    Init,
}

/// Outcome of writing the default configuration file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    Created(PathBuf),
    AlreadyExists(PathBuf),
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: Args) -> Self {
        if args.init {
            return Command::Init;
        }
        Command::Analyze(args)
    }

    /// Validate the command arguments
    pub fn validate(&self) -> Result<()> {
        match self {
            Command::Analyze(args) => {
                if let Some(path) = &args.path {
                    if !path.exists() {
                        return Err(MetricsError::InvalidPath { path: path.clone() });
                    }
                }

                if let Some(config_path) = &args.config {
                    if !config_path.exists() {
                        return Err(MetricsError::ConfigNotFound {
                            path: config_path.clone(),
                        });
                    }
                }

                Ok(())
            }
            Command::Init => Ok(()),
        }
    }

    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        self.validate()?;

        match self {
            Command::Analyze(args) => {
                let settings = config::load_config(CliArgs::from(args))?;
                init_logging_for(&settings);
                debug!("Settings: {:?}", settings);
                run_analysis(&settings)
            }
            Command::Init => {
                init_logging(false, false);
                match init_config(Path::new(DEFAULT_CONFIG_FILE))? {
                    InitOutcome::Created(path) => {
                        println!("Created default configuration file at: {}", path.display());
                        println!("Edit it to change the pattern, output format, batch size and workers.");
                    }
                    InitOutcome::AlreadyExists(path) => {
                        println!("Configuration file already exists at: {}", path.display());
                        println!("To overwrite it, delete the file first and run this command again.");
                    }
                }
                Ok(())
            }
        }
    }

    /// Run the command and map the outcome to a process exit code
    pub fn run(&self) -> i32 {
        match self.execute() {
            Ok(_) => 0,
            Err(err) => {
                eprintln!("{}: {}", err.severity(), err.user_message());
                exit_code(&err)
            }
        }
    }
}

/// Exit code for an error, by severity
pub fn exit_code(err: &MetricsError) -> i32 {
    match err.severity() {
        ErrorSeverity::Warning => 0,
        ErrorSeverity::Error => 1,
        ErrorSeverity::Critical => 2,
    }
}

/// Write the default configuration template unless a file is already there
pub fn init_config(path: &Path) -> Result<InitOutcome> {
    if path.exists() {
        return Ok(InitOutcome::AlreadyExists(path.to_path_buf()));
    }
    config::create_default_config(path)?;
    Ok(InitOutcome::Created(path.to_path_buf()))
}

/// Analyze the configured module, then format and write the report
pub fn run_analysis(settings: &Settings) -> Result<()> {
    let metrics = analyze_with_progress(settings)?;

    let formatter = create_formatter(settings.output_format, settings.use_colors, settings.verbose);
    let report = formatter.format(&metrics)?;

    create_writer(settings.output_file.as_ref()).write(&report)?;

    if let Some(path) = &settings.output_file {
        info!("Wrote {} report to {}", settings.output_format, path.display());
    }
    Ok(())
}

fn analyze_with_progress(settings: &Settings) -> Result<ModuleMetrics> {
    let reporter;
    let noop = NoopProgress;
    let sink: &dyn ProgressSink = if settings.show_progress && !settings.quiet {
        reporter = ProgressReporter::new();
        &reporter
    } else {
        &noop
    };

    analyze_module(settings, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_from_args_selects_init() {
        let args = Args {
            init: true,
            ..Default::default()
        };
        assert!(matches!(Command::from_args(args), Command::Init));
        assert!(matches!(
            Command::from_args(Args::default()),
            Command::Analyze(_)
        ));
    }

    #[test]
    fn test_validate_rejects_missing_paths() {
        let missing_root = Command::Analyze(Args {
            path: Some(PathBuf::from("/nonexistent/module")),
            ..Default::default()
        });
        assert!(matches!(
            missing_root.validate(),
            Err(MetricsError::InvalidPath { .. })
        ));

        let missing_config = Command::Analyze(Args {
            config: Some(PathBuf::from("/nonexistent/aid.toml")),
            ..Default::default()
        });
        assert!(matches!(
            missing_config.validate(),
            Err(MetricsError::ConfigNotFound { .. })
        ));
    }

    #[test]
    fn test_run_maps_invalid_path_to_exit_code_one() {
        let command = Command::Analyze(Args {
            path: Some(PathBuf::from("/nonexistent/module")),
            ..Default::default()
        });
        assert_eq!(command.run(), 1);
    }

    #[test]
    fn test_exit_code_by_severity() {
        assert_eq!(exit_code(&MetricsError::permission_denied("/x")), 0);
        assert_eq!(exit_code(&MetricsError::parallel_error("boom")), 1);
        assert_eq!(
            exit_code(&MetricsError::Config {
                message: "bad".to_string()
            }),
            2
        );
    }

    #[test]
    fn test_init_config_does_not_overwrite() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join(DEFAULT_CONFIG_FILE);

        assert_eq!(init_config(&path).unwrap(), InitOutcome::Created(path.clone()));
        fs::write(&path, "pattern = \"./x/...\"\n").unwrap();

        assert_eq!(
            init_config(&path).unwrap(),
            InitOutcome::AlreadyExists(path.clone())
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "pattern = \"./x/...\"\n");
    }

    #[test]
    fn test_run_analysis_writes_report_file() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path().join("mod");
        fs::create_dir_all(root.join("a")).unwrap();
        fs::write(root.join("go.mod"), "module example.com/m\n").unwrap();
        fs::write(root.join("a/a.go"), "package a\n\ntype T struct{}\n").unwrap();

        let output = temp_dir.path().join("report.csv");
        let settings = Settings {
            module_path: root,
            output_format: crate::models::config::OutputFormat::Csv,
            output_file: Some(output.clone()),
            ..Default::default()
        };

        run_analysis(&settings).unwrap();

        let report = fs::read_to_string(&output).unwrap();
        assert!(report.starts_with("Package,"));
        assert!(report.contains("\na,0,0,"));
    }
}
