//! Error types and definitions for aid-metrics
//!
//! Every fatal error carries the pipeline phase it came from and the path
//! (directory, import path or file) that identifies the failure.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Warning level errors - operation can continue
    Warning,
    /// Error level - current operation fails but overall process can continue
    Error,
    /// Critical level - process should terminate
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Main error type for aid-metrics operations
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// The search root of the discovery phase could not be resolved
    #[error("discovery failed at {path}: {message}")]
    Discovery { path: PathBuf, message: String },

    /// A batch of import paths could not be resolved by the package loader
    #[error("failed to load packages batch starting at {first_path}: {source}")]
    BatchLoad {
        first_path: String,
        #[source]
        source: Box<MetricsError>,
    },

    /// A single import path could not be resolved to a package
    #[error("cannot resolve package {import_path}: {message}")]
    PackageResolution {
        import_path: String,
        message: String,
    },

    /// A worker failed to analyze a package
    #[error("failed to analyze package {package}: {source}")]
    PackageAnalysis {
        package: String,
        #[source]
        source: Box<MetricsError>,
    },

    /// A source file could not be parsed
    #[error("failed to parse file {file}: {message}")]
    Parse { file: PathBuf, message: String },

    /// The source parser could not be initialised
    #[error("parser setup error: {message}")]
    ParserSetup { message: String },

    /// Worker pool or channel failures
    #[error("parallel execution error: {message}")]
    ParallelExecution { message: String },

    /// Generic analysis failure with context attached by `ResultExt`
    #[error("{message}")]
    Context { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Permission denied errors
    #[error("Permission denied accessing {path}")]
    PermissionDenied { path: PathBuf },

    /// Invalid path errors
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// Directory traversal errors
    #[error("Directory traversal error for {path}: {message}")]
    DirectoryTraversal { path: PathBuf, message: String },

    /// Glob pattern errors
    #[error("Glob pattern error: {source}")]
    GlobPattern {
        #[source]
        source: glob::PatternError,
    },

    /// Configuration file not found
    #[error("Configuration file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file read errors
    #[error("Error reading configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file parse errors
    #[error("Error parsing configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Invalid output format
    #[error("Invalid output format: {format}")]
    InvalidOutputFormat { format: String },

    /// Output file write errors
    #[error("Error writing to output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stdout write errors
    #[error("Error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
    },

    /// Output directory not found
    #[error("Output directory not found: {path}")]
    OutputDirectoryNotFound { path: PathBuf },

    /// CSV handling errors
    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },
}

impl MetricsError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Skipped subtrees never stop a run
            MetricsError::PermissionDenied { .. } => ErrorSeverity::Warning,
            MetricsError::DirectoryTraversal { .. } => ErrorSeverity::Warning,

            MetricsError::Config { .. } => ErrorSeverity::Critical,
            MetricsError::ConfigNotFound { .. } => ErrorSeverity::Critical,
            MetricsError::ConfigRead { .. } => ErrorSeverity::Critical,
            MetricsError::ConfigParse { .. } => ErrorSeverity::Critical,
            MetricsError::InvalidOutputFormat { .. } => ErrorSeverity::Critical,
            MetricsError::StdoutWrite { .. } => ErrorSeverity::Critical,
            MetricsError::OutputDirectoryNotFound { .. } => ErrorSeverity::Critical,
            MetricsError::ParserSetup { .. } => ErrorSeverity::Critical,

            _ => ErrorSeverity::Error,
        }
    }

    /// Check if this is a critical error that should terminate the process
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Name of the pipeline phase that produced this error, if any
    pub fn phase(&self) -> Option<&'static str> {
        match self {
            MetricsError::Discovery { .. } | MetricsError::DirectoryTraversal { .. } => {
                Some("discovery")
            }
            MetricsError::BatchLoad { .. } | MetricsError::PackageResolution { .. } => {
                Some("loading")
            }
            MetricsError::PackageAnalysis { .. } | MetricsError::Parse { .. } => Some("analysis"),
            _ => None,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            MetricsError::PermissionDenied { path } => {
                format!("Cannot access '{}' due to permission denied. Check file permissions.", path.display())
            }
            MetricsError::Io { source } => {
                format!("File system error: {}. Check disk space and permissions.", source)
            }
            MetricsError::InvalidPath { path } => {
                format!("Invalid path: '{}'. Please provide a valid module directory.", path.display())
            }
            MetricsError::Discovery { path, message } => {
                format!("Cannot search for packages in '{}': {}.", path.display(), message)
            }
            MetricsError::BatchLoad { first_path, source } => {
                format!("Loading the batch that starts at '{}' failed: {}", first_path, source)
            }
            MetricsError::PackageAnalysis { package, source } => {
                format!("Analysis of package '{}' failed: {}", package, source)
            }
            MetricsError::ConfigNotFound { path } => {
                format!("Configuration file not found at '{}'. Create one with --init or use command line options.", path.display())
            }
            MetricsError::OutputDirectoryNotFound { path } => {
                format!("Output directory '{}' does not exist. Please create the directory or specify a different output path.", path.display())
            }
            _ => self.to_string(),
        }
    }

    /// Create an IO error with context
    pub fn io_error(source: std::io::Error) -> Self {
        MetricsError::Io { source }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        MetricsError::Config {
            message: message.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        MetricsError::PermissionDenied { path: path.into() }
    }

    /// Create a discovery error for an unusable search root
    pub fn discovery_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        MetricsError::Discovery {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Wrap a loader failure with the first import path of the failing batch
    pub fn batch_load_error(first_path: impl Into<String>, source: MetricsError) -> Self {
        MetricsError::BatchLoad {
            first_path: first_path.into(),
            source: Box::new(source),
        }
    }

    /// Create an error for an import path the loader cannot resolve
    pub fn package_resolution_error(
        import_path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        MetricsError::PackageResolution {
            import_path: import_path.into(),
            message: message.into(),
        }
    }

    /// Wrap a worker failure with the package it was analyzing
    pub fn package_analysis_error(package: impl Into<String>, source: MetricsError) -> Self {
        MetricsError::PackageAnalysis {
            package: package.into(),
            source: Box::new(source),
        }
    }

    /// Create a parse error for a source file
    pub fn parse_error(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        MetricsError::Parse {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a worker pool error
    pub fn parallel_error(message: impl Into<String>) -> Self {
        MetricsError::ParallelExecution {
            message: message.into(),
        }
    }

    /// Create a directory traversal error
    pub fn directory_traversal_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        MetricsError::DirectoryTraversal {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for MetricsError {
    fn from(err: std::io::Error) -> Self {
        MetricsError::io_error(err)
    }
}

impl From<csv::Error> for MetricsError {
    fn from(err: csv::Error) -> Self {
        MetricsError::Csv { source: err }
    }
}

impl From<glob::PatternError> for MetricsError {
    fn from(err: glob::PatternError) -> Self {
        MetricsError::GlobPattern { source: err }
    }
}

impl From<serde_json::Error> for MetricsError {
    fn from(err: serde_json::Error) -> Self {
        MetricsError::JsonSerialize { source: err }
    }
}

/// Result type alias for aid-metrics operations
pub type Result<T> = std::result::Result<T, MetricsError>;
