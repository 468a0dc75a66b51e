//! Configuration file and environment sources

use std::path::{Path, PathBuf};

use super::{parser, ConfigSource};
use crate::error::{MetricsError, Result};
use crate::models::config::PartialSettings;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".aid-metrics.toml";

/// Prefix of the environment variables read by [`EnvConfig`]
pub const ENV_PREFIX: &str = "AID_METRICS";

/// Configuration file source
pub struct FileConfig {
    path: PathBuf,
    name: String,
    priority: u8,
}

impl FileConfig {
    /// Create a new file configuration source with the default path
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
            name: "default config file".to_string(),
            priority: 20,
        }
    }

    /// Create a new file configuration source with a custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            name: format!("config file ({})", path.as_ref().display()),
            priority: 20,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a default configuration file at this location
    pub fn create_default(&self) -> Result<()> {
        parser::create_default_config(&self.path)
    }
}

impl ConfigSource for FileConfig {
    fn load(&self) -> Result<PartialSettings> {
        if !self.is_available() {
            return Err(MetricsError::ConfigNotFound {
                path: self.path.clone(),
            });
        }

        parser::parse_config_file(&self.path)
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Keys read from the environment, appended to the prefix
const ENV_KEYS: &[&str] = &[
    "MODULE_PATH",
    "PATTERN",
    "OUTPUT_FORMAT",
    "OUTPUT_FILE",
    "BATCH_SIZE",
    "MAX_WORKERS",
    "PROGRESS",
    "COLORS",
    "FOLLOW_LINKS",
    "EXCLUDE",
];

/// Environment variable configuration source
pub struct EnvConfig {
    prefix: String,
    name: String,
    priority: u8,
}

impl EnvConfig {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            name: format!("{} environment variables", &prefix),
            prefix,
            priority: 10,
        }
    }

    fn var(&self, key: &str) -> Option<String> {
        std::env::var(format!("{}_{}", self.prefix, key))
            .ok()
            .filter(|v| !v.trim().is_empty())
    }

    fn parsed<T: std::str::FromStr>(&self, key: &str) -> Result<Option<T>> {
        match self.var(key) {
            Some(raw) => raw.trim().parse().map(Some).map_err(|_| MetricsError::Config {
                message: format!("invalid value '{}' for {}_{}", raw, self.prefix, key),
            }),
            None => Ok(None),
        }
    }

    fn flag(&self, key: &str) -> Result<Option<bool>> {
        match self.var(key) {
            Some(raw) => match raw.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(Some(true)),
                "0" | "false" | "no" | "off" => Ok(Some(false)),
                _ => Err(MetricsError::Config {
                    message: format!("invalid boolean '{}' for {}_{}", raw, self.prefix, key),
                }),
            },
            None => Ok(None),
        }
    }
}

impl ConfigSource for EnvConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings {
            module_path: self.var("MODULE_PATH").map(PathBuf::from),
            pattern: self.var("PATTERN"),
            output_file: self.var("OUTPUT_FILE").map(PathBuf::from),
            batch_size: self.parsed("BATCH_SIZE")?,
            max_workers: self.parsed("MAX_WORKERS")?,
            show_progress: self.flag("PROGRESS")?,
            use_colors: self.flag("COLORS")?,
            follow_links: self.flag("FOLLOW_LINKS")?,
            ..Default::default()
        };

        if let Some(format) = self.var("OUTPUT_FORMAT") {
            settings.output_format = Some(format.parse().map_err(|_| {
                MetricsError::InvalidOutputFormat {
                    format: format.clone(),
                }
            })?);
        }

        if let Some(exclude) = self.var("EXCLUDE") {
            settings.exclude_patterns = Some(
                exclude
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            );
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        ENV_KEYS.iter().any(|key| self.var(key).is_some())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
