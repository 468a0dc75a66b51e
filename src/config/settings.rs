//! Settings validation

use std::path::Path;

use crate::error::{MetricsError, Result, ResultExt};
use crate::models::config::Settings;

/// Settings validator for ensuring configuration is valid
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return errors if invalid
    pub fn validate(settings: &Settings) -> Result<()> {
        if !settings.module_path.is_dir() {
            return Err(MetricsError::InvalidPath {
                path: settings.module_path.clone(),
            });
        }

        for pattern in &settings.exclude_patterns {
            glob::Pattern::new(pattern)
                .with_context(|| format!("Invalid exclude pattern: {}", pattern))?;
        }

        if settings.max_workers == 0 {
            return Err(MetricsError::Config {
                message: "max_workers must be at least 1".to_string(),
            });
        }

        if settings.quiet && settings.verbose {
            return Err(MetricsError::Config {
                message: "quiet and verbose cannot be combined".to_string(),
            });
        }

        if let Some(path) = &settings.output_file {
            Self::validate_output_path(path)?;
        }

        Ok(())
    }

    /// Validate that the directory of an output file exists
    fn validate_output_path(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                return Err(MetricsError::OutputDirectoryNotFound {
                    path: parent.to_path_buf(),
                });
            }
        }
        Ok(())
    }
}
