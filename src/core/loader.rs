//! Batched package loading
//!
//! Resolution of discovered packages is delegated to a [`PackageLoader`] in
//! fixed-size batches so that progress can be reported while large modules
//! load.

use crate::core::progress::{Phase, ProgressTracker};
use crate::error::{MetricsError, Result};
use crate::models::config::DEFAULT_BATCH_SIZE;
use crate::models::package::{PackageDescriptor, ResolvedPackage};
use tracing::{debug, info, warn};

/// Resolves import paths into packages with their imports and source files
pub trait PackageLoader: Send + Sync {
    /// Load every path, failing the whole call if any path cannot be resolved
    fn load(&self, import_paths: &[String]) -> Result<Vec<ResolvedPackage>>;
}

/// A batch size of zero falls back to the default
pub fn effective_batch_size(requested: usize) -> usize {
    if requested == 0 {
        DEFAULT_BATCH_SIZE
    } else {
        requested
    }
}

pub struct BatchLoader<'a> {
    loader: &'a dyn PackageLoader,
    batch_size: usize,
    total_hint: Option<usize>,
}

impl<'a> BatchLoader<'a> {
    pub fn new(loader: &'a dyn PackageLoader, batch_size: usize) -> Self {
        Self {
            loader,
            batch_size: effective_batch_size(batch_size),
            total_hint: None,
        }
    }

    /// Expected package count used for progress; defaults to the input size
    pub fn with_total_hint(mut self, total: usize) -> Self {
        self.total_hint = Some(total);
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Load all descriptors batch by batch
    ///
    /// Packages that resolve with diagnostics are kept and logged.
    pub fn load_all(
        &self,
        descriptors: &[PackageDescriptor],
        progress: &mut ProgressTracker<'_>,
    ) -> Result<Vec<ResolvedPackage>> {
        let total = self.total_hint.unwrap_or(descriptors.len());
        let mut packages = Vec::with_capacity(descriptors.len());
        let mut with_diagnostics = 0usize;

        progress.enter(Phase::Loading);
        info!(
            "Loading {} packages in batches of {}",
            descriptors.len(),
            self.batch_size
        );

        for batch in descriptors.chunks(self.batch_size) {
            let paths: Vec<String> = batch.iter().map(|d| d.import_path.clone()).collect();
            let upper = packages.len() + paths.len();

            progress.report_work(
                packages.len(),
                total,
                &format!("Loading {} of {} packages", upper, total),
            );
            debug!("Loading batch starting at {}", paths[0]);

            let loaded = self
                .loader
                .load(&paths)
                .map_err(|e| MetricsError::batch_load_error(paths[0].clone(), e))?;

            for package in &loaded {
                if package.has_diagnostics() {
                    with_diagnostics += 1;
                    for diagnostic in &package.diagnostics {
                        warn!("Package {} has errors: {}", package.id, diagnostic);
                    }
                }
            }

            packages.extend(loaded);

            let mut description = format!("Loaded {} of {} packages", packages.len(), total);
            if with_diagnostics > 0 {
                description.push_str(&format!(" ({} with errors)", with_diagnostics));
            }
            progress.report_work(packages.len(), total, &description);
        }

        if with_diagnostics > 0 {
            warn!(
                "{} packages loaded with errors and are analyzed as found",
                with_diagnostics
            );
        }

        Ok(packages)
    }
}
