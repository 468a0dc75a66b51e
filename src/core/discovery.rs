//! Package discovery
//!
//! Walks the module tree and finds every directory holding non-test Go
//! sources, without parsing anything. Directories that can never contain
//! analyzable packages are pruned before descending.

use crate::core::progress::ProgressPlan;
use crate::error::{handle_error, MetricsError, Result, ResultExt};
use crate::models::package::PackageDescriptor;
use crate::utils::{has_go_source_files, join_import_path, relative_to_module};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

/// Directory names that are never walked
const SKIPPED_DIRS: &[&str] = &[".git", ".idea", "node_modules", "vendor", "testdata"];

/// A package pattern reduced to what it selects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackagePattern {
    /// `""` or `"./..."`: every package of the module
    All,
    /// `"."`: only the module root package
    Root,
    /// Packages at or below a path relative to the module root
    SubPath(String),
}

impl PackagePattern {
    pub fn parse(pattern: &str, module: &str) -> Self {
        let trimmed = pattern.trim();
        match trimmed {
            "" | "./..." | "..." => return PackagePattern::All,
            "." | "./" => return PackagePattern::Root,
            _ => {}
        }

        let mut rel = trimmed.strip_prefix("./").unwrap_or(trimmed);
        if !module.is_empty() {
            if let Some(inner) = relative_to_module(rel, module) {
                rel = inner;
            }
        }
        let rel = rel.strip_suffix("/...").unwrap_or(rel).trim_matches('/');

        if rel.is_empty() {
            PackagePattern::All
        } else {
            PackagePattern::SubPath(rel.to_string())
        }
    }

    /// Whether a package import path is selected
    pub fn matches(&self, import_path: &str, module: &str) -> bool {
        match self {
            PackagePattern::All => module.is_empty() || import_path.starts_with(module),
            PackagePattern::Root => import_path == join_import_path(module, Path::new("")),
            PackagePattern::SubPath(rel) => {
                let full = join_import_path(module, Path::new(rel));
                import_path == full
                    || import_path
                        .strip_prefix(full.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            }
        }
    }
}

/// Whether `import_path` is selected by `pattern` in `module`
pub fn matches_pattern(import_path: &str, module: &str, pattern: &str) -> bool {
    PackagePattern::parse(pattern, module).matches(import_path, module)
}

/// Whether a directory name is pruned from the walk
pub fn is_skipped_dir(name: &str) -> bool {
    SKIPPED_DIRS.contains(&name) || name.starts_with('.')
}

/// Finds package directories of a module
pub struct Discoverer {
    module_root: PathBuf,
    module_name: String,
    pattern: PackagePattern,
    exclude: Vec<glob::Pattern>,
    follow_links: bool,
    plan: ProgressPlan,
}

impl Discoverer {
    pub fn new(module_root: impl Into<PathBuf>, module_name: impl Into<String>) -> Self {
        Self {
            module_root: module_root.into(),
            module_name: module_name.into(),
            pattern: PackagePattern::All,
            exclude: Vec::new(),
            follow_links: false,
            plan: ProgressPlan::default(),
        }
    }

    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.pattern = PackagePattern::parse(pattern, &self.module_name);
        self
    }

    /// Extra glob patterns for directories to prune
    pub fn with_exclude_patterns(mut self, patterns: &[String]) -> Result<Self> {
        self.exclude = patterns
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(self)
    }

    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    pub fn with_plan(mut self, plan: ProgressPlan) -> Self {
        self.plan = plan;
        self
    }

    pub fn pattern(&self) -> &PackagePattern {
        &self.pattern
    }

    /// Directory the walk starts from
    pub fn search_root(&self) -> PathBuf {
        match &self.pattern {
            PackagePattern::SubPath(rel) => self.module_root.join(rel),
            PackagePattern::All | PackagePattern::Root => self.module_root.clone(),
        }
    }

    /// Walk the tree and return matching packages in path order
    ///
    /// `on_found` receives the cumulative number of matches, but only when the
    /// discovery progress value would grow.
    pub fn discover<F>(&self, mut on_found: F) -> Result<Vec<PackageDescriptor>>
    where
        F: FnMut(usize),
    {
        let search_root = self.search_root();
        let metadata = std::fs::metadata(&search_root)
            .map_err(|e| MetricsError::discovery_error(&search_root, e.to_string()))?;
        if !metadata.is_dir() {
            return Err(MetricsError::discovery_error(
                &search_root,
                "search root is not a directory",
            ));
        }

        info!("Discovering packages under {}", search_root.display());

        let mut packages = Vec::new();
        let mut last_value = self.plan.discovery_value(0);

        let walker = WalkDir::new(&search_root)
            .follow_links(self.follow_links)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| self.should_walk(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().unwrap_or(search_root.as_path()).to_path_buf();
                    let failure = Err::<DirEntry, _>(err).with_file_context(&path);
                    if let Some(critical) = failure.err().and_then(handle_error) {
                        return Err(critical);
                    }
                    continue;
                }
            };

            if !entry.file_type().is_dir() || !has_go_source_files(entry.path()) {
                continue;
            }

            let Some(import_path) = self.import_path_for(entry.path()) else {
                continue;
            };
            if !self.pattern.matches(&import_path, &self.module_name) {
                continue;
            }

            debug!("Found package {}", import_path);
            packages.push(PackageDescriptor::new(import_path, entry.path()));

            let value = self.plan.discovery_value(packages.len());
            if value > last_value {
                on_found(packages.len());
                last_value = value;
            }
        }

        info!("Discovered {} packages", packages.len());
        Ok(packages)
    }

    fn should_walk(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }

        let name = entry.file_name().to_string_lossy();
        if is_skipped_dir(&name) {
            return false;
        }

        let relative = entry
            .path()
            .strip_prefix(&self.module_root)
            .unwrap_or(entry.path());
        !self
            .exclude
            .iter()
            .any(|pattern| pattern.matches(&name) || pattern.matches_path(relative))
    }

    fn import_path_for(&self, dir: &Path) -> Option<String> {
        let relative = dir.strip_prefix(&self.module_root).ok()?;
        Some(join_import_path(&self.module_name, relative))
    }
}
