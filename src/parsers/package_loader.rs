//! Filesystem package loader for Go modules
//!
//! Resolves import paths of the main module to directories, lists their
//! non-test Go files and reads their imports. Problems that do not prevent a
//! package from being resolved are attached to it as diagnostics.

use crate::core::loader::PackageLoader;
use crate::error::{MetricsError, OptionExt, Result};
use crate::models::package::{PackageDiagnostic, ResolvedPackage};
use crate::parsers::SourceParser;
use crate::utils::{
    has_go_source_files, list_go_source_files, relative_to_module, ROOT_PACKAGE_ID,
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct FsPackageLoader {
    module_root: PathBuf,
    module_name: String,
    parser: Arc<dyn SourceParser>,
}

impl FsPackageLoader {
    pub fn new(
        module_root: impl Into<PathBuf>,
        module_name: impl Into<String>,
        parser: Arc<dyn SourceParser>,
    ) -> Self {
        Self {
            module_root: module_root.into(),
            module_name: module_name.into(),
            parser,
        }
    }

    /// Directory holding the package with the given import path
    pub fn directory_for(&self, import_path: &str) -> Option<PathBuf> {
        if self.module_name.is_empty() {
            // Without a module identity, import paths are root-relative
            return match import_path {
                ROOT_PACKAGE_ID | "" => Some(self.module_root.clone()),
                rel => Some(self.module_root.join(rel)),
            };
        }

        relative_to_module(import_path, &self.module_name).map(|rel| {
            if rel.is_empty() {
                self.module_root.clone()
            } else {
                self.module_root.join(rel)
            }
        })
    }

    fn load_one(&self, import_path: &str) -> Result<ResolvedPackage> {
        let dir = self.directory_for(import_path).ok_or_error(|| {
            MetricsError::package_resolution_error(
                import_path,
                format!("not part of module {}", self.module_name),
            )
        })?;

        let source_files = list_go_source_files(&dir).map_err(|e| {
            MetricsError::package_resolution_error(
                import_path,
                format!("cannot read {}: {}", dir.display(), e),
            )
        })?;
        if source_files.is_empty() {
            return Err(MetricsError::package_resolution_error(
                import_path,
                format!("no Go files in {}", dir.display()),
            ));
        }

        let mut package = ResolvedPackage::new(import_path);
        let mut seen = HashSet::new();

        for file in &source_files {
            match self.parser.parse_file(file) {
                Ok(parsed) => {
                    if package.name.is_empty() {
                        package.name = parsed.package_name;
                    }
                    for import in parsed.imports {
                        if seen.insert(import.clone()) {
                            package.imports.push(import);
                        }
                    }
                }
                Err(err) => {
                    package
                        .diagnostics
                        .push(PackageDiagnostic::in_file(file, err.to_string()));
                }
            }
        }

        self.check_local_imports(&mut package);
        package.source_files = source_files;

        Ok(package)
    }

    /// Flag module-local imports that point at directories without Go files
    fn check_local_imports(&self, package: &mut ResolvedPackage) {
        if self.module_name.is_empty() {
            return;
        }

        let missing: Vec<String> = package
            .imports
            .iter()
            .filter(|import| relative_to_module(import, &self.module_name).is_some())
            .filter(|import| {
                self.directory_for(import)
                    .map(|dir| !has_go_source_files(&dir))
                    .unwrap_or(true)
            })
            .cloned()
            .collect();

        for import in missing {
            package.diagnostics.push(PackageDiagnostic::new(format!(
                "could not import {} (no Go files in module directory)",
                import
            )));
        }
    }

    pub fn module_root(&self) -> &Path {
        &self.module_root
    }
}

impl PackageLoader for FsPackageLoader {
    fn load(&self, import_paths: &[String]) -> Result<Vec<ResolvedPackage>> {
        import_paths
            .iter()
            .map(|path| self.load_one(path))
            .collect()
    }
}
