//! Package-related data structures
//!
//! A package moves through two shapes before analysis: the lightweight
//! [`PackageDescriptor`] found on disk, and the [`ResolvedPackage`] returned by
//! a package loader.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A package directory found during discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDescriptor {
    /// Full import path, e.g. `github.com/org/mod/pkg/analyzer`
    pub import_path: String,
    /// Filesystem directory holding the package sources
    pub directory: PathBuf,
    /// Whether the directory holds at least one non-test source file
    pub has_source_files: bool,
}

impl PackageDescriptor {
    pub fn new(import_path: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            import_path: import_path.into(),
            directory: directory.into(),
            has_source_files: true,
        }
    }
}

/// A soft problem reported by the loader for a package it still returned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDiagnostic {
    /// File the problem was found in, when it is tied to one
    pub file: Option<PathBuf>,
    pub message: String,
}

impl PackageDiagnostic {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            file: None,
            message: message.into(),
        }
    }

    pub fn in_file(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            file: Some(file.into()),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for PackageDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}: {}", file.display(), self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// A fully loaded package as handed out by a [`PackageLoader`](crate::core::PackageLoader)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPackage {
    /// Loader identifier; the import path for packages of the main module
    pub id: String,
    /// Declared package name (`package foo`)
    pub name: String,
    /// Imported package ids, deduplicated, in first-seen order
    pub imports: Vec<String>,
    /// Non-test source files of the package
    pub source_files: Vec<PathBuf>,
    /// Problems that did not prevent loading
    pub diagnostics: Vec<PackageDiagnostic>,
}

impl ResolvedPackage {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.imports = imports.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_source_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.source_files = files.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the loader reported soft problems for this package
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}
