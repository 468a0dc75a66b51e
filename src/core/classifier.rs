//! Import path classification
//!
//! Without a full module resolver the origin of an import is decided from
//! its shape. Two strategies exist depending on whether the module identity
//! is known; both are exposed so they can be exercised on their own.

use crate::utils::{is_within_module, ROOT_PACKAGE_ID};

const VENDOR_PREFIX: &str = "vendor/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportClass {
    /// Go standard library
    Standard,
    /// Copied into the module's vendor tree
    Vendored,
    /// Package of the analyzed module
    ModuleLocal,
    /// Third-party module
    External,
}

impl ImportClass {
    /// Only module-local packages take part in the dependency graph
    pub fn is_graph_member(&self) -> bool {
        matches!(self, ImportClass::ModuleLocal)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ImportClassifier {
    module: Option<String>,
}

impl ImportClassifier {
    /// An empty module name means the identity is unknown
    pub fn new(module_name: &str) -> Self {
        let module = module_name.trim();
        Self {
            module: (!module.is_empty()).then(|| module.to_string()),
        }
    }

    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    pub fn classify(&self, import_path: &str) -> ImportClass {
        if import_path.starts_with(VENDOR_PREFIX) {
            return ImportClass::Vendored;
        }
        match &self.module {
            Some(module) => classify_with_module(import_path, module),
            None => classify_without_module(import_path),
        }
    }

    pub fn is_graph_member(&self, import_path: &str) -> bool {
        self.classify(import_path).is_graph_member()
    }
}

/// Classification when the module identity is known
///
/// The module prefix wins over every other rule, so a module named `tools`
/// still owns `tools/x`.
pub fn classify_with_module(import_path: &str, module: &str) -> ImportClass {
    if is_within_module(import_path, module) {
        return ImportClass::ModuleLocal;
    }
    let first_segment = import_path.split('/').next().unwrap_or(import_path);
    if first_segment.contains('.') {
        ImportClass::External
    } else {
        ImportClass::Standard
    }
}

/// Classification when only the import path is available
///
/// The root package id `.` has no host segment and is never module-local.
pub fn classify_without_module(import_path: &str) -> ImportClass {
    if import_path != ROOT_PACKAGE_ID && import_path.contains('.') {
        ImportClass::ModuleLocal
    } else {
        ImportClass::Standard
    }
}
