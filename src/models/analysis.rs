//! Per-package analysis results produced by the worker pool

use super::declarations::{DeclarationKind, SourceFile};
use crate::error::MetricsError;
use serde::{Deserialize, Serialize};

/// Abstract and total declaration counts of one package
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCounts {
    /// Na: interface declarations
    pub abstract_count: usize,
    /// Nc: interfaces + structs + standalone functions
    pub total_type_count: usize,
}

/// Running tally of counted declarations while a worker walks a package
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeclarationTally {
    pub interfaces: usize,
    pub structs: usize,
    pub functions: usize,
}

impl DeclarationTally {
    pub fn add_file(&mut self, file: &SourceFile) {
        for decl in &file.declarations {
            match decl.kind {
                DeclarationKind::Interface => self.interfaces += 1,
                DeclarationKind::Struct => self.structs += 1,
                DeclarationKind::Function => self.functions += 1,
                // Methods, aliases and other defined types stay out of Nc
                DeclarationKind::Method
                | DeclarationKind::TypeAlias
                | DeclarationKind::OtherType => {}
            }
        }
    }

    pub fn type_counts(&self) -> TypeCounts {
        TypeCounts {
            abstract_count: self.interfaces,
            total_type_count: self.interfaces + self.structs + self.functions,
        }
    }
}

/// Outcome of analyzing a single package
///
/// Created by exactly one worker and consumed by the aggregator. A result
/// without an error and with `node == false` stands for a package that was
/// classified out of the graph (standard library or vendored).
#[derive(Debug)]
pub struct AnalysisResult {
    pub package_id: String,
    /// Module-local dependencies, in import order
    pub dependencies: Vec<String>,
    pub counts: TypeCounts,
    /// Whether this package becomes a graph node
    pub node: bool,
    pub error: Option<MetricsError>,
}

impl AnalysisResult {
    /// A package that contributes a graph node
    pub fn node(package_id: impl Into<String>, dependencies: Vec<String>, counts: TypeCounts) -> Self {
        Self {
            package_id: package_id.into(),
            dependencies,
            counts,
            node: true,
            error: None,
        }
    }

    /// A package excluded from the graph without error
    pub fn skipped(package_id: impl Into<String>) -> Self {
        Self {
            package_id: package_id.into(),
            dependencies: Vec::new(),
            counts: TypeCounts::default(),
            node: false,
            error: None,
        }
    }

    pub fn failed(package_id: impl Into<String>, error: MetricsError) -> Self {
        Self {
            package_id: package_id.into(),
            dependencies: Vec::new(),
            counts: TypeCounts::default(),
            node: false,
            error: Some(error),
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.node
    }
}
