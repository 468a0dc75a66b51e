//! Package design metrics for a whole module

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Martin metrics of one package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageMetrics {
    /// Display name, relative to the module identity
    pub name: String,
    /// Full package id
    pub id: String,
    /// Afferent coupling: module packages depending on this one
    pub ca: usize,
    /// Efferent coupling: module packages this one depends on
    pub ce: usize,
    /// Abstract declarations (interfaces)
    pub na: usize,
    /// Counted declarations (interfaces, structs, standalone functions)
    pub nc: usize,
    /// I = Ce / (Ca + Ce)
    pub instability: f64,
    /// A = Na / Nc
    pub abstractness: f64,
    /// D = |A + I - 1|
    pub distance: f64,
}

/// Metrics of every analyzed package of a module, keyed by display name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleMetrics {
    pub module_path: PathBuf,
    /// Declared module identity (empty when unknown)
    pub module_name: String,
    pub packages: BTreeMap<String, PackageMetrics>,
    pub analyzed_at: chrono::DateTime<chrono::Utc>,
}

impl ModuleMetrics {
    pub fn new(module_path: impl Into<PathBuf>, module_name: impl Into<String>) -> Self {
        Self {
            module_path: module_path.into(),
            module_name: module_name.into(),
            packages: BTreeMap::new(),
            analyzed_at: chrono::Utc::now(),
        }
    }

    pub fn get(&self, display_name: &str) -> Option<&PackageMetrics> {
        self.packages.get(display_name)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Average distance from the main sequence over all packages
    pub fn mean_distance(&self) -> f64 {
        if self.packages.is_empty() {
            return 0.0;
        }
        self.packages.values().map(|p| p.distance).sum::<f64>() / self.packages.len() as f64
    }
}
