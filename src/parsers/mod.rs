//! Parsing functionality for Go modules
//!
//! Provides the source parser, the go.mod reader and the filesystem package
//! loader that the analysis core consumes through the traits below.

pub mod go_mod;
pub mod go_parser;
pub mod package_loader;

use crate::error::Result;
use crate::models::declarations::SourceFile;
use std::path::Path;

pub use go_mod::{parse_module_directive, GoModReader};
pub use go_parser::GoSourceParser;
pub use package_loader::FsPackageLoader;

/// Turns one source file into its imports and top-level declarations
pub trait SourceParser: Send + Sync {
    fn parse_file(&self, path: &Path) -> Result<SourceFile>;
}

/// Supplies the declared identity of a module
pub trait ModuleMetadataProvider {
    /// Module identity declared under `module_root`, or `""` if unknown
    fn module_name(&self, module_root: &Path) -> String;
}
