//! Shared helpers

pub mod build_constraints;
pub mod import_path;
pub mod source_files;

pub use build_constraints::BuildContext;
pub use import_path::{
    is_within_module, join_import_path, last_segment, relative_to_module, ROOT_PACKAGE_ID,
};
pub use source_files::{
    has_go_source_files, is_buildable, is_go_source_file, list_go_source_files,
    list_go_source_files_for,
};
