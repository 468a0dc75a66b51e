//! Import path helpers shared by discovery, loading and reporting
//!
//! Import paths always use `/` separators regardless of the host platform.

use std::path::{Component, Path};

/// Id of the root package of a module whose identity is unknown
pub const ROOT_PACKAGE_ID: &str = ".";

/// Whether `import_path` is the module itself or a package below it
///
/// Matching is segment-aware: `github.com/org/mod2` is not within
/// `github.com/org/mod`.
pub fn is_within_module(import_path: &str, module: &str) -> bool {
    if module.is_empty() {
        return false;
    }
    relative_to_module(import_path, module).is_some()
}

/// Path of `import_path` relative to `module`; `""` for the module root
pub fn relative_to_module<'a>(import_path: &'a str, module: &str) -> Option<&'a str> {
    if import_path == module {
        return Some("");
    }
    import_path
        .strip_prefix(module)
        .and_then(|rest| rest.strip_prefix('/'))
}

/// Build an import path from a module identity and a relative directory
pub fn join_import_path(module: &str, relative: &Path) -> String {
    let segments: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    match (module.is_empty(), segments.is_empty()) {
        (true, true) => ROOT_PACKAGE_ID.to_string(),
        (true, false) => segments.join("/"),
        (false, true) => module.to_string(),
        (false, false) => format!("{}/{}", module, segments.join("/")),
    }
}

/// Last `/`-separated segment of a path
pub fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
