//! Go source file detection

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use super::build_constraints::BuildContext;

/// `.go` files that are not `_test.go` files
pub fn is_go_source_file(file_name: &str) -> bool {
    file_name.ends_with(".go") && !file_name.ends_with("_test.go")
}

/// Whether the Go file at `path` is built for `context`
pub fn is_buildable(path: &Path, context: &BuildContext) -> io::Result<bool> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if !context.matches_file_name(&name) {
        return Ok(false);
    }
    context.matches_source(BufReader::new(File::open(path)?))
}

/// Non-test Go files directly inside `dir` that build on the host, sorted by path
pub fn list_go_source_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    list_go_source_files_for(dir, &BuildContext::host())
}

/// Non-test Go files directly inside `dir` that build for `context`, sorted by path
pub fn list_go_source_files_for(dir: &Path, context: &BuildContext) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if is_go_source_file(&entry.file_name().to_string_lossy())
            && is_buildable(&entry.path(), context)?
        {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// Whether `dir` holds at least one non-test Go file that builds on the
/// host; unreadable means no
pub fn has_go_source_files(dir: &Path) -> bool {
    let context = BuildContext::host();
    match fs::read_dir(dir) {
        Ok(entries) => entries.flatten().any(|entry| {
            entry.file_type().map(|t| t.is_file()).unwrap_or(false)
                && is_go_source_file(&entry.file_name().to_string_lossy())
                && is_buildable(&entry.path(), &context).unwrap_or(false)
        }),
        Err(_) => false,
    }
}
