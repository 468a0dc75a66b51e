//! go.mod reader providing the module identity

use crate::parsers::ModuleMetadataProvider;
use std::fs;
use std::path::Path;

pub const GO_MOD_FILE: &str = "go.mod";

/// Reads the `module` directive from `<root>/go.mod`
#[derive(Debug, Default, Clone, Copy)]
pub struct GoModReader;

impl GoModReader {
    pub fn new() -> Self {
        Self
    }
}

impl ModuleMetadataProvider for GoModReader {
    fn module_name(&self, module_root: &Path) -> String {
        match fs::read_to_string(module_root.join(GO_MOD_FILE)) {
            Ok(content) => parse_module_directive(&content).unwrap_or_default(),
            Err(err) => {
                tracing::debug!("no readable go.mod in {}: {}", module_root.display(), err);
                String::new()
            }
        }
    }
}

/// Extract the module path from go.mod content
pub fn parse_module_directive(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let line = line.trim();
        let rest = line.strip_prefix("module")?;
        // `modulefoo` is not a directive
        if !rest.starts_with(char::is_whitespace) && !rest.starts_with('"') {
            return None;
        }

        let rest = match rest.find("//") {
            Some(idx) => &rest[..idx],
            None => rest,
        };
        let name = rest.trim().trim_matches(|c| c == '"' || c == '`');
        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    })
}
