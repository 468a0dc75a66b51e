//! Top-level declarations extracted from a Go source file

use serde::{Deserialize, Serialize};

/// Shape of a top-level declaration, as far as the metrics care
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclarationKind {
    /// `type X interface { ... }`
    Interface,
    /// `type X struct { ... }`
    Struct,
    /// `func X()` without a receiver
    Function,
    /// `func (r T) X()`
    Method,
    /// `type X = Y`
    TypeAlias,
    /// Any other defined type, e.g. `type X int` or `type F func()`
    OtherType,
}

impl DeclarationKind {
    pub fn is_abstract(&self) -> bool {
        matches!(self, DeclarationKind::Interface)
    }

    /// Whether the declaration contributes to Nc
    pub fn is_counted(&self) -> bool {
        matches!(
            self,
            DeclarationKind::Interface | DeclarationKind::Struct | DeclarationKind::Function
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclarationKind,
}

impl Declaration {
    pub fn new(name: impl Into<String>, kind: DeclarationKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Everything the analysis needs from one parsed source file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub package_name: String,
    /// Import paths with quotes removed, in source order
    pub imports: Vec<String>,
    pub declarations: Vec<Declaration>,
}

impl SourceFile {
    pub fn count(&self, kind: DeclarationKind) -> usize {
        self.declarations.iter().filter(|d| d.kind == kind).count()
    }
}
