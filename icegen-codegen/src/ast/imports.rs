//! TypeScript import builder.

/// Builder for TypeScript import statements.
///
/// Statements use single quotes, matching the formatter settings applied
/// to generated sources.
#[derive(Debug, Clone)]
pub struct Import {
    from: String,
    default: Option<String>,
    type_only: bool,
}

impl Import {
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            default: None,
            type_only: false,
        }
    }

    /// Import a default export.
    pub fn default(mut self, name: impl Into<String>) -> Self {
        self.default = Some(name.into());
        self
    }

    /// Make this a type-only import (`import type X from ...`).
    pub fn type_only(mut self) -> Self {
        self.type_only = true;
        self
    }

    /// Make this a type-only import when `type_only` is set.
    pub fn type_only_if(self, type_only: bool) -> Self {
        if type_only { self.type_only() } else { self }
    }

    /// Build the import as a single line, without trailing newline.
    pub fn build(&self) -> String {
        let type_kw = if self.type_only { "type " } else { "" };
        match &self.default {
            Some(def) => format!("import {}{} from '{}';", type_kw, def, self.from),
            None => format!("import '{}';", self.from),
        }
    }
}
