//! TypeScript re-export builder.

/// Builder for `export ... from` statements.
#[derive(Debug, Clone)]
pub struct ReExport {
    from: String,
    specifier: Option<String>,
}

impl ReExport {
    /// Re-export everything from `from` (`export * from '...'`).
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            specifier: None,
        }
    }

    /// Re-export only what `specifier` names, e.g. `{ Link, useParams }`.
    pub fn specifier(mut self, specifier: impl Into<String>) -> Self {
        self.specifier = Some(specifier.into());
        self
    }

    /// Build the statement as a single line, without trailing newline.
    pub fn build(&self) -> String {
        let what = self.specifier.as_deref().unwrap_or("*");
        format!("export {} from '{}';", what, self.from)
    }
}
