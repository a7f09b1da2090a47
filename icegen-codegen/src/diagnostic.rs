//! Non-fatal diagnostics collected while registering and rendering.
//!
//! Fatal problems are returned as [`Error`](crate::Error). Everything here
//! degrades gracefully: the render pass continues and the diagnostic is
//! kept on the generator for the caller to report.

use serde::Serialize;

/// What produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A target path was re-registered with a different template.
    TemplateConflict,
    /// Generated source could not be formatted and was written as-is.
    FormatDegraded,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticKind::TemplateConflict => write!(f, "template"),
            DiagnosticKind::FormatDegraded => write!(f, "format"),
        }
    }
}

/// A warning raised by the generator.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    /// Optional location (a target or template path).
    pub location: Option<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            location: None,
        }
    }

    /// Add a location to this diagnostic.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " (at {})", loc)?;
        }
        Ok(())
    }
}
