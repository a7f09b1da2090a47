use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source content and filename of the manifest being checked.
///
/// Every spanned error points back into this source.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error with a span.
    pub fn validation_error_at(
        &self,
        message: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: Some(span.into()),
            message: message.into(),
        })
    }

    pub fn invalid_content_type_error(
        &self,
        value: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidContentType {
            src: self.named_source(),
            span: span.into(),
            value: value.into(),
        })
    }

    pub fn invalid_position_error(
        &self,
        value: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidPosition {
            src: self.named_source(),
            span: span.into(),
            value: value.into(),
        })
    }

    pub fn duplicate_plugin_error(
        &self,
        name: impl Into<String>,
        first_span: impl Into<SourceSpan>,
        second_span: impl Into<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::DuplicatePlugin {
            src: self.named_source(),
            first_span: first_span.into(),
            second_span: second_span.into(),
            name: name.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("create an icegen.toml at the project root, or pass one with --config"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse icegen.toml")]
    #[diagnostic(code(icegen::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid content type '{value}'")]
    #[diagnostic(
        code(icegen::invalid_content_type),
        help("valid content types are: framework, frameworkTypes, configTypes")
    )]
    InvalidContentType {
        #[source_code]
        src: NamedSource<String>,
        #[label("unknown content type")]
        span: SourceSpan,
        value: String,
    },

    #[error("invalid position '{value}'")]
    #[diagnostic(code(icegen::invalid_position), help("use before|after, or leave it out"))]
    InvalidPosition {
        #[source_code]
        src: NamedSource<String>,
        #[label("unknown position")]
        span: SourceSpan,
        value: String,
    },

    #[error("duplicate plugin '{name}'")]
    #[diagnostic(
        code(icegen::duplicate_plugin),
        help("merge the two [[plugins]] entries or give one a different name")
    )]
    DuplicatePlugin {
        #[source_code]
        src: NamedSource<String>,
        #[label("first declared here")]
        first_span: SourceSpan,
        #[label("declared again here")]
        second_span: SourceSpan,
        name: String,
    },

    #[error("{message}")]
    #[diagnostic(code(icegen::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },
}
