use std::path::PathBuf;

use icegen_core::{InvalidContentType, InvalidPosition, RegistrationKey};
use miette::Diagnostic;
use thiserror::Error;

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// Two descriptors resolve to the same identity under one registration key.
    #[error("duplicate export data added by {key}, {descriptor}")]
    #[diagnostic(
        code(icegen::duplicate_export),
        help("'{identity}' is already registered; remove the existing export or rename this one")
    )]
    DuplicateExport {
        key: RegistrationKey,
        identity: String,
        descriptor: String,
    },

    #[error(transparent)]
    #[diagnostic(code(icegen::invalid_content_type))]
    InvalidContentType(#[from] InvalidContentType),

    #[error(transparent)]
    #[diagnostic(code(icegen::invalid_position))]
    InvalidPosition(#[from] InvalidPosition),

    #[error("failed to read '{path}'")]
    #[diagnostic(code(icegen::io))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{path}'")]
    #[diagnostic(code(icegen::io))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to scan template directory '{path}'")]
    #[diagnostic(code(icegen::io))]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to render template '{template}'")]
    #[diagnostic(code(icegen::render_error))]
    Render {
        template: PathBuf,
        #[source]
        source: tera::Error,
    },
}

impl Error {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Write {
            path: path.into(),
            source,
        }
    }
}
