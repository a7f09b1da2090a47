//! Core types and utilities for the icegen runtime generator.
//!
//! This crate provides the content-type vocabulary and file helpers shared
//! by the manifest parser, the generator, and the CLI.

mod content;
mod export;
mod file;
mod path;

// Registration vocabulary
pub use content::{ContentType, InvalidContentType, InvalidPosition, Position, RegistrationKey};
// Plugin-contributed exports
pub use export::ExportDescriptor;
// File operations
pub use file::{File, copy_file, empty_dir, write_file};
// Path utilities
pub use path::{format_path, has_extension, is_extension, relative_path, strip_extension};
