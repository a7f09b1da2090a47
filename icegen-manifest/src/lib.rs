//! `icegen.toml` parsing and validation.
//!
//! The manifest describes the project (output directory, render settings,
//! default data, flags) and the plugins registering exports, content and
//! templates. Parsing validates content types, positions and plugin names
//! and reports problems with spans into the source.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;

pub use error::{Error, Result, SourceContext};
pub use manifest::*;
