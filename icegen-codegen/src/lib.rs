//! Runtime entry generator for icegen projects.
//!
//! Plugins register typed exports, render files and render-data transforms
//! against a [`Generator`]; a render pass turns them into source files
//! under the project's target directory.
//!
//! # Module Organization
//!
//! - [`registry`] - Export registry keyed by content type and position
//! - [`fragments`] - Export renderer producing import/export fragments
//! - [`render_data`] - Render-data discovery and per-template extra data
//! - [`queue`] - Template render queue and template directory expansion
//! - [`materialize`] - Template rendering, formatting and file output
//! - [`schedule`] - Debounced re-render scheduling
//! - [`generator`] - The [`Generator`] tying everything together
//! - [`testing`] - Test utilities (feature-gated)

pub mod ast;
mod diagnostic;
mod error;
pub mod format;
pub mod fragments;
pub mod generator;
pub mod materialize;
pub mod queue;
pub mod registry;
pub mod render_data;
pub mod runtime;
pub mod schedule;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use error::{Error, Result};
pub use format::{CommandFormatter, FormatError, Passthrough, SourceFormatter};
pub use fragments::{ExportFragments, render_exports, render_imports};
pub use generator::{DEFAULT_TARGET_DIR, Generator, GeneratorOptions, RenderReport};
pub use materialize::{Materialized, Materializer, TEMPLATE_EXT};
pub use queue::{Registration, RenderQueue, RenderTemplate, TemplateOptions};
pub use registry::{ContentEntry, ContentRegistry, parse_key};
pub use render_data::{
    ExtraData, GLOBAL_STYLE_GLOB, RenderData, RenderDataTransform, STATIC_CONFIG_PATH,
    discover_global_style, discover_static_config,
};
pub use runtime::{PluginInfo, PluginRuntimes, RuntimeModule, RuntimeModuleDiscovery};
pub use schedule::{Debouncer, RENDER_WAIT};

pub use icegen_core::{ContentType, ExportDescriptor, Position, RegistrationKey};
