//! Validation context and checks for parsed manifests.

use std::{collections::HashMap, ops::Range, sync::Arc};

use icegen_core::{ContentType, Position};

use super::{PluginConfig, Target};
use crate::{Result, error::SourceContext};

/// Validation context that carries source information.
///
/// Values are checked against their spans in the original source, so every
/// error can point at the offending text.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "icegen.toml");
/// ctx.validate_plugins(&manifest.plugins)?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext {
    source: Arc<SourceContext>,
}

impl ParseContext {
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
        }
    }

    pub fn src(&self) -> &str {
        self.source.src()
    }

    pub fn filename(&self) -> &str {
        self.source.filename()
    }

    /// Get the source context for error creation.
    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Check that a registration target names a known content type and position.
    pub fn validate_target(&self, target: &Target) -> Result<(ContentType, Option<Position>)> {
        let content_type = target.content_type().map_err(|_| {
            self.source.invalid_content_type_error(
                target.content_type.get_ref(),
                value_span(self.src(), target.content_type.span()),
            )
        })?;

        let position = target.position().map_err(|_| {
            let (value, span) = target
                .position
                .as_ref()
                .map(|p| (p.get_ref().as_str(), p.span()))
                .unwrap_or_default();
            self.source
                .invalid_position_error(value, value_span(self.src(), span))
        })?;

        Ok((content_type, position))
    }

    /// Check plugin names: non-empty and unique.
    pub fn validate_plugins(&self, plugins: &[PluginConfig]) -> Result<()> {
        let mut seen: HashMap<&str, Range<usize>> = HashMap::new();

        for plugin in plugins {
            let name = plugin.name();
            let span = value_span(self.src(), plugin.name.span());

            if name.trim().is_empty() {
                return Err(self
                    .source
                    .validation_error_at("plugin name cannot be empty", span));
            }

            if let Some(first) = seen.get(name) {
                return Err(self.source.duplicate_plugin_error(
                    name,
                    value_span(self.src(), first.clone()),
                    span,
                ));
            }
            seen.insert(name, plugin.name.span());
        }
        Ok(())
    }
}

/// Narrow a string value's span to its contents, dropping the quotes.
pub(crate) fn value_span(src: &str, span: Range<usize>) -> Range<usize> {
    let text = src.get(span.clone()).unwrap_or_default();
    let quoted = text.len() >= 2
        && (text.starts_with('"') && text.ends_with('"')
            || text.starts_with('\'') && text.ends_with('\''));
    if quoted {
        span.start + 1..span.end - 1
    } else {
        span
    }
}
