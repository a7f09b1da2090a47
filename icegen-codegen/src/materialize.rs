//! File materializer: renders or copies queued templates to disk.

use std::{fs, path::PathBuf};

use icegen_core::{File, copy_file, is_extension, strip_extension};
use serde::Serialize;
use serde_json::Value;
use tera::{Context, Tera};
use tracing::{debug, warn};

use crate::{
    Diagnostic, DiagnosticKind, Error, RenderData, RenderTemplate, Result, SourceFormatter,
};

/// Default extension of templated sources.
pub const TEMPLATE_EXT: &str = "tera";

/// How a queued template ended up on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "lowercase")]
pub enum Materialized {
    /// Rendered through the template engine, at the stripped target path.
    Rendered(PathBuf),
    /// Copied byte for byte.
    Copied(PathBuf),
}

impl Materialized {
    pub fn path(&self) -> &std::path::Path {
        match self {
            Materialized::Rendered(path) | Materialized::Copied(path) => path,
        }
    }
}

/// Renders templates with Tera and formats the output.
///
/// A formatter failure is reported once per materializer; later failures
/// are silent and every affected file is written unformatted.
pub struct Materializer {
    extension: String,
    formatter: Box<dyn SourceFormatter>,
    format_warning_shown: bool,
}

impl Materializer {
    pub fn new(extension: impl Into<String>, formatter: Box<dyn SourceFormatter>) -> Self {
        Self {
            extension: extension.into(),
            formatter,
            format_warning_shown: false,
        }
    }

    /// Whether `entry` is a templated source rather than a file to copy.
    pub fn is_templated(&self, entry: &RenderTemplate) -> bool {
        is_extension(&entry.template, &self.extension)
    }

    /// Write one queued template, rendering it when templated.
    pub fn materialize(
        &mut self,
        entry: &RenderTemplate,
        data: &RenderData,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Materialized> {
        if !self.is_templated(entry) {
            fs::metadata(&entry.template).map_err(|e| Error::read(&entry.template, e))?;
            copy_file(&entry.template, &entry.target)
                .map_err(|e| Error::write(&entry.target, e))?;
            debug!(
                template = %entry.template.display(),
                target = %entry.target.display(),
                "copied"
            );
            return Ok(Materialized::Copied(entry.target.clone()));
        }

        let file = self.render(entry, data, diagnostics)?;
        file.write().map_err(|e| Error::write(file.path(), e))?;
        debug!(
            template = %entry.template.display(),
            target = %file.path().display(),
            "rendered"
        );
        Ok(Materialized::Rendered(file.path().to_path_buf()))
    }

    /// Render a templated source in memory, without writing it.
    pub fn render(
        &mut self,
        entry: &RenderTemplate,
        data: &RenderData,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<File> {
        let source = fs::read_to_string(&entry.template)
            .map_err(|e| Error::read(&entry.template, e))?;
        let context = entry.extra.resolve(data);
        let rendered = render_str(&source, context).map_err(|source| Error::Render {
            template: entry.template.clone(),
            source,
        })?;

        let content = match self.formatter.format(&rendered) {
            Ok(formatted) => formatted,
            Err(err) => {
                if !self.format_warning_shown {
                    self.format_warning_shown = true;
                    warn!("format error: {err}");
                    let message = format!("format error: {err}");
                    diagnostics.push(
                        Diagnostic::new(DiagnosticKind::FormatDegraded, message)
                            .at(entry.target.display().to_string()),
                    );
                }
                rendered
            }
        };

        Ok(File::new(
            strip_extension(&entry.target, &self.extension),
            content,
        ))
    }
}

impl std::fmt::Debug for Materializer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Materializer")
            .field("extension", &self.extension)
            .field("format_warning_shown", &self.format_warning_shown)
            .finish_non_exhaustive()
    }
}

fn render_str(source: &str, data: RenderData) -> tera::Result<String> {
    let context = Context::from_value(Value::Object(data))?;
    Tera::one_off(source, &context, false)
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::{ExtraData, FormatError, Passthrough};

    struct Failing(Rc<Cell<usize>>);

    impl SourceFormatter for Failing {
        fn format(&self, _source: &str) -> std::result::Result<String, FormatError> {
            self.0.set(self.0.get() + 1);
            Err(FormatError::Failed {
                program: "prettier".into(),
                stderr: "SyntaxError: unexpected token".into(),
            })
        }
    }

    fn data(value: Value) -> RenderData {
        value.as_object().cloned().unwrap()
    }

    fn entry(template: PathBuf, target: PathBuf) -> RenderTemplate {
        RenderTemplate {
            template,
            target,
            extra: ExtraData::None,
        }
    }

    #[test]
    fn test_render_strips_extension() {
        let temp = TempDir::new().unwrap();
        let template = temp.path().join("index.ts.tera");
        fs::write(&template, "export const title = '{{ title }}';").unwrap();
        let target = temp.path().join(".ice").join("index.ts.tera");

        let mut materializer = Materializer::new(TEMPLATE_EXT, Box::new(Passthrough));
        let mut diagnostics = Vec::new();
        let data = data(json!({"title": "demo"}));
        let outcome = materializer
            .materialize(&entry(template, target), &data, &mut diagnostics)
            .unwrap();

        let written = temp.path().join(".ice").join("index.ts");
        assert_eq!(outcome, Materialized::Rendered(written.clone()));
        assert_eq!(
            fs::read_to_string(written).unwrap(),
            "export const title = 'demo';"
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_non_template_is_copied() {
        let temp = TempDir::new().unwrap();
        let template = temp.path().join("favicon.ico");
        let bytes = [0u8, 159, 146, 150, b'{', b'{'];
        fs::write(&template, bytes).unwrap();
        let target = temp.path().join(".ice").join("favicon.ico");

        let mut materializer = Materializer::new(TEMPLATE_EXT, Box::new(Passthrough));
        let outcome = materializer
            .materialize(
                &entry(template, target.clone()),
                &RenderData::new(),
                &mut Vec::new(),
            )
            .unwrap();

        assert_eq!(outcome, Materialized::Copied(target.clone()));
        assert_eq!(fs::read(target).unwrap(), bytes);
    }

    #[test]
    fn test_format_failure_warns_once() {
        let temp = TempDir::new().unwrap();
        let calls = Rc::new(Cell::new(0));
        let mut materializer = Materializer::new(TEMPLATE_EXT, Box::new(Failing(calls.clone())));
        let mut diagnostics = Vec::new();

        for name in ["a.ts", "b.ts"] {
            let template = temp.path().join(format!("{name}.tera"));
            fs::write(&template, "const x   =  {{ n }}").unwrap();
            let target = temp.path().join("out").join(format!("{name}.tera"));
            materializer
                .materialize(&entry(template, target), &data(json!({"n": 1})), &mut diagnostics)
                .unwrap();
        }

        assert_eq!(calls.get(), 2);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::FormatDegraded);
        assert_eq!(
            fs::read_to_string(temp.path().join("out").join("b.ts")).unwrap(),
            "const x   =  1"
        );
    }

    #[test]
    fn test_missing_template_is_read_error() {
        let temp = TempDir::new().unwrap();
        let mut materializer = Materializer::new(TEMPLATE_EXT, Box::new(Passthrough));
        let result = materializer.materialize(
            &entry(temp.path().join("missing.ts.tera"), temp.path().join("out.ts.tera")),
            &RenderData::new(),
            &mut Vec::new(),
        );
        assert!(matches!(result, Err(Error::Read { .. })));
    }

    #[test]
    fn test_missing_copy_source_is_read_error() {
        let temp = TempDir::new().unwrap();
        let template = temp.path().join("logo.png");
        let mut materializer = Materializer::new(TEMPLATE_EXT, Box::new(Passthrough));

        let result = materializer.materialize(
            &entry(template.clone(), temp.path().join(".ice").join("logo.png")),
            &RenderData::new(),
            &mut Vec::new(),
        );

        match result {
            Err(Error::Read { path, .. }) => assert_eq!(path, template),
            other => panic!("expected read error, got {other:?}"),
        }
    }

    #[test]
    fn test_template_syntax_error_is_render_error() {
        let temp = TempDir::new().unwrap();
        let template = temp.path().join("broken.ts.tera");
        fs::write(&template, "{% if %}").unwrap();

        let mut materializer = Materializer::new(TEMPLATE_EXT, Box::new(Passthrough));
        let result = materializer.materialize(
            &entry(template, temp.path().join("broken.ts.tera.out")),
            &RenderData::new(),
            &mut Vec::new(),
        );
        assert!(matches!(result, Err(Error::Render { .. })));
    }
}
