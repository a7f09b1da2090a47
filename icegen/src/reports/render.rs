//! Render command report data structures.

use std::path::{Path, PathBuf};

use icegen_codegen::{Diagnostic, RenderReport};

use super::output::{Output, Report};

/// Report data from one render pass.
#[derive(Debug)]
pub struct RenderSummary {
    /// Output directory, used to shorten file paths.
    pub output_dir: PathBuf,
    /// Render pass number, starting at 1.
    pub pass: usize,
    pub written: Vec<PathBuf>,
    pub copied: Vec<PathBuf>,
    /// Non-fatal warnings raised since the previous report.
    pub warnings: Vec<String>,
}

impl RenderSummary {
    pub fn new(
        output_dir: &Path,
        pass: usize,
        report: RenderReport,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            pass,
            written: report.written,
            copied: report.copied,
            warnings: diagnostics.iter().map(ToString::to_string).collect(),
        }
    }

    fn display<'a>(&self, path: &'a Path) -> std::path::Display<'a> {
        path.strip_prefix(&self.output_dir).unwrap_or(path).display()
    }
}

impl Report for RenderSummary {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        let total = self.written.len() + self.copied.len();
        out.key_value(
            &format!("render #{}", self.pass),
            &format!(
                "{} file{} in {}",
                total,
                if total == 1 { "" } else { "s" },
                self.output_dir.display()
            ),
        );
        for path in &self.written {
            out.added_item(&self.display(path).to_string());
        }
        for path in &self.copied {
            out.added_item(&format!("{} (copied)", self.display(path)));
        }
    }
}

#[cfg(test)]
mod tests {
    use icegen_codegen::DiagnosticKind;

    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_render_summary_lists_files() {
        let summary = RenderSummary::new(
            Path::new("/app/.ice"),
            1,
            RenderReport {
                written: vec!["/app/.ice/index.ts".into()],
                copied: vec!["/app/.ice/core/logo.png".into()],
            },
            vec![Diagnostic::new(DiagnosticKind::TemplateConflict, "path reused")],
        );

        let mut out = BufferOutput::default();
        summary.render(&mut out);

        assert_eq!(
            out.lines,
            vec![
                "warning: [template] path reused",
                "render #1: 2 files in /app/.ice",
                "  + index.ts",
                "  + core/logo.png (copied)",
            ]
        );
    }
}
