//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from manifest and registration validation.
#[derive(Debug)]
pub struct CheckReport {
    pub config_path: PathBuf,
    pub project_name: Option<String>,
    pub plugin_count: usize,
    pub export_count: usize,
    pub template_count: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }
        for warning in &self.warnings {
            out.warning(warning);
        }
        if !self.errors.is_empty() || !self.warnings.is_empty() {
            out.newline();
        }

        if !self.is_valid() {
            return;
        }

        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        if let Some(name) = &self.project_name {
            out.key_value("project", name);
        }
        out.key_value("plugins", &self.plugin_count.to_string());
        out.key_value("exports", &self.export_count.to_string());
        out.key_value("templates", &self.template_count.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    fn report(errors: Vec<String>) -> CheckReport {
        CheckReport {
            config_path: "icegen.toml".into(),
            project_name: Some("demo".into()),
            plugin_count: 2,
            export_count: 3,
            template_count: 4,
            errors,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_valid_report() {
        let mut out = BufferOutput::default();
        report(Vec::new()).render(&mut out);
        assert_eq!(out.lines[0], "✓ icegen.toml is valid");
        assert!(out.lines.contains(&"templates: 4".to_string()));
    }

    #[test]
    fn test_invalid_report_lists_errors_only() {
        let mut out = BufferOutput::default();
        report(vec!["missing template".into()]).render(&mut out);
        assert_eq!(out.lines, vec!["error: missing template", ""]);
    }
}
