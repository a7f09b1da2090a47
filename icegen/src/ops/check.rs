//! Check operation - manifest and registration validation.

use std::path::Path;

use eyre::Result;
use icegen_codegen::ContentType;
use icegen_manifest::Manifest;

use super::setup::{SetupOptions, build_generator};
use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Applies every registration to a generator that never touches the output
/// directory, so duplicate exports surface exactly as they would on render.
pub fn check(manifest: &Manifest, root: &Path, config_path: &Path) -> Result<CheckReport> {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut export_count = 0;
    let mut template_count = 0;

    match build_generator(manifest, root, SetupOptions { empty_target: false }) {
        Ok(mut generator) => {
            export_count = ContentType::ALL
                .into_iter()
                .map(|ct| generator.registry().composed_exports(ct).len())
                .sum();
            template_count = generator.queue().len();
            for entry in generator.queue().iter() {
                if !entry.template.is_file() {
                    errors.push(format!("template not found: {}", entry.template.display()));
                }
            }
            warnings.extend(generator.take_diagnostics().iter().map(ToString::to_string));
        }
        Err(err) => errors.push(format!("{err:#}")),
    }

    Ok(CheckReport {
        config_path: config_path.to_path_buf(),
        project_name: manifest.project.name.clone(),
        plugin_count: manifest.plugins.len(),
        export_count,
        template_count,
        errors,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use icegen_codegen::testing::TempProject;

    use super::*;

    #[test]
    fn test_check_counts_registrations() {
        let project = TempProject::new().unwrap();
        project.write("templates/index.ts.tera", "").unwrap();
        project.write(".ice/keep.ts", "keep").unwrap();
        let manifest: Manifest = r#"
            [project]
            name = "demo"

            [[templates]]
            template = "templates"

            [[plugins]]
            name = "plugin-a"
            [[plugins.exports]]
            content_type = "framework"
            export_name = "a"
            [[plugins.exports]]
            content_type = "frameworkTypes"
            export_name = "A"
        "#
        .parse()
        .unwrap();

        let report = check(&manifest, project.root(), Path::new("icegen.toml")).unwrap();

        assert!(report.is_valid());
        assert_eq!(report.export_count, 2);
        assert_eq!(report.template_count, 1);
        assert!(project.path(".ice/keep.ts").exists());
    }

    #[test]
    fn test_check_reports_missing_template() {
        let project = TempProject::new().unwrap();
        let manifest: Manifest = r#"
            [[templates]]
            template = "templates/missing.ts.tera"
        "#
        .parse()
        .unwrap();

        let report = check(&manifest, project.root(), Path::new("icegen.toml")).unwrap();

        assert!(!report.is_valid());
        assert!(report.errors[0].contains("missing.ts.tera"));
    }
}
