//! Render operation - one full render pass.

use eyre::{Context, Result};
use icegen_codegen::Generator;

use crate::reports::RenderSummary;

/// Execute a render pass and collect the warnings it raised.
pub fn render(generator: &mut Generator) -> Result<RenderSummary> {
    let report = generator.render().wrap_err("Render failed")?;
    Ok(RenderSummary::new(
        &generator.output_dir(),
        generator.render_count(),
        report,
        generator.take_diagnostics(),
    ))
}

#[cfg(test)]
mod tests {
    use icegen_codegen::{ExtraData, testing::TempProject};

    use super::*;

    #[test]
    fn test_render_collects_conflicts() {
        let project = TempProject::new().unwrap();
        let a = project.write("a/index.ts.tera", "export const a = 1;").unwrap();
        let b = project.write("b/index.ts.tera", "export const b = 2;").unwrap();
        let mut generator = project.generator().unwrap();
        let target = generator.output_dir().join("index.ts.tera");
        generator.add_render_file(a, target.clone(), ExtraData::None);
        generator.add_render_file(b, target, ExtraData::None);

        let summary = render(&mut generator).unwrap();

        assert_eq!(summary.pass, 1);
        assert_eq!(summary.written, vec![generator.output_dir().join("index.ts")]);
        assert_eq!(summary.warnings.len(), 1);
        assert!(generator.diagnostics().is_empty());
        assert_eq!(project.output("index.ts").unwrap(), "export const b = 2;");
    }
}
