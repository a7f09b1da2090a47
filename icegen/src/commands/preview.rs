use clap::Args;
use eyre::{Context, Result};
use icegen_codegen::TEMPLATE_EXT;

use super::ProjectArgs;
use crate::{
    ops::{self, SetupOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct PreviewCommand {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Print the preview as JSON
    #[arg(long)]
    pub json: bool,
}

impl PreviewCommand {
    pub fn run(&self) -> Result<()> {
        let file = self.project.open();
        let root = self.project.root(&file);
        let generator = ops::build_generator(
            file.manifest(),
            root,
            SetupOptions {
                empty_target: false,
            },
        )?;

        let report = ops::preview(&generator, TEMPLATE_EXT);
        if self.json {
            let json =
                serde_json::to_string_pretty(&report).wrap_err("Failed to serialize preview")?;
            println!("{json}");
        } else {
            report.render(&mut TerminalOutput::new());
        }
        Ok(())
    }
}
