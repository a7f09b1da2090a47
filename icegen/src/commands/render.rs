use clap::Args;
use eyre::Result;

use super::ProjectArgs;
use crate::{
    ops::{self, SetupOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct RenderCommand {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Keep existing files in the output directory
    #[arg(long)]
    pub keep: bool,
}

impl RenderCommand {
    pub fn run(&self) -> Result<()> {
        let file = self.project.open();
        let root = self.project.root(&file);
        let mut generator = ops::build_generator(
            file.manifest(),
            root,
            SetupOptions {
                empty_target: !self.keep,
            },
        )?;

        let summary = ops::render(&mut generator)?;
        summary.render(&mut TerminalOutput::new());
        Ok(())
    }
}
