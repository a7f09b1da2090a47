use std::time::Duration;

use clap::Args;
use eyre::Result;

use super::ProjectArgs;
use crate::{
    ops::{self, SetupOptions, WatchOptions},
    reports::TerminalOutput,
};

#[derive(Args)]
pub struct WatchCommand {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Template polling interval in milliseconds
    #[arg(long, default_value_t = 200)]
    pub poll_ms: u64,
}

impl WatchCommand {
    pub fn run(&self) -> Result<()> {
        let file = self.project.open();
        let root = self.project.root(&file);
        let mut generator = ops::build_generator(
            file.manifest(),
            root,
            SetupOptions { empty_target: true },
        )?;

        let options = WatchOptions {
            poll: Duration::from_millis(self.poll_ms),
        };
        ops::watch(&mut generator, options, &mut TerminalOutput::new())
    }
}
