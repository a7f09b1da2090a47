mod check;
mod preview;
mod render;
mod watch;

use std::path::{Path, PathBuf};

use check::CheckCommand;
use clap::{Args, Parser, Subcommand};
use eyre::Result;
use icegen_manifest::IcegenToml;
use preview::PreviewCommand;
use render::RenderCommand;
use watch::WatchCommand;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for icegen_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

/// Arguments shared by every command that loads a project.
#[derive(Args, Debug)]
pub(crate) struct ProjectArgs {
    /// Path to icegen.toml (defaults to ./icegen.toml)
    #[arg(short, long, default_value = icegen_manifest::MANIFEST_FILE)]
    pub config: PathBuf,

    /// Project root (defaults to the directory containing icegen.toml)
    #[arg(long)]
    pub root: Option<PathBuf>,
}

impl ProjectArgs {
    /// Load the manifest, exiting with a diagnostic when it is invalid.
    pub fn open(&self) -> IcegenToml {
        IcegenToml::open(&self.config).unwrap_or_exit()
    }

    pub fn root<'a>(&'a self, file: &'a IcegenToml) -> &'a Path {
        self.root.as_deref().unwrap_or(file.root_dir())
    }
}

#[derive(Parser)]
#[command(name = "icegen")]
#[command(version)]
#[command(about = "Generate framework runtime entries from icegen.toml")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Render(cmd) => cmd.run(),
            Commands::Preview(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Watch(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render every registered template into the output directory
    Render(RenderCommand),

    /// Print the render data and render queue without writing files
    Preview(PreviewCommand),

    /// Validate icegen.toml and its registrations without writing files
    Check(CheckCommand),

    /// Render, then re-render when templates change
    Watch(WatchCommand),
}
