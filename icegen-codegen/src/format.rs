//! Source formatting for generated files.

use std::{
    io::{self, Write},
    process::{Command, Stdio},
    thread,
};

use thiserror::Error;

/// Error from a formatter. Never fatal to a render pass.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("failed to run formatter '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("formatter '{program}' failed: {stderr}")]
    Failed { program: String, stderr: String },
    #[error("formatter '{program}' produced invalid UTF-8")]
    Encoding { program: String },
}

/// Formats generated TypeScript source.
pub trait SourceFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError>;
}

/// Leaves source untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl SourceFormatter for Passthrough {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        Ok(source.to_string())
    }
}

/// Pipes source through an external formatter reading stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFormatter {
    program: String,
    args: Vec<String>,
}

impl CommandFormatter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Build from a command line such as `["prettier", "--parser", "typescript"]`.
    ///
    /// Returns `None` for an empty command.
    pub fn from_command(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// `prettier --parser typescript --single-quote`.
    pub fn prettier() -> Self {
        Self::new("prettier")
            .arg("--parser")
            .arg("typescript")
            .arg("--single-quote")
    }
}

impl SourceFormatter for CommandFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        let spawn_error = |source| FormatError::Spawn {
            program: self.program.clone(),
            source,
        };

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        // Stdin is fed from its own thread; the child may fill stdout
        // before it has read all of its input.
        let writer = child.stdin.take().map(|mut stdin| {
            let input = source.to_owned();
            thread::spawn(move || stdin.write_all(input.as_bytes()))
        });
        let output = child.wait_with_output().map_err(spawn_error)?;
        let written = match writer {
            Some(handle) => handle
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("formatter stdin writer panicked"))),
            None => Ok(()),
        };

        if !output.status.success() {
            return Err(FormatError::Failed {
                program: self.program.clone(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        written.map_err(spawn_error)?;
        String::from_utf8(output.stdout).map_err(|_| FormatError::Encoding {
            program: self.program.clone(),
        })
    }
}
